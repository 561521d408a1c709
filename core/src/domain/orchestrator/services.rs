use tracing::{debug, error, warn};

use crate::domain::{
    analysis::entities::ScanResult,
    capture::entities::{Capture, CaptureKind, ManualEntry},
    common::entities::app_errors::CoreError,
    orchestrator::entities::{
        Action, Effect, Notice, ProfileDraft, ResultView, ScanTicket, ScanView, Screen, UserAction,
    },
    profile::{entities::UserProfile, value_objects::VersionedProfile},
};

#[derive(Debug, Clone, Copy)]
struct InFlight {
    ticket: ScanTicket,
    kind: CaptureKind,
}

/// Screen state machine. Performs no I/O: every transition that needs the
/// outside world returns an [`Effect`] for the driver to execute.
#[derive(Debug)]
pub struct Orchestrator {
    screen: Screen,
    profile: VersionedProfile,
    manual: ManualEntry,
    in_flight: Option<InFlight>,
}

impl Orchestrator {
    pub fn new(profile: UserProfile) -> Self {
        Self {
            screen: Screen::Home,
            profile: VersionedProfile::new(profile),
            manual: ManualEntry::default(),
            in_flight: None,
        }
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn profile(&self) -> &UserProfile {
        self.profile.profile()
    }

    pub fn profile_version(&self) -> u64 {
        self.profile.version()
    }

    /// True while a request is outstanding, even if the user left the result
    /// screen that was waiting for it.
    pub fn has_request_in_flight(&self) -> bool {
        self.in_flight.is_some()
    }

    pub fn available_actions(&self) -> Vec<UserAction> {
        let idle = self.in_flight.is_none();
        match &self.screen {
            Screen::Home => {
                let mut actions = Vec::new();
                if idle {
                    actions.push(UserAction::StartScan);
                }
                if idle && self.manual.can_submit() {
                    actions.push(UserAction::AnalyzeText);
                }
                actions.push(UserAction::EditProfile);
                actions.push(UserAction::OpenAbout);
                actions
            }
            Screen::Scan(ScanView::Initializing) => vec![UserAction::Cancel],
            Screen::Scan(ScanView::Live) => vec![UserAction::TakePhoto, UserAction::Cancel],
            Screen::Scan(ScanView::Failed(_)) => vec![UserAction::GoBack],
            Screen::Result(ResultView::Analyzing { .. }) => Vec::new(),
            Screen::Result(ResultView::Ready(_)) => vec![UserAction::ScanAnother],
            Screen::Profile(_) => vec![
                UserAction::EditDraft,
                UserAction::SaveProfile,
                UserAction::GoHome,
            ],
            Screen::About => vec![UserAction::GoHome],
        }
    }

    pub fn dispatch(&mut self, action: Action) -> Option<Effect> {
        match action {
            Action::StartScan => {
                if matches!(self.screen, Screen::Home) && self.in_flight.is_none() {
                    self.screen = Screen::Scan(ScanView::Initializing);
                    return Some(Effect::OpenCamera);
                }
                self.ignore("start scan")
            }
            Action::CameraReady => {
                if matches!(self.screen, Screen::Scan(ScanView::Initializing)) {
                    self.screen = Screen::Scan(ScanView::Live);
                }
                None
            }
            Action::CameraFailed(reason) => {
                if self.screen.is_scan() {
                    warn!("camera failure: {}", reason);
                    self.screen = Screen::Scan(ScanView::Failed(reason));
                }
                None
            }
            Action::TakePhoto => {
                if matches!(self.screen, Screen::Scan(ScanView::Live)) {
                    return Some(Effect::CaptureFrame);
                }
                self.ignore("take photo")
            }
            Action::Captured(capture) => {
                if matches!(self.screen, Screen::Scan(ScanView::Live)) {
                    return self.begin_analysis(capture);
                }
                self.ignore("capture")
            }
            Action::Cancel => {
                if self.screen.is_scan() {
                    self.screen = Screen::Home;
                }
                None
            }
            Action::EditManualText(text) => {
                if matches!(self.screen, Screen::Home) {
                    self.manual.set(text);
                }
                None
            }
            Action::SubmitManualText => {
                if !matches!(self.screen, Screen::Home) {
                    return self.ignore("manual submit");
                }
                match self.manual.to_capture() {
                    Some(capture) => self.begin_analysis(capture),
                    None => None,
                }
            }
            Action::OpenProfile => {
                if matches!(self.screen, Screen::Home) {
                    self.screen = Screen::Profile(ProfileDraft {
                        profile: self.profile.profile().clone(),
                    });
                }
                None
            }
            Action::EditProfile(edit) => {
                if let Screen::Profile(draft) = &mut self.screen {
                    draft.profile.apply(edit);
                }
                None
            }
            Action::SaveProfile => {
                let Screen::Profile(draft) = std::mem::replace(&mut self.screen, Screen::Home)
                else {
                    return self.ignore("save profile");
                };
                let version = self.profile.commit(draft.profile);
                debug!(version, "profile committed");
                Some(Effect::PersistProfile(self.profile.profile().clone()))
            }
            Action::OpenAbout => {
                if matches!(self.screen, Screen::Home) {
                    self.screen = Screen::About;
                }
                None
            }
            Action::GoHome => {
                self.screen = Screen::Home;
                None
            }
            Action::AnalysisFinished { ticket, outcome } => self.finish_analysis(ticket, outcome),
        }
    }

    fn begin_analysis(&mut self, capture: Capture) -> Option<Effect> {
        if let Some(current) = &self.in_flight {
            warn!(ticket = %current.ticket, "analysis already in flight, ignoring new request");
            return None;
        }

        let ticket = ScanTicket::new();
        self.in_flight = Some(InFlight {
            ticket,
            kind: capture.kind(),
        });
        self.screen = Screen::Result(ResultView::Analyzing { ticket });
        debug!(%ticket, "analysis started");

        Some(Effect::RequestAnalysis { ticket, capture })
    }

    fn finish_analysis(
        &mut self,
        ticket: ScanTicket,
        outcome: Result<ScanResult, CoreError>,
    ) -> Option<Effect> {
        let in_flight = match self.in_flight {
            Some(current) if current.ticket == ticket => current,
            _ => {
                warn!(%ticket, "response for unknown request discarded");
                return None;
            }
        };
        self.in_flight = None;

        let awaiting = matches!(
            &self.screen,
            Screen::Result(ResultView::Analyzing { ticket: waiting }) if *waiting == ticket
        );
        if !awaiting {
            debug!(%ticket, screen = self.screen.name(), "stale analysis response discarded");
            return None;
        }

        match outcome {
            Ok(result) => {
                self.screen = Screen::Result(ResultView::Ready(result));
                None
            }
            Err(e) => {
                error!("analysis failed: {}", e);
                self.screen = Screen::Home;
                Some(Effect::Notify(Notice::analysis_failed(in_flight.kind)))
            }
        }
    }

    fn ignore(&self, what: &str) -> Option<Effect> {
        debug!(screen = self.screen.name(), "{} ignored", what);
        None
    }
}
