use std::fmt;

use uuid::Uuid;

use crate::domain::{
    analysis::entities::ScanResult,
    capture::entities::{Capture, CaptureKind},
    common::{entities::app_errors::CoreError, generate_uuid_v7},
    profile::{entities::UserProfile, value_objects::ProfileEdit},
};

pub const APP_TITLE: &str = "LabelIQ";

pub const IMAGE_ANALYSIS_FAILED: &str = "Analysis failed. Please try again with a clearer photo.";
pub const TEXT_ANALYSIS_FAILED: &str = "Manual analysis failed.";
pub const CAMERA_ACCESS_FAILED: &str = "Could not access camera. Please check permissions.";
pub const PROFILE_SAVE_FAILED: &str = "Could not save your profile. Please try again.";

/// Identifies one analysis request so a late response can be matched against
/// the screen that is still waiting for it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScanTicket(Uuid);

impl ScanTicket {
    pub fn new() -> Self {
        Self(generate_uuid_v7())
    }
}

impl Default for ScanTicket {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ScanTicket {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Screen {
    Home,
    Scan(ScanView),
    Result(ResultView),
    Profile(ProfileDraft),
    About,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanView {
    Initializing,
    Live,
    /// Camera could not be used; the only way out is back home.
    Failed(CoreError),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResultView {
    Analyzing { ticket: ScanTicket },
    Ready(ScanResult),
}

/// Uncommitted edits; dropped unless saved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileDraft {
    pub profile: UserProfile,
}

impl Screen {
    pub fn name(&self) -> &'static str {
        match self {
            Screen::Home => "home",
            Screen::Scan(_) => "scan",
            Screen::Result(_) => "result",
            Screen::Profile(_) => "profile",
            Screen::About => "about",
        }
    }

    pub fn title(&self) -> String {
        match self {
            Screen::Home => APP_TITLE.to_string(),
            other => {
                let name = other.name();
                let mut chars = name.chars();
                match chars.next() {
                    Some(first) => first.to_uppercase().chain(chars).collect(),
                    None => String::new(),
                }
            }
        }
    }

    pub fn is_scan(&self) -> bool {
        matches!(self, Screen::Scan(_))
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, Screen::Result(ResultView::Analyzing { .. }))
    }

    pub fn hides_navigation(&self) -> bool {
        self.is_scan()
    }

    pub fn result(&self) -> Option<&ScanResult> {
        match self {
            Screen::Result(ResultView::Ready(result)) => Some(result),
            _ => None,
        }
    }
}

/// Inputs to the orchestrator: user gestures and completed I/O.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    StartScan,
    CameraReady,
    CameraFailed(CoreError),
    TakePhoto,
    Captured(Capture),
    /// Leaves the scan screen, either via "Cancel" or the error "Go Back".
    Cancel,
    EditManualText(String),
    SubmitManualText,
    OpenProfile,
    EditProfile(ProfileEdit),
    SaveProfile,
    OpenAbout,
    GoHome,
    AnalysisFinished {
        ticket: ScanTicket,
        outcome: Result<ScanResult, CoreError>,
    },
}

/// Work the orchestrator asks its driver to perform.
#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    OpenCamera,
    CaptureFrame,
    RequestAnalysis {
        ticket: ScanTicket,
        capture: Capture,
    },
    PersistProfile(UserProfile),
    Notify(Notice),
}

/// Blocking, non-technical message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub message: String,
}

impl Notice {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn analysis_failed(kind: CaptureKind) -> Self {
        match kind {
            CaptureKind::Image => Self::new(IMAGE_ANALYSIS_FAILED),
            CaptureKind::Text => Self::new(TEXT_ANALYSIS_FAILED),
        }
    }
}

/// Actions a screen exposes to the user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UserAction {
    StartScan,
    AnalyzeText,
    EditProfile,
    OpenAbout,
    TakePhoto,
    Cancel,
    GoBack,
    ScanAnother,
    EditDraft,
    SaveProfile,
    GoHome,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_titles() {
        assert_eq!(Screen::Home.title(), "LabelIQ");
        assert_eq!(Screen::About.title(), "About");
        assert_eq!(Screen::Scan(ScanView::Live).title(), "Scan");
        assert_eq!(
            Screen::Profile(ProfileDraft {
                profile: UserProfile::default()
            })
            .title(),
            "Profile"
        );
    }

    #[test]
    fn test_navigation_hidden_only_while_scanning() {
        assert!(Screen::Scan(ScanView::Initializing).hides_navigation());
        assert!(!Screen::Home.hides_navigation());
        assert!(
            !Screen::Result(ResultView::Analyzing {
                ticket: ScanTicket::new()
            })
            .hides_navigation()
        );
    }

    #[test]
    fn test_tickets_are_unique() {
        assert_ne!(ScanTicket::new(), ScanTicket::new());
    }
}
