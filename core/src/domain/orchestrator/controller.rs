use std::{collections::VecDeque, sync::Arc};

use tokio::sync::mpsc;
use tracing::{debug, error, info, warn};

use crate::domain::{
    analysis::ports::AnalysisClient,
    capture::{
        ports::Camera,
        session::CaptureSession,
    },
    common::entities::app_errors::CoreError,
    orchestrator::{
        entities::{Action, Effect, Notice, PROFILE_SAVE_FAILED, Screen},
        services::Orchestrator,
    },
    profile::{entities::UserProfile, ports::ProfileStore},
};

/// Drives an [`Orchestrator`] against real ports.
///
/// Analysis requests run on spawned tasks; their outcomes come back through
/// an internal channel and are applied by [`AppController::pump`].
pub struct AppController<A, P, C>
where
    A: AnalysisClient + 'static,
    P: ProfileStore,
    C: Camera,
{
    orchestrator: Orchestrator,
    client: Arc<A>,
    store: P,
    camera: C,
    session: Option<CaptureSession<C::Stream>>,
    completions_tx: mpsc::UnboundedSender<Action>,
    completions_rx: mpsc::UnboundedReceiver<Action>,
    notices: VecDeque<Notice>,
}

impl<A, P, C> AppController<A, P, C>
where
    A: AnalysisClient + 'static,
    P: ProfileStore,
    C: Camera,
{
    /// Loads the saved profile, falling back to the first-run default.
    pub async fn start(client: A, store: P, camera: C) -> Self {
        let profile = match store.load().await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!("no saved profile, using defaults");
                UserProfile::default()
            }
            Err(e) => {
                warn!("failed to load profile, using defaults: {}", e);
                UserProfile::default()
            }
        };

        let (completions_tx, completions_rx) = mpsc::unbounded_channel();

        Self {
            orchestrator: Orchestrator::new(profile),
            client: Arc::new(client),
            store,
            camera,
            session: None,
            completions_tx,
            completions_rx,
            notices: VecDeque::new(),
        }
    }

    pub fn orchestrator(&self) -> &Orchestrator {
        &self.orchestrator
    }

    pub fn screen(&self) -> &Screen {
        self.orchestrator.screen()
    }

    pub fn camera_open(&self) -> bool {
        self.session.is_some()
    }

    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notices.pop_front()
    }

    /// Applies `action` and every follow-up action produced by its effects.
    pub async fn dispatch(&mut self, action: Action) {
        let mut pending = VecDeque::from([action]);

        while let Some(action) = pending.pop_front() {
            let effect = self.orchestrator.dispatch(action);

            if !self.orchestrator.screen().is_scan() && self.session.take().is_some() {
                debug!("left scan screen, camera closed");
            }

            if let Some(effect) = effect {
                if let Some(next) = self.execute(effect).await {
                    pending.push_back(next);
                }
            }
        }
    }

    /// Waits for the next analysis outcome and applies it.
    pub async fn pump(&mut self) {
        if let Some(action) = self.completions_rx.recv().await {
            self.dispatch(action).await;
        }
    }

    async fn execute(&mut self, effect: Effect) -> Option<Action> {
        match effect {
            Effect::OpenCamera => match self.camera.open().await {
                Ok(stream) => {
                    self.session = Some(CaptureSession::new(stream));
                    Some(Action::CameraReady)
                }
                Err(e) => Some(Action::CameraFailed(e)),
            },
            Effect::CaptureFrame => {
                let Some(session) = self.session.as_mut() else {
                    return Some(Action::CameraFailed(CoreError::CameraUnavailable(
                        "camera stream is not open".to_string(),
                    )));
                };
                match session.capture() {
                    Ok(capture) => Some(Action::Captured(capture)),
                    Err(e) => Some(Action::CameraFailed(e)),
                }
            }
            Effect::RequestAnalysis { ticket, capture } => {
                let client = Arc::clone(&self.client);
                let profile = self.orchestrator.profile().clone();
                let completions = self.completions_tx.clone();

                let analysis =
                    tokio::spawn(async move { client.analyze(&capture, &profile).await });

                tokio::spawn(async move {
                    let outcome = analysis.await.unwrap_or_else(|e| {
                        error!(%ticket, "analysis task failed: {}", e);
                        Err(CoreError::InternalServerError)
                    });
                    if completions
                        .send(Action::AnalysisFinished { ticket, outcome })
                        .is_err()
                    {
                        debug!(%ticket, "controller gone, analysis outcome dropped");
                    }
                });
                None
            }
            Effect::PersistProfile(profile) => {
                if let Err(e) = self.store.save(profile).await {
                    error!("failed to persist profile: {}", e);
                    self.notices.push_back(Notice::new(PROFILE_SAVE_FAILED));
                }
                None
            }
            Effect::Notify(notice) => {
                self.notices.push_back(notice);
                None
            }
        }
    }
}
