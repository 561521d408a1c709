use std::path::PathBuf;

use labeliq_core::{
    domain::orchestrator::AppController,
    infrastructure::{capture::FileCamera, profile::FileProfileStore, proxy::HttpAnalysisClient},
};

pub mod analyze;
pub mod profile;
pub mod render;

pub type Session = AppController<HttpAnalysisClient, FileProfileStore, FileCamera>;

pub struct SessionSettings {
    pub api_url: String,
    pub data_dir: PathBuf,
}

impl SessionSettings {
    /// Starts a session whose camera reads frames from `image`, if any.
    pub async fn start(&self, image: Option<PathBuf>) -> Session {
        tracing::debug!(api_url = %self.api_url, data_dir = %self.data_dir.display(), "starting session");
        AppController::start(
            HttpAnalysisClient::new(self.api_url.clone()),
            FileProfileStore::new(self.data_dir.clone()),
            FileCamera::new(image.unwrap_or_default()),
        )
        .await
    }
}
