use std::future::Future;

use crate::domain::{common::entities::app_errors::CoreError, profile::entities::UserProfile};

/// Local key-value storage for the single profile blob.
#[cfg_attr(test, mockall::automock)]
pub trait ProfileStore: Send + Sync {
    /// Returns `None` when nothing has been saved yet.
    fn load(&self) -> impl Future<Output = Result<Option<UserProfile>, CoreError>> + Send;

    fn save(&self, profile: UserProfile) -> impl Future<Output = Result<(), CoreError>> + Send;
}
