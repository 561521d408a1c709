use std::future::Future;

use crate::domain::common::entities::app_errors::CoreError;

/// A device able to hand out a live preview stream.
pub trait Camera: Send + Sync {
    type Stream: CameraStream;

    /// Opens the rear-facing camera, the one pointed at the label. Fails with
    /// `CameraPermissionDenied` or `CameraUnavailable`.
    fn open(&self) -> impl Future<Output = Result<Self::Stream, CoreError>> + Send;
}

pub trait CameraStream: Send {
    /// Freezes the current preview frame and returns it JPEG encoded.
    fn freeze_frame(&mut self, quality: f32) -> Result<Vec<u8>, CoreError>;

    /// Stops every track of the stream.
    fn release(&mut self);
}
