use crate::domain::{
    capture::{
        entities::{Capture, JPEG_QUALITY},
        ports::CameraStream,
    },
    common::entities::app_errors::CoreError,
};

/// Owns an open camera stream for the lifetime of the scan screen.
///
/// The stream is released exactly once, when the session is dropped, whether
/// the user captured a frame, cancelled, or hit an error.
pub struct CaptureSession<S: CameraStream> {
    stream: S,
}

impl<S: CameraStream> CaptureSession<S> {
    pub fn new(stream: S) -> Self {
        Self { stream }
    }

    pub fn capture(&mut self) -> Result<Capture, CoreError> {
        let jpeg = self.stream.freeze_frame(JPEG_QUALITY)?;
        Capture::from_jpeg(&jpeg)
    }
}

impl<S: CameraStream> Drop for CaptureSession<S> {
    fn drop(&mut self) {
        self.stream.release();
        tracing::debug!("camera stream released");
    }
}
