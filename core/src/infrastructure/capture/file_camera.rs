use std::{io::ErrorKind, path::PathBuf};

use crate::domain::{
    capture::ports::{Camera, CameraStream},
    common::entities::app_errors::CoreError,
};

/// Camera backed by a JPEG file on disk, for hosts without a capture device.
///
/// The file is read when the camera opens; that frame is what gets frozen.
#[derive(Debug, Clone)]
pub struct FileCamera {
    path: PathBuf,
}

impl FileCamera {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

#[derive(Debug)]
pub struct FileCameraStream {
    frame: Option<Vec<u8>>,
}

impl Camera for FileCamera {
    type Stream = FileCameraStream;

    async fn open(&self) -> Result<FileCameraStream, CoreError> {
        tracing::debug!(path = %self.path.display(), "opening file camera");

        let frame = tokio::fs::read(&self.path).await.map_err(|e| match e.kind() {
            ErrorKind::PermissionDenied => CoreError::CameraPermissionDenied,
            _ => CoreError::CameraUnavailable(format!("{}: {}", self.path.display(), e)),
        })?;

        Ok(FileCameraStream { frame: Some(frame) })
    }
}

impl CameraStream for FileCameraStream {
    /// Frames on disk are already encoded, so `quality` has no effect.
    fn freeze_frame(&mut self, _quality: f32) -> Result<Vec<u8>, CoreError> {
        self.frame
            .clone()
            .ok_or_else(|| CoreError::CameraUnavailable("stream already released".to_string()))
    }

    fn release(&mut self) {
        self.frame = None;
    }
}

#[cfg(test)]
mod tests {
    use tempfile::TempDir;

    use super::*;

    #[tokio::test]
    async fn test_freeze_returns_file_contents_until_released() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("label.jpg");
        std::fs::write(&path, [0xFF, 0xD8, 0xFF, 0xE0]).unwrap();

        let mut stream = FileCamera::new(&path)
            .open()
            .await
            .unwrap();
        assert_eq!(stream.freeze_frame(0.8).unwrap(), vec![0xFF, 0xD8, 0xFF, 0xE0]);

        stream.release();
        assert!(matches!(
            stream.freeze_frame(0.8),
            Err(CoreError::CameraUnavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_missing_file_is_unavailable() {
        let dir = TempDir::new().unwrap();
        let err = FileCamera::new(dir.path().join("nope.jpg"))
            .open()
            .await
            .unwrap_err();

        assert!(matches!(err, CoreError::CameraUnavailable(_)));
        assert!(err.is_camera_error());
    }
}
