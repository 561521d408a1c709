use base64::{Engine as _, engine::general_purpose};

use crate::domain::common::entities::app_errors::CoreError;

pub const JPEG_MIME_TYPE: &str = "image/jpeg";

/// Lossy quality frames are encoded with before upload.
pub const JPEG_QUALITY: f32 = 0.8;

/// Request body limit enforced by the analysis proxy.
pub const MAX_REQUEST_BODY_BYTES: usize = 10 * 1024 * 1024;

/// Room left in the request body for the JSON envelope and the profile.
const REQUEST_ENVELOPE_BYTES: usize = 64 * 1024;

/// Largest base64 image that still fits in a proxy request body.
pub const MAX_ENCODED_IMAGE_BYTES: usize = MAX_REQUEST_BODY_BYTES - REQUEST_ENVELOPE_BYTES;

const JPEG_MAGIC: [u8; 3] = [0xFF, 0xD8, 0xFF];

/// Ingredient content for a single analysis request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Capture {
    /// Base64 transport form of a JPEG frame.
    Image { data: String },
    Text { content: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureKind {
    Image,
    Text,
}

impl Capture {
    pub fn from_jpeg(jpeg: &[u8]) -> Result<Self, CoreError> {
        let encoded_len = base64::encoded_len(jpeg.len(), true).unwrap_or(usize::MAX);
        if encoded_len > MAX_ENCODED_IMAGE_BYTES {
            return Err(CoreError::CameraUnavailable(format!(
                "Captured frame too large. Max encoded size is {} bytes",
                MAX_ENCODED_IMAGE_BYTES
            )));
        }

        if !jpeg.starts_with(&JPEG_MAGIC) {
            return Err(CoreError::CameraUnavailable(
                "Captured frame is not a JPEG image".to_string(),
            ));
        }

        Ok(Capture::Image {
            data: general_purpose::STANDARD.encode(jpeg),
        })
    }

    pub fn text(content: impl Into<String>) -> Self {
        Capture::Text {
            content: content.into(),
        }
    }

    pub fn kind(&self) -> CaptureKind {
        match self {
            Capture::Image { .. } => CaptureKind::Image,
            Capture::Text { .. } => CaptureKind::Text,
        }
    }
}

/// Text bound to the manual entry box on the home screen.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ManualEntry {
    text: String,
}

impl ManualEntry {
    pub fn set(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Submission is disabled while the trimmed text is empty.
    pub fn can_submit(&self) -> bool {
        !self.text.trim().is_empty()
    }

    /// The capture to analyze, or `None` when submission is disabled.
    pub fn to_capture(&self) -> Option<Capture> {
        self.can_submit().then(|| Capture::text(self.text.clone()))
    }
}
