//! Error types shared across the crate.

use thiserror::Error;

/// Errors surfaced by the paint surface, its registries and image I/O.
///
/// A cancelled text prompt or a gesture without movement is not an error;
/// those simply do nothing.
#[derive(Debug, Error)]
pub enum PaintError {
    /// The selected tool name is not in the registry. This is a
    /// configuration error and is never recovered from.
    #[error("unknown tool '{0}'")]
    UnknownTool(String),

    #[error("tool '{0}' is already registered")]
    DuplicateTool(String),

    #[error("unknown toolbar control '{0}'")]
    UnknownControl(String),

    #[error("toolbar control '{0}' is already registered")]
    DuplicateControl(String),

    #[error("invalid value '{value}' for control '{control}': {reason}")]
    InvalidControlValue {
        control: String,
        value: String,
        reason: String,
    },

    #[error("unsupported image source '{0}': expected a path or a file, http(s) or data URL")]
    UnsupportedSource(String),

    #[error("invalid data URL: {0}")]
    InvalidDataUrl(String),

    #[error("failed to fetch image: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("failed to decode image: {0}")]
    Decode(#[from] ::image::ImageError),

    #[error("cairo error: {0}")]
    Cairo(#[from] cairo::Error),

    #[error("image encoding error: {0}")]
    Png(#[from] cairo::IoError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl PaintError {
    pub(crate) fn invalid_value(control: &str, value: &str, reason: impl Into<String>) -> Self {
        PaintError::InvalidControlValue {
            control: control.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T, E = PaintError> = std::result::Result<T, E>;
