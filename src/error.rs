//! Error type for the fallible entry points of the pipeline.
//!
//! Per-pixel invalidity (zero depth, zero density, label `-1`) is encoded with
//! sentinel values and never surfaces here; these variants cover malformed
//! inputs and configuration only.
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum SegmentationError {
    #[error("Invalid parameter `{name}`: {reason}")]
    InvalidParameter { name: &'static str, reason: String },

    #[error("Dimension mismatch: color is {color:?}, depth is {depth:?}")]
    DimensionMismatch {
        color: (usize, usize),
        depth: (usize, usize),
    },

    #[error("Label {label} has no superpixel aggregate ({available} available)")]
    LabelOutOfRange { label: i32, available: usize },

    #[error("I/O error: {0}")]
    Io(String),
}

impl From<String> for SegmentationError {
    fn from(message: String) -> Self {
        SegmentationError::Io(message)
    }
}

pub type Result<T> = std::result::Result<T, SegmentationError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn string_messages_become_io_errors() {
        let err: SegmentationError = String::from("Failed to open a.png").into();
        assert_eq!(err, SegmentationError::Io("Failed to open a.png".to_string()));
        assert_eq!(err.to_string(), "I/O error: Failed to open a.png");
    }
}
