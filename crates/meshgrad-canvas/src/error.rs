use std::fmt;

use meshgrad_engine::paint::ColorParseError;
use thiserror::Error;

/// What a missing id referred to.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum TargetKind {
    Point,
    Stop,
    Image,
}

impl fmt::Display for TargetKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            TargetKind::Point => "point",
            TargetKind::Stop => "stop",
            TargetKind::Image => "image",
        })
    }
}

/// Errors raised by canvas edits, image handling and (de)serialization.
///
/// Out-of-range numbers are never errors; they are clamped where they enter.
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("invalid color {0:?}: expected #rrggbb")]
    InvalidColorFormat(String),

    /// The edit would leave a gradient with fewer than two stops.
    #[error("a gradient needs at least two stops")]
    DegenerateGradient,

    #[error("no {0} with id {1}")]
    MissingTarget(TargetKind, u64),

    #[error("image error: {0}")]
    Image(String),

    #[error("export failed: {0}")]
    Export(String),

    #[error("document error: {0}")]
    Document(#[from] serde_json::Error),
}

impl From<ColorParseError> for CanvasError {
    fn from(err: ColorParseError) -> Self {
        CanvasError::InvalidColorFormat(err.0)
    }
}

pub type Result<T> = std::result::Result<T, CanvasError>;
