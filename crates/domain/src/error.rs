use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    StrokeWidthOutOfRange(u32),
    InvalidHexColor(String),
    SampleCountMismatch { expected: usize, actual: usize },
    EmptyEncodedImage,
    EmptyCredential,
}

impl Display for DomainError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::StrokeWidthOutOfRange(value) => write!(
                f,
                "stroke width must be between {} and {}, got {value}",
                crate::MIN_STROKE_WIDTH,
                crate::MAX_STROKE_WIDTH
            ),
            Self::InvalidHexColor(value) => {
                write!(f, "color must be written as #RRGGBB, got {value:?}")
            }
            Self::SampleCountMismatch { expected, actual } => write!(
                f,
                "pixel buffer expects {expected} samples but {actual} were supplied"
            ),
            Self::EmptyEncodedImage => write!(f, "encoded image must not be empty"),
            Self::EmptyCredential => write!(f, "credential must not be blank"),
        }
    }
}

impl std::error::Error for DomainError {}
