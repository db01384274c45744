use std::fmt::{Display, Formatter};

use sketchboard_domain::DomainError;

#[derive(Debug)]
pub enum ApplicationError {
    Domain(DomainError),
    MissingCredential,
    EmptyCanvas,
    Encoding(String),
    Inference(String),
    InvalidInput(String),
    Io(String),
    Decode(String),
}

impl Display for ApplicationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Domain(error) => write!(f, "{error}"),
            Self::MissingCredential => write!(f, "no API key has been entered"),
            Self::EmptyCanvas => write!(f, "the canvas is empty"),
            Self::Encoding(msg) => write!(f, "encoding error: {msg}"),
            Self::Inference(msg) => write!(f, "inference error: {msg}"),
            Self::InvalidInput(msg) => write!(f, "invalid input: {msg}"),
            Self::Io(msg) => write!(f, "io error: {msg}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

impl std::error::Error for ApplicationError {}

impl From<DomainError> for ApplicationError {
    fn from(value: DomainError) -> Self {
        Self::Domain(value)
    }
}
