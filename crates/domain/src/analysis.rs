use std::fmt::{Debug, Formatter};

use crate::DomainError;

pub const PNG_MIME_TYPE: &str = "image/png";

/// Base64 text of a PNG image.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EncodedImage(String);

impl EncodedImage {
    pub fn new(base64: impl Into<String>) -> Self {
        Self(base64.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn data_uri(&self) -> String {
        format!("data:{PNG_MIME_TYPE};base64,{}", self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisRequest {
    instruction: String,
    image_data_uri: String,
}

impl AnalysisRequest {
    pub fn new(instruction: impl Into<String>, image: &EncodedImage) -> Result<Self, DomainError> {
        if image.is_empty() {
            return Err(DomainError::EmptyEncodedImage);
        }
        Ok(Self {
            instruction: instruction.into(),
            image_data_uri: image.data_uri(),
        })
    }

    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    pub fn image_data_uri(&self) -> &str {
        &self.image_data_uri
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AnalysisResult {
    Success { description: String },
    Failure { message: String },
}

/// API key for the inference service. Lives only in session memory.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(secret: impl Into<String>) -> Result<Self, DomainError> {
        let secret = secret.into();
        if secret.trim().is_empty() {
            return Err(DomainError::EmptyCredential);
        }
        Ok(Self(secret))
    }

    pub fn expose_secret(&self) -> &str {
        &self.0
    }
}

impl Debug for Credential {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}
