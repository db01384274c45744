use sketchboard_domain::{
    AnalysisRequest, AnalysisResult, AnalysisStatus, CanvasSnapshot, Credential, EncodedImage,
    PixelBuffer,
};

use crate::ApplicationError;

/// Read-only view of a drawing surface.
pub trait CanvasSource {
    fn snapshot(&self) -> CanvasSnapshot;
}

pub trait ImageEncoder {
    fn encode_png(&self, buffer: &PixelBuffer) -> Result<EncodedImage, ApplicationError>;
}

/// Remote model call. Failures are reported as `AnalysisResult::Failure`,
/// never as a panic or an error value.
pub trait InferenceClient {
    fn describe(&self, request: &AnalysisRequest, credential: &Credential) -> AnalysisResult;
}

pub trait StatusListener {
    fn on_status_changed(&self, status: &AnalysisStatus);
}
