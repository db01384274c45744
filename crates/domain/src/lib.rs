mod analysis;
mod canvas;
mod color;
mod error;
mod status;

pub use analysis::{AnalysisRequest, AnalysisResult, Credential, EncodedImage, PNG_MIME_TYPE};
pub use canvas::{
    BrushSettings, CanvasSnapshot, PixelBuffer, CANVAS_HEIGHT, CANVAS_WIDTH, DEFAULT_STROKE_WIDTH,
    MAX_STROKE_WIDTH, MIN_STROKE_WIDTH, RGBA_CHANNELS,
};
pub use color::Color;
pub use error::DomainError;
pub use status::{AnalysisStatus, AnalysisWarning};
