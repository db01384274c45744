mod error;
mod ports;
mod request;
mod service;
mod use_cases;

pub use error::ApplicationError;
pub use ports::{CanvasSource, ImageEncoder, InferenceClient, StatusListener};
pub use request::{build_analysis_request, DESCRIBE_INSTRUCTION};
pub use service::AnalysisSession;
pub use use_cases::{AnalyzeCanvasCommand, CurrentStatusQuery, SetCredentialCommand};
