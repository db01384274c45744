pub mod canvas;
pub mod fs;
pub mod inference;
pub mod png;
pub mod presenters;

pub use canvas::{RasterCanvas, Stroke};
pub use fs::ImageFileCanvas;
pub use inference::{
    ChatCompletionsClient, DEFAULT_MAX_TOKENS, DEFAULT_MODEL, OPENAI_CHAT_COMPLETIONS_URL,
};
pub use png::PngBase64Encoder;
pub use presenters::{present_status, wrap_text, LogStatusListener};
