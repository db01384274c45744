use sketchboard_adapters::{DEFAULT_MAX_TOKENS, DEFAULT_MODEL, OPENAI_CHAT_COMPLETIONS_URL};
use sketchboard_domain::{BrushSettings, CANVAS_HEIGHT, CANVAS_WIDTH};

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub endpoint: String,
    pub model: String,
    pub max_tokens: u32,
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub brush: BrushSettings,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            endpoint: OPENAI_CHAT_COMPLETIONS_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            max_tokens: DEFAULT_MAX_TOKENS,
            canvas_width: CANVAS_WIDTH,
            canvas_height: CANVAS_HEIGHT,
            brush: BrushSettings::default(),
        }
    }
}
