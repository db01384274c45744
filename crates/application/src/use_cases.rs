#[derive(Debug, Clone, Default)]
pub struct AnalyzeCanvasCommand;

#[derive(Clone)]
pub struct SetCredentialCommand {
    pub secret: String,
}

#[derive(Debug, Clone, Default)]
pub struct CurrentStatusQuery;
