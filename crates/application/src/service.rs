use sketchboard_domain::{
    AnalysisResult, AnalysisStatus, AnalysisWarning, CanvasSnapshot, Credential,
};

use crate::{
    build_analysis_request, AnalyzeCanvasCommand, ApplicationError, CanvasSource,
    CurrentStatusQuery, ImageEncoder, InferenceClient, SetCredentialCommand, StatusListener,
};

/// Per-window analysis state. Each UI action maps to one method; listeners
/// see every status transition.
pub struct AnalysisSession {
    encoder: Box<dyn ImageEncoder>,
    inference: Box<dyn InferenceClient>,
    credential: Option<Credential>,
    status: AnalysisStatus,
    listeners: Vec<Box<dyn StatusListener>>,
}

impl AnalysisSession {
    pub fn new(encoder: Box<dyn ImageEncoder>, inference: Box<dyn InferenceClient>) -> Self {
        Self {
            encoder,
            inference,
            credential: None,
            status: AnalysisStatus::Idle,
            listeners: Vec::new(),
        }
    }

    pub fn subscribe(&mut self, listener: Box<dyn StatusListener>) {
        listener.on_status_changed(&self.status);
        self.listeners.push(listener);
    }

    /// Replaces the held credential. A blank entry clears it.
    pub fn set_credential(&mut self, command: SetCredentialCommand) {
        self.credential = Credential::new(command.secret).ok();
    }

    pub fn has_credential(&self) -> bool {
        self.credential.is_some()
    }

    pub fn status(&self, _query: CurrentStatusQuery) -> &AnalysisStatus {
        &self.status
    }

    /// Runs one attempt to completion and returns its terminal status.
    pub fn analyze(
        &mut self,
        canvas: &dyn CanvasSource,
        _command: AnalyzeCanvasCommand,
    ) -> AnalysisStatus {
        if self.status.is_running() {
            log::warn!("analysis already in flight, ignoring trigger");
            return self.status.clone();
        }
        if self.status.is_terminal() {
            self.transition(AnalysisStatus::Idle);
        }

        let outcome = match self.run_attempt(canvas) {
            Ok(description) => AnalysisStatus::Success { description },
            Err(ApplicationError::MissingCredential) => {
                AnalysisStatus::Warning(AnalysisWarning::MissingCredential)
            }
            Err(ApplicationError::EmptyCanvas) => {
                AnalysisStatus::Warning(AnalysisWarning::EmptyCanvas)
            }
            Err(error) => AnalysisStatus::Error {
                message: error.to_string(),
            },
        };
        self.transition(outcome);
        self.status.clone()
    }

    fn run_attempt(&mut self, canvas: &dyn CanvasSource) -> Result<String, ApplicationError> {
        let credential = self
            .credential
            .clone()
            .ok_or(ApplicationError::MissingCredential)?;
        let buffer = match canvas.snapshot() {
            CanvasSnapshot::Empty => return Err(ApplicationError::EmptyCanvas),
            CanvasSnapshot::Drawn(buffer) => buffer,
        };

        self.transition(AnalysisStatus::Running);
        let encoded = self.encoder.encode_png(&buffer)?;
        let request = build_analysis_request(&encoded)?;
        log::info!(
            "requesting description for {}x{} drawing ({} base64 bytes)",
            buffer.width(),
            buffer.height(),
            encoded.as_str().len()
        );

        match self.inference.describe(&request, &credential) {
            AnalysisResult::Success { description } => Ok(description),
            AnalysisResult::Failure { message } => Err(ApplicationError::Inference(message)),
        }
    }

    fn transition(&mut self, next: AnalysisStatus) {
        log::debug!("analysis status {} -> {}", self.status.label(), next.label());
        self.status = next;
        for listener in &self.listeners {
            listener.on_status_changed(&self.status);
        }
    }
}
