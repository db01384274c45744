#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnalysisWarning {
    MissingCredential,
    EmptyCanvas,
}

impl AnalysisWarning {
    pub fn message(self) -> &'static str {
        match self {
            Self::MissingCredential => "enter your API key before analyzing",
            Self::EmptyCanvas => "draw something on the canvas before analyzing",
        }
    }
}

/// Observable state of the analysis panel.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum AnalysisStatus {
    #[default]
    Idle,
    Warning(AnalysisWarning),
    Running,
    Success {
        description: String,
    },
    Error {
        message: String,
    },
}

impl AnalysisStatus {
    pub fn is_running(&self) -> bool {
        matches!(self, Self::Running)
    }

    /// Warning, Success and Error end an attempt.
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            Self::Warning(_) | Self::Success { .. } | Self::Error { .. }
        )
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Warning(_) => "warning",
            Self::Running => "running",
            Self::Success { .. } => "success",
            Self::Error { .. } => "error",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_outcomes_are_terminal() {
        assert!(!AnalysisStatus::Idle.is_terminal());
        assert!(!AnalysisStatus::Running.is_terminal());
        assert!(AnalysisStatus::Warning(AnalysisWarning::EmptyCanvas).is_terminal());
        assert!(AnalysisStatus::Error {
            message: "x".to_string()
        }
        .is_terminal());
    }
}
