use sketchboard_application::StatusListener;
use sketchboard_domain::AnalysisStatus;

pub fn present_status(status: &AnalysisStatus) -> String {
    match status {
        AnalysisStatus::Idle => "Draw a sketch, then press ANALYZE.".to_string(),
        AnalysisStatus::Warning(warning) => format!("Warning: {}.", warning.message()),
        AnalysisStatus::Running => "Analyzing the drawing...".to_string(),
        AnalysisStatus::Success { description } => format!("Description: {description}"),
        AnalysisStatus::Error { message } => {
            format!("An error occurred while analyzing the image: {message}")
        }
    }
}

/// Greedy word wrap for fixed-width text. Words longer than a line are split.
pub fn wrap_text(text: &str, max_columns: usize) -> Vec<String> {
    let max_columns = max_columns.max(1);
    let mut lines = Vec::new();

    for paragraph in text.lines() {
        let mut line = String::new();
        for word in paragraph.split_whitespace() {
            let mut word: Vec<char> = word.chars().collect();
            while word.len() > max_columns {
                if !line.is_empty() {
                    lines.push(std::mem::take(&mut line));
                }
                let rest = word.split_off(max_columns);
                lines.push(word.into_iter().collect());
                word = rest;
            }

            let line_len = line.chars().count();
            let needed = if line.is_empty() { word.len() } else { line_len + 1 + word.len() };
            if needed > max_columns {
                lines.push(std::mem::take(&mut line));
            }
            if !line.is_empty() {
                line.push(' ');
            }
            line.extend(word);
        }
        lines.push(line);
    }

    lines
}

/// Writes every status transition to the log.
#[derive(Debug, Default)]
pub struct LogStatusListener;

impl StatusListener for LogStatusListener {
    fn on_status_changed(&self, status: &AnalysisStatus) {
        match status {
            AnalysisStatus::Idle | AnalysisStatus::Running => {
                log::debug!("status: {}", status.label())
            }
            AnalysisStatus::Warning(warning) => {
                log::warn!("analysis skipped: {}", warning.message())
            }
            AnalysisStatus::Success { description } => {
                log::info!("analysis completed: {description}")
            }
            AnalysisStatus::Error { message } => log::error!("analysis failed: {message}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use sketchboard_domain::AnalysisWarning;

    use super::*;

    #[test]
    fn success_shows_description_verbatim() {
        let status = AnalysisStatus::Success {
            description: "a red circle".to_string(),
        };
        assert_eq!(present_status(&status), "Description: a red circle");
    }

    #[test]
    fn warning_and_error_carry_their_cause() {
        assert_eq!(
            present_status(&AnalysisStatus::Warning(AnalysisWarning::EmptyCanvas)),
            "Warning: draw something on the canvas before analyzing."
        );
        let error = AnalysisStatus::Error {
            message: "inference error: service returned HTTP 401 Unauthorized".to_string(),
        };
        assert!(present_status(&error).ends_with("HTTP 401 Unauthorized"));
    }

    #[test]
    fn wrap_breaks_on_word_boundaries() {
        assert_eq!(
            wrap_text("a small red house with a tree", 11),
            vec!["a small red", "house with", "a tree"]
        );
    }

    #[test]
    fn wrap_splits_overlong_words_and_keeps_paragraphs() {
        assert_eq!(
            wrap_text("abcdefghij xy\nnext", 4),
            vec!["abcd", "efgh", "ij", "xy", "next"]
        );
        assert!(wrap_text("", 10).is_empty());
    }
}
