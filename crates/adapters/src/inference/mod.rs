mod wire;

use reqwest::blocking::Client;
use sketchboard_application::{ApplicationError, InferenceClient};
use sketchboard_domain::{AnalysisRequest, AnalysisResult, Credential};

use wire::{ChatCompletionRequest, ChatCompletionResponse, ErrorEnvelope};

pub const OPENAI_CHAT_COMPLETIONS_URL: &str = "https://api.openai.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_MAX_TOKENS: u32 = 300;

const ERROR_DETAIL_LIMIT: usize = 200;

/// Blocking client for an OpenAI-compatible chat completions endpoint.
/// One POST per call, no retries, response fully buffered.
pub struct ChatCompletionsClient {
    http: Client,
    endpoint: String,
    model: String,
    max_tokens: u32,
}

impl ChatCompletionsClient {
    pub fn new(endpoint: impl Into<String>) -> Result<Self, ApplicationError> {
        Self::with_model(endpoint, DEFAULT_MODEL, DEFAULT_MAX_TOKENS)
    }

    pub fn with_model(
        endpoint: impl Into<String>,
        model: impl Into<String>,
        max_tokens: u32,
    ) -> Result<Self, ApplicationError> {
        let endpoint = endpoint.into();
        if endpoint.trim().is_empty() {
            return Err(ApplicationError::InvalidInput(
                "inference endpoint must not be empty".to_string(),
            ));
        }
        let http = Client::builder().build().map_err(|error| {
            ApplicationError::Inference(format!("failed to build HTTP client: {error}"))
        })?;

        Ok(Self {
            http,
            endpoint,
            model: model.into(),
            max_tokens,
        })
    }

    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    fn send(
        &self,
        request: &AnalysisRequest,
        credential: &Credential,
    ) -> Result<String, ApplicationError> {
        let body = ChatCompletionRequest::for_analysis(&self.model, self.max_tokens, request);
        let response = self
            .http
            .post(&self.endpoint)
            .bearer_auth(credential.expose_secret())
            .json(&body)
            .send()
            .map_err(|error| ApplicationError::Inference(format!("request failed: {error}")))?;

        let status = response.status();
        let text = response.text().map_err(|error| {
            ApplicationError::Inference(format!("failed to read response body: {error}"))
        })?;
        if !status.is_success() {
            return Err(ApplicationError::Inference(format!(
                "service returned HTTP {status}: {}",
                error_detail(&text)
            )));
        }

        let parsed: ChatCompletionResponse = serde_json::from_str(&text).map_err(|error| {
            ApplicationError::Inference(format!("malformed response: {error}"))
        })?;
        parsed.into_first_content().ok_or_else(|| {
            ApplicationError::Inference("response contained no message content".to_string())
        })
    }
}

impl InferenceClient for ChatCompletionsClient {
    fn describe(&self, request: &AnalysisRequest, credential: &Credential) -> AnalysisResult {
        match self.send(request, credential) {
            Ok(description) => {
                log::info!("received description ({} chars)", description.chars().count());
                AnalysisResult::Success { description }
            }
            Err(error) => {
                let message = match error {
                    ApplicationError::Inference(detail) => detail,
                    other => other.to_string(),
                };
                log::warn!("inference call to {} failed: {message}", self.endpoint);
                AnalysisResult::Failure { message }
            }
        }
    }
}

fn error_detail(body: &str) -> String {
    if let Ok(envelope) = serde_json::from_str::<ErrorEnvelope>(body) {
        return envelope.error.message;
    }
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return "empty response body".to_string();
    }
    trimmed.chars().take(ERROR_DETAIL_LIMIT).collect()
}

#[cfg(test)]
mod tests {
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;

    use serde_json::Value;
    use sketchboard_domain::EncodedImage;
    use tiny_http::{Header, Response, Server};

    use super::*;

    struct CapturedRequest {
        method: String,
        authorization: Option<String>,
        body: String,
    }

    fn start_fake_service(
        status: u16,
        body: &'static str,
    ) -> (String, mpsc::Receiver<CapturedRequest>) {
        let server = Server::http("127.0.0.1:0").expect("bind fake service");
        let port = server
            .server_addr()
            .to_ip()
            .expect("tcp listener")
            .port();
        let (sender, receiver) = mpsc::channel();

        thread::spawn(move || {
            for mut request in server.incoming_requests() {
                let mut text = String::new();
                let _ = request.as_reader().read_to_string(&mut text);
                let authorization = request
                    .headers()
                    .iter()
                    .find(|header| header.field.equiv("Authorization"))
                    .map(|header| header.value.as_str().to_string());
                let _ = sender.send(CapturedRequest {
                    method: request.method().to_string(),
                    authorization,
                    body: text,
                });

                let content_type =
                    Header::from_bytes(&b"Content-Type"[..], &b"application/json"[..])
                        .expect("header");
                let response = Response::from_string(body)
                    .with_status_code(status)
                    .with_header(content_type);
                let _ = request.respond(response);
            }
        });

        (format!("http://127.0.0.1:{port}/v1/chat/completions"), receiver)
    }

    fn sample_request() -> AnalysisRequest {
        AnalysisRequest::new("Briefly describe the drawing.", &EncodedImage::new("iVBORw0K"))
            .expect("request")
    }

    fn credential() -> Credential {
        Credential::new("sk-test-key").expect("credential")
    }

    #[test]
    fn success_returns_first_choice_and_sends_one_text_and_one_image_part() {
        let (endpoint, captured) = start_fake_service(
            200,
            r#"{"choices":[{"message":{"content":"a red circle"}}]}"#,
        );
        let client = ChatCompletionsClient::new(endpoint).expect("client");

        let result = client.describe(&sample_request(), &credential());

        assert_eq!(
            result,
            AnalysisResult::Success {
                description: "a red circle".to_string()
            }
        );

        let request = captured
            .recv_timeout(Duration::from_secs(5))
            .expect("one request");
        assert!(captured.recv_timeout(Duration::from_millis(200)).is_err());
        assert_eq!(request.method, "POST");
        assert_eq!(request.authorization.as_deref(), Some("Bearer sk-test-key"));

        let body: Value = serde_json::from_str(&request.body).expect("json body");
        assert_eq!(body["model"], DEFAULT_MODEL);
        assert_eq!(body["max_tokens"], DEFAULT_MAX_TOKENS);
        let messages = body["messages"].as_array().expect("messages");
        assert_eq!(messages.len(), 1);
        assert_eq!(messages[0]["role"], "user");
        let parts = messages[0]["content"].as_array().expect("content parts");
        assert_eq!(parts.len(), 2);
        assert_eq!(parts[0]["type"], "text");
        assert_eq!(parts[0]["text"], "Briefly describe the drawing.");
        assert_eq!(parts[1]["type"], "image_url");
        assert_eq!(parts[1]["image_url"], "data:image/png;base64,iVBORw0K");
    }

    #[test]
    fn unauthorized_response_becomes_failure_with_cause() {
        let (endpoint, _captured) = start_fake_service(
            401,
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        );
        let client = ChatCompletionsClient::new(endpoint).expect("client");

        let AnalysisResult::Failure { message } = client.describe(&sample_request(), &credential())
        else {
            panic!("401 should be a failure");
        };
        assert!(message.contains("401"), "{message}");
        assert!(message.contains("Incorrect API key provided"), "{message}");
    }

    #[test]
    fn malformed_success_body_becomes_failure() {
        let (endpoint, _captured) = start_fake_service(200, "not json");
        let client = ChatCompletionsClient::new(endpoint).expect("client");

        let result = client.describe(&sample_request(), &credential());

        assert!(matches!(
            result,
            AnalysisResult::Failure { message } if message.starts_with("malformed response")
        ));
    }

    #[test]
    fn empty_choices_become_failure() {
        let (endpoint, _captured) = start_fake_service(200, r#"{"choices":[]}"#);
        let client = ChatCompletionsClient::new(endpoint).expect("client");

        let result = client.describe(&sample_request(), &credential());

        assert_eq!(
            result,
            AnalysisResult::Failure {
                message: "response contained no message content".to_string()
            }
        );
    }

    #[test]
    fn unreachable_endpoint_becomes_failure() {
        let port = {
            let server = Server::http("127.0.0.1:0").expect("bind");
            server.server_addr().to_ip().expect("tcp listener").port()
        };
        let endpoint = format!("http://127.0.0.1:{port}/v1/chat/completions");
        let client = ChatCompletionsClient::new(endpoint).expect("client");

        let result = client.describe(&sample_request(), &credential());

        assert!(matches!(
            result,
            AnalysisResult::Failure { message } if message.starts_with("request failed")
        ));
    }

    #[test]
    fn error_detail_falls_back_to_trimmed_body() {
        assert_eq!(error_detail("  upstream timeout \n"), "upstream timeout");
        assert_eq!(error_detail(""), "empty response body");
        assert_eq!(error_detail(&"x".repeat(500)).len(), ERROR_DETAIL_LIMIT);
    }

    #[test]
    fn blank_endpoint_is_rejected() {
        assert!(matches!(
            ChatCompletionsClient::new("  "),
            Err(ApplicationError::InvalidInput(_))
        ));
    }
}
