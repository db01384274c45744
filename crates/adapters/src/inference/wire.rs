use serde::{Deserialize, Serialize};
use sketchboard_domain::AnalysisRequest;

#[derive(Debug, Serialize)]
pub(crate) struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
}

impl<'a> ChatCompletionRequest<'a> {
    pub fn for_analysis(model: &'a str, max_tokens: u32, request: &'a AnalysisRequest) -> Self {
        Self {
            model,
            messages: vec![ChatMessage {
                role: "user",
                content: vec![
                    ContentPart::Text {
                        text: request.instruction(),
                    },
                    ContentPart::ImageUrl {
                        image_url: request.image_data_uri(),
                    },
                ],
            }],
            max_tokens,
        }
    }
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatMessage<'a> {
    pub role: &'a str,
    pub content: Vec<ContentPart<'a>>,
}

#[derive(Debug, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub(crate) enum ContentPart<'a> {
    Text { text: &'a str },
    ImageUrl { image_url: &'a str },
}

#[derive(Debug, Deserialize)]
pub(crate) struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<Choice>,
}

impl ChatCompletionResponse {
    pub fn into_first_content(self) -> Option<String> {
        self.choices.into_iter().next()?.message.content
    }
}

#[derive(Debug, Deserialize)]
pub(crate) struct Choice {
    pub message: AssistantMessage,
}

#[derive(Debug, Deserialize)]
pub(crate) struct AssistantMessage {
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorEnvelope {
    pub error: ErrorBody,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use sketchboard_domain::EncodedImage;

    use super::*;

    #[test]
    fn request_body_matches_multimodal_chat_shape() {
        let analysis =
            AnalysisRequest::new("describe it", &EncodedImage::new("QUJD")).expect("request");
        let body = ChatCompletionRequest::for_analysis("gpt-4o-mini", 300, &analysis);

        assert_eq!(
            serde_json::to_value(&body).expect("serialize"),
            json!({
                "model": "gpt-4o-mini",
                "messages": [{
                    "role": "user",
                    "content": [
                        {"type": "text", "text": "describe it"},
                        {"type": "image_url", "image_url": "data:image/png;base64,QUJD"}
                    ]
                }],
                "max_tokens": 300
            })
        );
    }

    #[test]
    fn response_yields_first_choice_content() {
        let response: ChatCompletionResponse = serde_json::from_value(json!({
            "id": "chatcmpl-1",
            "choices": [
                {"index": 0, "message": {"role": "assistant", "content": "a red circle"}},
                {"index": 1, "message": {"role": "assistant", "content": "ignored"}}
            ]
        }))
        .expect("deserialize");
        assert_eq!(response.into_first_content().as_deref(), Some("a red circle"));
    }

    #[test]
    fn null_content_and_missing_choices_yield_nothing() {
        let null_content: ChatCompletionResponse = serde_json::from_value(json!({
            "choices": [{"message": {"content": null}}]
        }))
        .expect("deserialize");
        assert_eq!(null_content.into_first_content(), None);

        let no_choices: ChatCompletionResponse =
            serde_json::from_value(json!({})).expect("deserialize");
        assert_eq!(no_choices.into_first_content(), None);
    }
}
