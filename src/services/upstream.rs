// src/services/upstream.rs
use serde::Serialize;
use serde_json::Value;

use crate::config::RelayMode;

pub const SYSTEM_PROMPT: &str = "You are a compassionate therapy assistant. Provide supportive, empathetic responses to help users with their emotional well-being.";

/// Returned when the upstream answered successfully but in a shape we don't know.
pub const FALLBACK_REPLY: &str = "I hear you. Thank you for sharing that with me.";

#[derive(Debug, Serialize)]
pub struct TextGenerationRequest<'a> {
    pub inputs: &'a str,
    pub parameters: GenerationParameters,
}

#[derive(Debug, Serialize)]
pub struct GenerationParameters {
    pub max_new_tokens: u32,
}

#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest<'a> {
    pub model: &'a str,
    pub messages: Vec<ChatMessage<'a>>,
    pub max_tokens: u32,
    pub temperature: f32,
    pub top_p: f32,
}

#[derive(Debug, Serialize)]
pub struct ChatMessage<'a> {
    pub role: &'static str,
    pub content: &'a str,
}

/// Request body for whichever upstream the mode points at.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum UpstreamRequest<'a> {
    TextGeneration(TextGenerationRequest<'a>),
    ChatCompletion(ChatCompletionRequest<'a>),
}

impl<'a> UpstreamRequest<'a> {
    pub fn build(mode: &'a RelayMode, message: &'a str) -> Self {
        match mode {
            RelayMode::CustomEndpoint { .. } => UpstreamRequest::TextGeneration(TextGenerationRequest {
                inputs: message,
                parameters: GenerationParameters { max_new_tokens: 100 },
            }),
            RelayMode::Fallback { model, .. } => UpstreamRequest::ChatCompletion(ChatCompletionRequest {
                model,
                messages: vec![
                    ChatMessage {
                        role: "system",
                        content: SYSTEM_PROMPT,
                    },
                    ChatMessage {
                        role: "user",
                        content: message,
                    },
                ],
                max_tokens: 150,
                temperature: 0.8,
                top_p: 0.9,
            }),
        }
    }
}

/// A successful upstream body, classified by shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UpstreamReply {
    /// `[{"generated_text": "..."}, ...]`
    TextGenerationArray(String),
    /// `{"generated_text": "..."}`
    TextGenerationObject(String),
    /// `{"choices": [{"message": {"content": "..."}}]}`
    ChatCompletion(String),
    Unrecognized,
}

impl UpstreamReply {
    /// Classify `body` against the shapes the active mode can produce, in priority order.
    pub fn decode(mode: &RelayMode, body: &Value) -> Self {
        let text_at = |pointer: &str| {
            body.pointer(pointer)
                .and_then(Value::as_str)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
        };

        match mode {
            RelayMode::CustomEndpoint { .. } => {
                if body.is_array() {
                    if let Some(text) = text_at("/0/generated_text") {
                        return UpstreamReply::TextGenerationArray(text);
                    }
                }
                if body.is_object() {
                    if let Some(text) = text_at("/generated_text") {
                        return UpstreamReply::TextGenerationObject(text);
                    }
                }
                UpstreamReply::Unrecognized
            }
            RelayMode::Fallback { .. } => match text_at("/choices/0/message/content") {
                Some(text) => UpstreamReply::ChatCompletion(text),
                None => UpstreamReply::Unrecognized,
            },
        }
    }

    pub fn is_recognized(&self) -> bool {
        !matches!(self, UpstreamReply::Unrecognized)
    }

    /// Final client-facing text: the generated string, or the canned reply, trimmed.
    pub fn into_text(self) -> String {
        match self {
            UpstreamReply::TextGenerationArray(text)
            | UpstreamReply::TextGenerationObject(text)
            | UpstreamReply::ChatCompletion(text) => text.trim().to_string(),
            UpstreamReply::Unrecognized => FALLBACK_REPLY.to_string(),
        }
    }
}

/// Message to surface when the upstream answers with a non-2xx status.
pub fn error_message(status: u16, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        let detail = match parsed.get("error") {
            Some(Value::String(msg)) => Some(msg.as_str()),
            Some(Value::Object(obj)) => obj.get("message").and_then(Value::as_str),
            _ => None,
        };
        if let Some(msg) = detail.filter(|m| !m.is_empty()) {
            return msg.to_string();
        }
    }

    if body.trim().is_empty() {
        format!("API request failed with status {}", status)
    } else {
        format!("API request failed: {}", body)
    }
}
