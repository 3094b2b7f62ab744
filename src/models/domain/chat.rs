use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::AppResult;

/// The structured tutoring answer the chat endpoint always produces.
/// When the model ignores the heading contract, the whole raw reply lands
/// in `explanation` and the other fields stay empty.
#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AiResponse {
    pub explanation: String,
    pub examples: Vec<String>,
    pub how_to_get_full_marks: Vec<String>,
    pub solution: String,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    User,
    Assistant,
}

/// A single entry in a chat session. Immutable once created; assistant
/// content is the JSON-serialized AiResponse, user content is free text.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: MessageRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    pub fn user(content: &str) -> Self {
        ChatMessage {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::User,
            content: content.to_string(),
            timestamp: Utc::now(),
        }
    }

    pub fn assistant(response: &AiResponse) -> AppResult<Self> {
        Ok(ChatMessage {
            id: Uuid::new_v4().to_string(),
            role: MessageRole::Assistant,
            content: serde_json::to_string(response)?,
            timestamp: Utc::now(),
        })
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct ChatSession {
    pub id: String,
    pub paper_id: Option<String>,
    pub messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ai_response_round_trips_through_json() {
        let response = AiResponse {
            explanation: "The question asks for a derivative.".to_string(),
            examples: vec!["f(x) = x^2".to_string(), "f(x) = 3x".to_string()],
            how_to_get_full_marks: vec!["Show the power rule step".to_string()],
            solution: "f'(x) = 2x".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        let parsed: AiResponse = serde_json::from_str(&json).unwrap();

        assert_eq!(parsed, response);
    }

    #[test]
    fn ai_response_uses_camel_case_field_names() {
        let response = AiResponse {
            explanation: "e".to_string(),
            examples: vec![],
            how_to_get_full_marks: vec!["point".to_string()],
            solution: "s".to_string(),
        };

        let json = serde_json::to_string(&response).unwrap();
        assert!(json.contains("\"howToGetFullMarks\""));
        assert!(json.contains("\"explanation\""));
        assert!(!json.contains("how_to_get_full_marks"));
    }

    #[test]
    fn assistant_message_embeds_the_serialized_response() {
        let response = AiResponse {
            explanation: "short answer".to_string(),
            ..AiResponse::default()
        };

        let message = ChatMessage::assistant(&response).unwrap();

        assert_eq!(message.role, MessageRole::Assistant);
        let embedded: AiResponse = serde_json::from_str(&message.content).unwrap();
        assert_eq!(embedded, response);
    }

    #[test]
    fn message_role_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&MessageRole::Assistant).unwrap(),
            "\"assistant\""
        );
        assert_eq!(serde_json::to_string(&MessageRole::User).unwrap(), "\"user\"");
    }
}
