//! Exam chat orchestration: credential gate, question validation, context
//! narrowing, prompt assembly, model call, response parsing, and best-effort
//! session persistence.

use std::sync::Arc;

use crate::{
    constants::prompts,
    errors::{AppError, AppResult},
    models::{
        domain::{ChatMessage, ChatSession},
        dto::ChatRequest,
    },
    repositories::ChatSessionRepository,
    services::{
        model_service::TextGenerationClient,
        question_locator::{self, MARKING_SCHEME_NARROWING, PAPER_NARROWING},
        response_parser,
    },
};

pub struct ChatService {
    model: Arc<dyn TextGenerationClient>,
    sessions: Arc<dyn ChatSessionRepository>,
}

impl ChatService {
    pub fn new(model: Arc<dyn TextGenerationClient>, sessions: Arc<dyn ChatSessionRepository>) -> Self {
        Self { model, sessions }
    }

    /// Answers one student question and returns the assistant message.
    ///
    /// The credential check runs before request validation, so a deployment
    /// without an API key answers 503 even to malformed requests.
    pub async fn answer_question(&self, request: ChatRequest) -> AppResult<ChatMessage> {
        if !self.model.is_configured() {
            return Err(AppError::api_key_missing());
        }

        let question = request
            .question
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .ok_or_else(|| AppError::BadRequest("Question is required".to_string()))?;

        let reference = question_locator::detect_question_reference(question);

        let paper_context = request
            .paper_content
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| match &reference {
                Some(r) => question_locator::narrow_context(text, r, PAPER_NARROWING),
                None => text.to_string(),
            });

        let marking_scheme_context = request
            .marking_scheme_content
            .as_deref()
            .filter(|text| !text.is_empty())
            .map(|text| match &reference {
                Some(r) => question_locator::narrow_context(text, r, MARKING_SCHEME_NARROWING),
                None => text.to_string(),
            });

        let prompt = build_tutor_prompt(
            question,
            paper_context.as_deref(),
            marking_scheme_context.as_deref(),
        );

        let raw = self.model.generate(&prompt).await?;
        let parsed = response_parser::parse_ai_response(&raw);
        let assistant = ChatMessage::assistant(&parsed)?;

        if let Some(session_id) = request.session_id.as_deref().filter(|s| !s.is_empty()) {
            let user_message = ChatMessage::user(question);
            let appended = self
                .sessions
                .append_messages(
                    session_id,
                    request.paper_id.as_deref(),
                    &[user_message, assistant.clone()],
                )
                .await;

            // Persistence is best effort; a storage fault must not cost the
            // student their answer.
            if let Err(e) = appended {
                log::warn!("Failed to persist chat session {}: {}", session_id, e);
            }
        }

        Ok(assistant)
    }

    pub async fn get_session(&self, id: &str) -> AppResult<ChatSession> {
        self.sessions
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Chat session not found".to_string()))
    }
}

/// Assembles the tutor prompt: role preamble, both context blocks (with
/// placeholders when absent), the verbatim student question, per-context
/// emphasis lines, and the fixed four-heading format instructions.
fn build_tutor_prompt(
    question: &str,
    paper_context: Option<&str>,
    marking_scheme_context: Option<&str>,
) -> String {
    let mut prompt = format!(
        "{}\n\nExam Paper Context:\n{}\n\nMarking Scheme Context:\n{}\n\nStudent Question: {}\n\n",
        prompts::TUTOR_ROLE_PREAMBLE,
        paper_context.unwrap_or(prompts::NO_PAPER_CONTENT_PLACEHOLDER),
        marking_scheme_context.unwrap_or(prompts::NO_MARKING_SCHEME_PLACEHOLDER),
        question,
    );

    if paper_context.is_some() {
        prompt.push_str(prompts::PAPER_CONTEXT_EMPHASIS);
        prompt.push('\n');
    }
    if marking_scheme_context.is_some() {
        prompt.push_str(prompts::MARKING_SCHEME_EMPHASIS);
        prompt.push('\n');
    }
    if paper_context.is_some() || marking_scheme_context.is_some() {
        prompt.push('\n');
    }

    prompt.push_str(prompts::RESPONSE_FORMAT_INSTRUCTIONS);
    prompt
}
