use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::models::domain::{ChatMessage, ExtractionOutcome, ExtractionStatus, Paper};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractionResponse {
    pub success: bool,
    pub paper_id: String,
    pub message: String,
    pub paper_text_length: usize,
    pub marking_scheme_text_length: usize,
}

impl ExtractionResponse {
    pub fn from_outcome(paper_id: &str, outcome: &ExtractionOutcome) -> Self {
        ExtractionResponse {
            success: outcome.is_completed(),
            paper_id: paper_id.to_string(),
            message: outcome.response_message(),
            paper_text_length: outcome.paper_text_chars(),
            marking_scheme_text_length: outcome.marking_scheme_text_chars(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChatResponse {
    pub message: ChatMessage,
}

/// Listing view of a paper record, without the extracted-text blobs.
#[derive(Debug, Clone, Serialize)]
pub struct PaperSummaryDto {
    pub id: String,
    pub subject_id: String,
    pub year: i32,
    pub paper_number: String,
    pub title: Option<String>,
    pub text_extraction_status: ExtractionStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub text_extracted_at: Option<DateTime<Utc>>,
    pub extraction_error: Option<String>,
}

impl From<Paper> for PaperSummaryDto {
    fn from(paper: Paper) -> Self {
        PaperSummaryDto {
            id: paper.id,
            subject_id: paper.subject_id,
            year: paper.year,
            paper_number: paper.paper_number,
            title: paper.title,
            text_extraction_status: paper.text_extraction_status,
            text_extracted_at: paper.text_extracted_at,
            extraction_error: paper.extraction_error,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PaperListResponse {
    pub papers: Vec<PaperSummaryDto>,
    pub total: i64,
}
