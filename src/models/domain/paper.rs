use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Clone, Debug, PartialEq, Eq, Deserialize, Serialize)]
pub struct Paper {
    pub id: String,
    pub subject_id: String,
    pub year: i32,
    pub paper_number: String, // "1", "2H" etc.
    pub title: Option<String>,
    pub paper_file_url: String,          // object-store path, paper bucket
    pub marking_scheme_file_url: String, // object-store path, scheme bucket
    pub paper_extracted_text: Option<String>,
    pub marking_scheme_extracted_text: Option<String>,
    pub text_extraction_status: ExtractionStatus,
    pub text_extracted_at: Option<DateTime<Utc>>,
    pub extraction_error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

/// Progress of PDF-to-text conversion for a paper. Transitions run
/// pending -> processing -> completed | failed; a retry re-enters
/// processing and fully replaces the previous result.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ExtractionStatus {
    Pending,
    Processing,
    Completed,
    Failed,
}

impl ExtractionStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ExtractionStatus::Pending => "pending",
            ExtractionStatus::Processing => "processing",
            ExtractionStatus::Completed => "completed",
            ExtractionStatus::Failed => "failed",
        }
    }
}

/// The unconditional overwrite applied to a paper record when an extraction
/// attempt finishes. Every field replaces the stored value, including None.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionUpdate {
    pub paper_text: Option<String>,
    pub marking_scheme_text: Option<String>,
    pub status: ExtractionStatus,
    pub extracted_at: Option<DateTime<Utc>>,
    pub error: Option<String>,
}

/// Result of folding the two independent download-and-parse sub-tasks into
/// a final status and diagnostic error.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractionOutcome {
    pub paper_text: Option<String>,
    pub marking_scheme_text: Option<String>,
    pub status: ExtractionStatus,
    pub error: Option<String>,
}

impl ExtractionOutcome {
    /// Folds the per-PDF results. Empty text counts as no text. Completed
    /// requires at least one non-empty text; failure messages are kept even
    /// alongside a completed status so partial failures stay diagnosable.
    pub fn aggregate(paper: Result<String, String>, scheme: Result<String, String>) -> Self {
        let (paper_text, paper_error) = Self::split(paper);
        let (marking_scheme_text, scheme_error) = Self::split(scheme);

        let status = if paper_text.is_some() || marking_scheme_text.is_some() {
            ExtractionStatus::Completed
        } else {
            ExtractionStatus::Failed
        };

        let error = match (paper_error, scheme_error) {
            (Some(paper_message), Some(scheme_message)) => {
                Some(format!("{}; {}", paper_message, scheme_message))
            }
            (Some(message), None) | (None, Some(message)) => Some(message),
            (None, None) if status == ExtractionStatus::Failed => {
                Some("No text could be extracted from PDFs".to_string())
            }
            (None, None) => None,
        };

        Self {
            paper_text,
            marking_scheme_text,
            status,
            error,
        }
    }

    fn split(result: Result<String, String>) -> (Option<String>, Option<String>) {
        match result {
            Ok(text) if text.is_empty() => (None, None),
            Ok(text) => (Some(text), None),
            Err(message) => (None, Some(message)),
        }
    }

    pub fn is_completed(&self) -> bool {
        self.status == ExtractionStatus::Completed
    }

    pub fn paper_text_chars(&self) -> usize {
        self.paper_text.as_deref().map_or(0, |t| t.chars().count())
    }

    pub fn marking_scheme_text_chars(&self) -> usize {
        self.marking_scheme_text
            .as_deref()
            .map_or(0, |t| t.chars().count())
    }

    pub fn response_message(&self) -> String {
        if self.is_completed() {
            "Text extraction completed successfully".to_string()
        } else {
            self.error
                .clone()
                .unwrap_or_else(|| "Text extraction failed".to_string())
        }
    }

    pub fn into_update(self, now: DateTime<Utc>) -> ExtractionUpdate {
        let extracted_at = self.is_completed().then_some(now);
        ExtractionUpdate {
            paper_text: self.paper_text,
            marking_scheme_text: self.marking_scheme_text,
            status: self.status,
            extracted_at,
            error: self.error,
        }
    }
}
