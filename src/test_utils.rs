use crate::models::domain::{ExtractionStatus, Paper};

#[cfg(test)]
pub mod fixtures {
    use super::*;

    /// Creates a paper record with both PDF paths set and no extraction run yet.
    pub fn test_paper(id: &str) -> Paper {
        Paper {
            id: id.to_string(),
            subject_id: "maths".to_string(),
            year: 2023,
            paper_number: "1".to_string(),
            title: Some("June 2023 Paper 1".to_string()),
            paper_file_url: "2023/june/paper-1.pdf".to_string(),
            marking_scheme_file_url: "2023/june/scheme-1.pdf".to_string(),
            paper_extracted_text: None,
            marking_scheme_extracted_text: None,
            text_extraction_status: ExtractionStatus::Pending,
            text_extracted_at: None,
            extraction_error: None,
            created_at: None,
            updated_at: None,
        }
    }
}

#[cfg(test)]
pub mod test_helpers {
    use actix_web::http::StatusCode;

    /// Asserts that a status code represents an error (4xx or 5xx)
    pub fn assert_error_status(status: StatusCode) {
        assert!(
            status.is_client_error() || status.is_server_error(),
            "Expected error status, got: {}",
            status
        );
    }

    /// Asserts that a status code represents success (2xx)
    pub fn assert_success_status(status: StatusCode) {
        assert!(
            status.is_success(),
            "Expected success status, got: {}",
            status
        );
    }
}

#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use crate::models::domain::ExtractionStatus;

    #[test]
    fn test_fixtures_test_paper() {
        let paper = test_paper("paper-1");
        assert_eq!(paper.id, "paper-1");
        assert_eq!(paper.text_extraction_status, ExtractionStatus::Pending);
        assert!(paper.paper_extracted_text.is_none());
    }
}
