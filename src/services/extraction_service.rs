//! PDF text extraction orchestration.
//!
//! Downloads the paper and marking-scheme PDFs for a stored exam paper,
//! runs text extraction on each, and overwrites the record with the folded
//! outcome. The two sub-tasks fail independently; one bad PDF never aborts
//! the other.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;

use crate::{
    config::Config,
    errors::{AppError, AppResult},
    models::domain::ExtractionOutcome,
    repositories::PaperRepository,
    services::{pdf_service::PdfTextExtractor, storage_service::ObjectStore},
};

/// Papers with an extraction currently running in this process. A second
/// request for the same paper answers 409 instead of racing the first one
/// to the final overwrite.
#[derive(Debug, Default)]
pub struct InflightExtractions {
    in_flight: Mutex<HashSet<String>>,
}

impl InflightExtractions {
    fn lock(&self) -> MutexGuard<'_, HashSet<String>> {
        self.in_flight
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers `paper_id` as in flight. The returned guard releases the
    /// slot on drop, including on early returns and panics.
    pub fn try_begin(self: &Arc<Self>, paper_id: &str) -> AppResult<InflightGuard> {
        if !self.lock().insert(paper_id.to_string()) {
            return Err(AppError::Conflict(
                "Text extraction is already in progress for this paper".to_string(),
            ));
        }

        Ok(InflightGuard {
            registry: Arc::clone(self),
            paper_id: paper_id.to_string(),
        })
    }
}

#[derive(Debug)]
pub struct InflightGuard {
    registry: Arc<InflightExtractions>,
    paper_id: String,
}

impl Drop for InflightGuard {
    fn drop(&mut self) {
        self.registry.lock().remove(&self.paper_id);
    }
}

pub struct ExtractionService {
    papers: Arc<dyn PaperRepository>,
    store: Arc<dyn ObjectStore>,
    extractor: Arc<dyn PdfTextExtractor>,
    in_flight: Arc<InflightExtractions>,
    paper_bucket: String,
    marking_scheme_bucket: String,
}

impl ExtractionService {
    pub fn new(
        papers: Arc<dyn PaperRepository>,
        store: Arc<dyn ObjectStore>,
        extractor: Arc<dyn PdfTextExtractor>,
        in_flight: Arc<InflightExtractions>,
        config: &Config,
    ) -> Self {
        Self {
            papers,
            store,
            extractor,
            in_flight,
            paper_bucket: config.paper_bucket.clone(),
            marking_scheme_bucket: config.marking_scheme_bucket.clone(),
        }
    }

    /// Runs one full extraction attempt for `paper_id` and stores the result.
    ///
    /// The stored update replaces all extraction fields unconditionally, so a
    /// retry never merges with a previous attempt.
    pub async fn extract_paper_text(&self, paper_id: &str) -> AppResult<ExtractionOutcome> {
        let _guard = self.in_flight.try_begin(paper_id)?;

        let paper = self
            .papers
            .find_by_id(paper_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam paper not found".to_string()))?;

        log::info!("Starting text extraction for paper {}", paper_id);
        self.papers.mark_processing(paper_id).await?;

        let paper_result = self
            .download_and_extract(&self.paper_bucket, &paper.paper_file_url)
            .await
            .map_err(|e| format!("Paper extraction failed: {}", e));

        let scheme_result = self
            .download_and_extract(&self.marking_scheme_bucket, &paper.marking_scheme_file_url)
            .await
            .map_err(|e| format!("Scheme extraction failed: {}", e));

        let outcome = ExtractionOutcome::aggregate(paper_result, scheme_result);

        if let Some(error) = &outcome.error {
            log::warn!("Extraction errors for paper {}: {}", paper_id, error);
        }
        log::info!(
            "Extraction {} for paper {}: paper text {} chars, marking scheme text {} chars",
            outcome.status.as_str(),
            paper_id,
            outcome.paper_text_chars(),
            outcome.marking_scheme_text_chars()
        );

        self.papers
            .store_extraction(paper_id, &outcome.clone().into_update(Utc::now()))
            .await?;

        Ok(outcome)
    }

    async fn download_and_extract(&self, bucket: &str, path: &str) -> AppResult<String> {
        let data = self.store.download(bucket, path).await?;
        self.extractor.extract_text(data).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::{ExtractionStatus, ExtractionUpdate, Paper};
    use crate::services::pdf_service::MockPdfTextExtractor;
    use crate::services::storage_service::MockObjectStore;
    use crate::test_utils::fixtures::test_paper;
    use async_trait::async_trait;

    #[test]
    fn try_begin_rejects_a_second_request_for_the_same_paper() {
        let registry = Arc::new(InflightExtractions::default());

        let _guard = registry.try_begin("paper-1").unwrap();
        let second = registry.try_begin("paper-1");

        match second {
            Err(AppError::Conflict(message)) => {
                assert_eq!(message, "Text extraction is already in progress for this paper")
            }
            other => panic!("expected conflict, got {:?}", other),
        }
    }

    #[test]
    fn try_begin_releases_the_slot_when_the_guard_drops() {
        let registry = Arc::new(InflightExtractions::default());

        drop(registry.try_begin("paper-1").unwrap());
        assert!(registry.try_begin("paper-1").is_ok());
    }

    #[test]
    fn try_begin_tracks_papers_independently() {
        let registry = Arc::new(InflightExtractions::default());

        let _first = registry.try_begin("paper-1").unwrap();
        assert!(registry.try_begin("paper-2").is_ok());
    }

    struct RecordingPaperRepository {
        paper: Option<Paper>,
        processing_marks: Mutex<Vec<String>>,
        stored: Mutex<Vec<ExtractionUpdate>>,
    }

    impl RecordingPaperRepository {
        fn with_paper(paper: Paper) -> Self {
            Self {
                paper: Some(paper),
                processing_marks: Mutex::new(vec![]),
                stored: Mutex::new(vec![]),
            }
        }

        fn empty() -> Self {
            Self {
                paper: None,
                processing_marks: Mutex::new(vec![]),
                stored: Mutex::new(vec![]),
            }
        }
    }

    #[async_trait]
    impl PaperRepository for RecordingPaperRepository {
        async fn find_by_id(&self, id: &str) -> AppResult<Option<Paper>> {
            Ok(self.paper.clone().filter(|p| p.id == id))
        }

        async fn list_papers(&self, _offset: i64, _limit: i64) -> AppResult<(Vec<Paper>, i64)> {
            Ok((self.paper.clone().into_iter().collect(), 0))
        }

        async fn mark_processing(&self, id: &str) -> AppResult<()> {
            self.processing_marks.lock().unwrap().push(id.to_string());
            Ok(())
        }

        async fn store_extraction(&self, _id: &str, update: &ExtractionUpdate) -> AppResult<()> {
            self.stored.lock().unwrap().push(update.clone());
            Ok(())
        }
    }

    fn service_with(
        papers: Arc<RecordingPaperRepository>,
        store: MockObjectStore,
        extractor: MockPdfTextExtractor,
    ) -> ExtractionService {
        ExtractionService::new(
            papers,
            Arc::new(store),
            Arc::new(extractor),
            Arc::new(InflightExtractions::default()),
            &Config::test_config(),
        )
    }

    #[tokio::test]
    async fn unknown_paper_is_not_found_and_never_marked_processing() {
        let papers = Arc::new(RecordingPaperRepository::empty());
        let mut store = MockObjectStore::new();
        store.expect_download().times(0);
        let mut extractor = MockPdfTextExtractor::new();
        extractor.expect_extract_text().times(0);

        let service = service_with(Arc::clone(&papers), store, extractor);
        let err = service.extract_paper_text("missing").await.unwrap_err();

        match err {
            AppError::NotFound(message) => assert_eq!(message, "Exam paper not found"),
            other => panic!("expected not found, got {:?}", other),
        }
        assert!(papers.processing_marks.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn partial_failure_still_completes_and_keeps_the_failure_message() {
        let papers = Arc::new(RecordingPaperRepository::with_paper(test_paper("paper-1")));

        let mut store = MockObjectStore::new();
        store
            .expect_download()
            .returning(|bucket, _path| {
                if bucket == "exam-papers" {
                    Ok(b"%PDF paper bytes".to_vec())
                } else {
                    Err(AppError::InternalError(
                        "Storage responded with status 404 Not Found for marking-schemes/2023/june/scheme-1.pdf".to_string(),
                    ))
                }
            });

        let mut extractor = MockPdfTextExtractor::new();
        extractor
            .expect_extract_text()
            .returning(|_| Ok("Question 1: differentiate f(x)".to_string()));

        let service = service_with(Arc::clone(&papers), store, extractor);
        let outcome = service.extract_paper_text("paper-1").await.unwrap();

        assert_eq!(outcome.status, ExtractionStatus::Completed);
        assert_eq!(
            outcome.paper_text.as_deref(),
            Some("Question 1: differentiate f(x)")
        );
        assert_eq!(outcome.marking_scheme_text, None);
        let error = outcome.error.expect("scheme failure must be recorded");
        assert!(error.starts_with("Scheme extraction failed:"), "{error}");

        assert_eq!(
            papers.processing_marks.lock().unwrap().as_slice(),
            ["paper-1"]
        );
        let stored = papers.stored.lock().unwrap();
        assert_eq!(stored.len(), 1);
        assert_eq!(stored[0].status, ExtractionStatus::Completed);
        assert!(stored[0].extracted_at.is_some());
        assert_eq!(stored[0].error.as_deref(), Some(error.as_str()));
    }

    #[tokio::test]
    async fn both_failures_store_a_joined_error_and_no_timestamp() {
        let papers = Arc::new(RecordingPaperRepository::with_paper(test_paper("paper-1")));

        let mut store = MockObjectStore::new();
        store
            .expect_download()
            .returning(|_, _| Err(AppError::InternalError("connection refused".to_string())));
        let mut extractor = MockPdfTextExtractor::new();
        extractor.expect_extract_text().times(0);

        let service = service_with(Arc::clone(&papers), store, extractor);
        let outcome = service.extract_paper_text("paper-1").await.unwrap();

        assert_eq!(outcome.status, ExtractionStatus::Failed);
        assert_eq!(
            outcome.error.as_deref(),
            Some(
                "Paper extraction failed: connection refused; \
                 Scheme extraction failed: connection refused"
            )
        );

        let stored = papers.stored.lock().unwrap();
        assert_eq!(stored[0].status, ExtractionStatus::Failed);
        assert_eq!(stored[0].extracted_at, None);
    }

    #[tokio::test]
    async fn extraction_is_rejected_while_another_run_holds_the_slot() {
        let papers = Arc::new(RecordingPaperRepository::with_paper(test_paper("paper-1")));
        let store = MockObjectStore::new();
        let extractor = MockPdfTextExtractor::new();

        let in_flight = Arc::new(InflightExtractions::default());
        let service = ExtractionService::new(
            papers,
            Arc::new(store),
            Arc::new(extractor),
            Arc::clone(&in_flight),
            &Config::test_config(),
        );

        let _held = in_flight.try_begin("paper-1").unwrap();
        let err = service.extract_paper_text("paper-1").await.unwrap_err();

        assert!(matches!(err, AppError::Conflict(_)));
    }
}
