use std::sync::Arc;

use crate::{
    errors::{AppError, AppResult},
    models::{
        domain::Paper,
        dto::{PaginationParams, PaperListResponse, PaperSummaryDto},
    },
    repositories::PaperRepository,
};

pub struct PaperService {
    repository: Arc<dyn PaperRepository>,
}

impl PaperService {
    pub fn new(repository: Arc<dyn PaperRepository>) -> Self {
        Self { repository }
    }

    pub async fn get_paper(&self, id: &str) -> AppResult<Paper> {
        self.repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("Exam paper not found".to_string()))
    }

    pub async fn list_papers(&self, pagination: &PaginationParams) -> AppResult<PaperListResponse> {
        let (papers, total) = self
            .repository
            .list_papers(pagination.offset(), pagination.limit())
            .await?;

        Ok(PaperListResponse {
            papers: papers.into_iter().map(PaperSummaryDto::from).collect(),
            total,
        })
    }
}
