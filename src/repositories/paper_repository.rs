use async_trait::async_trait;
use chrono::Utc;
use mongodb::{
    bson::{doc, to_bson},
    options::IndexOptions,
    Collection, IndexModel,
};

use crate::{
    db::Database,
    errors::AppResult,
    models::domain::{ExtractionStatus, ExtractionUpdate, Paper},
};

#[async_trait]
pub trait PaperRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Paper>>;
    async fn list_papers(&self, offset: i64, limit: i64) -> AppResult<(Vec<Paper>, i64)>;
    /// Flags the record as having an extraction attempt in progress.
    async fn mark_processing(&self, id: &str) -> AppResult<()>;
    /// Overwrites the extraction fields unconditionally; a retry fully
    /// replaces whatever the previous attempt stored.
    async fn store_extraction(&self, id: &str, update: &ExtractionUpdate) -> AppResult<()>;
}

pub struct MongoPaperRepository {
    collection: Collection<Paper>,
}

impl MongoPaperRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("exam_papers");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for exam_papers collection");

        let id_index = IndexModel::builder()
            .keys(doc! { "id": 1 })
            .options(
                IndexOptions::builder()
                    .unique(true)
                    .name("id_unique".to_string())
                    .build(),
            )
            .build();

        self.collection.create_index(id_index).await?;

        log::info!("Successfully created indexes for exam_papers collection");
        Ok(())
    }
}

#[async_trait]
impl PaperRepository for MongoPaperRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<Paper>> {
        let paper = self.collection.find_one(doc! { "id": id }).await?;
        Ok(paper)
    }

    async fn list_papers(&self, offset: i64, limit: i64) -> AppResult<(Vec<Paper>, i64)> {
        use futures::TryStreamExt;
        use mongodb::options::FindOptions;

        let total = self.collection.count_documents(doc! {}).await? as i64;

        let find_options = FindOptions::builder()
            .sort(doc! { "year": -1, "paper_number": 1 })
            .skip(Some(offset as u64))
            .limit(Some(limit))
            .build();

        let cursor = self
            .collection
            .find(doc! {})
            .with_options(find_options)
            .await?;
        let items: Vec<Paper> = cursor.try_collect().await?;

        Ok((items, total))
    }

    async fn mark_processing(&self, id: &str) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "text_extraction_status": ExtractionStatus::Processing.as_str(),
                    "updated_at": to_bson(&Utc::now())?,
                } },
            )
            .await?;
        Ok(())
    }

    async fn store_extraction(&self, id: &str, update: &ExtractionUpdate) -> AppResult<()> {
        self.collection
            .update_one(
                doc! { "id": id },
                doc! { "$set": {
                    "paper_extracted_text": to_bson(&update.paper_text)?,
                    "marking_scheme_extracted_text": to_bson(&update.marking_scheme_text)?,
                    "text_extraction_status": update.status.as_str(),
                    "text_extracted_at": to_bson(&update.extracted_at)?,
                    "extraction_error": to_bson(&update.error)?,
                    "updated_at": to_bson(&Utc::now())?,
                } },
            )
            .await?;
        Ok(())
    }
}
