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
    models::domain::{ChatMessage, ChatSession},
};

#[async_trait]
pub trait ChatSessionRepository: Send + Sync {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ChatSession>>;
    /// Appends messages to a session, creating the session on first write.
    /// Messages are append-only; nothing ever rewrites an existing entry.
    async fn append_messages(
        &self,
        session_id: &str,
        paper_id: Option<&str>,
        messages: &[ChatMessage],
    ) -> AppResult<()>;
}

pub struct MongoChatSessionRepository {
    collection: Collection<ChatSession>,
}

impl MongoChatSessionRepository {
    pub fn new(db: &Database) -> Self {
        let collection = db.get_collection("chat_sessions");
        Self { collection }
    }

    pub async fn ensure_indexes(&self) -> AppResult<()> {
        log::info!("Creating indexes for chat_sessions collection");

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

        log::info!("Successfully created indexes for chat_sessions collection");
        Ok(())
    }
}

#[async_trait]
impl ChatSessionRepository for MongoChatSessionRepository {
    async fn find_by_id(&self, id: &str) -> AppResult<Option<ChatSession>> {
        let session = self.collection.find_one(doc! { "id": id }).await?;
        Ok(session)
    }

    async fn append_messages(
        &self,
        session_id: &str,
        paper_id: Option<&str>,
        messages: &[ChatMessage],
    ) -> AppResult<()> {
        let now = Utc::now();
        let message_docs = messages
            .iter()
            .map(to_bson)
            .collect::<Result<Vec<_>, _>>()?;

        self.collection
            .update_one(
                doc! { "id": session_id },
                doc! {
                    "$push": { "messages": { "$each": message_docs } },
                    "$set": { "updated_at": to_bson(&now)? },
                    "$setOnInsert": {
                        "paper_id": to_bson(&paper_id)?,
                        "created_at": to_bson(&now)?,
                    },
                },
            )
            .upsert(true)
            .await?;

        Ok(())
    }
}
