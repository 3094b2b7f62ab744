use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{MongoChatSessionRepository, MongoPaperRepository},
    services::{
        chat_service::ChatService,
        extraction_service::{ExtractionService, InflightExtractions},
        model_service::OpenAiModelService,
        paper_service::PaperService,
        pdf_service::PdfExtractTextExtractor,
        storage_service::HttpObjectStore,
    },
};

#[derive(Clone)]
pub struct AppState {
    pub paper_service: Arc<PaperService>,
    pub extraction_service: Arc<ExtractionService>,
    pub chat_service: Arc<ChatService>,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;

        let paper_repository = Arc::new(MongoPaperRepository::new(&db));
        paper_repository.ensure_indexes().await?;

        let session_repository = Arc::new(MongoChatSessionRepository::new(&db));
        session_repository.ensure_indexes().await?;

        let store = Arc::new(HttpObjectStore::from_config(&config));
        let extractor = Arc::new(PdfExtractTextExtractor);
        let model = Arc::new(OpenAiModelService::from_config(&config));

        let paper_service = Arc::new(PaperService::new(paper_repository.clone()));
        let extraction_service = Arc::new(ExtractionService::new(
            paper_repository,
            store,
            extractor,
            Arc::new(InflightExtractions::default()),
            &config,
        ));
        let chat_service = Arc::new(ChatService::new(model, session_repository));

        Ok(Self {
            paper_service,
            extraction_service,
            chat_service,
            config: Arc::new(config),
        })
    }
}
