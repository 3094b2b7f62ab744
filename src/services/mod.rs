pub mod chat_service;
pub mod extraction_service;
pub mod model_service;
pub mod paper_service;
pub mod pdf_service;
pub mod question_locator;
pub mod response_parser;
pub mod storage_service;

pub use chat_service::ChatService;
pub use extraction_service::{ExtractionService, InflightExtractions};
pub use model_service::{OpenAiModelService, TextGenerationClient};
pub use paper_service::PaperService;
pub use pdf_service::{PdfExtractTextExtractor, PdfTextExtractor};
pub use storage_service::{HttpObjectStore, ObjectStore};
