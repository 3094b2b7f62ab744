pub mod chat_session_repository;
pub mod paper_repository;

pub use chat_session_repository::{ChatSessionRepository, MongoChatSessionRepository};
pub use paper_repository::{MongoPaperRepository, PaperRepository};
