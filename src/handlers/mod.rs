pub mod chat_handler;
pub mod paper_handler;

pub use chat_handler::{exam_chat, get_chat_session};
pub use paper_handler::{extract_pdf_text, get_paper, health_check, list_papers};
