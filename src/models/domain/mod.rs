pub mod chat;
pub mod paper;
pub use chat::{AiResponse, ChatMessage, ChatSession, MessageRole};
pub use paper::{ExtractionOutcome, ExtractionStatus, ExtractionUpdate, Paper};
