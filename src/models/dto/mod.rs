pub mod request;
pub mod response;
pub use request::{ChatRequest, ExtractionRequest, PaginationParams};
pub use response::{
    ChatResponse, ExtractionResponse, PaperListResponse, PaperSummaryDto,
};
