use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{ChatRequest, ChatResponse},
};

#[post("/api/exam-chat")]
pub async fn exam_chat(
    state: web::Data<AppState>,
    request: web::Json<ChatRequest>,
) -> Result<HttpResponse, AppError> {
    let message = state
        .chat_service
        .answer_question(request.into_inner())
        .await?;
    Ok(HttpResponse::Ok().json(ChatResponse { message }))
}

#[get("/api/chat-sessions/{id}")]
pub async fn get_chat_session(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let session = state.chat_service.get_session(&id).await?;
    Ok(HttpResponse::Ok().json(session))
}
