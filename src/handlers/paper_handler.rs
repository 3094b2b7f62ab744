use actix_web::{get, post, web, HttpResponse};

use crate::{
    app_state::AppState,
    errors::AppError,
    models::dto::{ExtractionRequest, ExtractionResponse, PaginationParams},
};

/// Runs PDF text extraction for one paper. Answers 200 when at least one
/// of the two PDFs yielded text, 500 with the same response shape when
/// neither did.
#[post("/api/extract-pdf-text")]
pub async fn extract_pdf_text(
    state: web::Data<AppState>,
    request: web::Json<ExtractionRequest>,
) -> Result<HttpResponse, AppError> {
    let paper_id = request
        .into_inner()
        .paper_id
        .filter(|id| !id.trim().is_empty())
        .ok_or_else(|| AppError::BadRequest("Paper ID is required".to_string()))?;

    let outcome = state
        .extraction_service
        .extract_paper_text(&paper_id)
        .await?;
    let response = ExtractionResponse::from_outcome(&paper_id, &outcome);

    if outcome.is_completed() {
        Ok(HttpResponse::Ok().json(response))
    } else {
        Ok(HttpResponse::InternalServerError().json(response))
    }
}

#[get("/api/papers")]
pub async fn list_papers(
    state: web::Data<AppState>,
    query: web::Query<PaginationParams>,
) -> Result<HttpResponse, AppError> {
    let response = state.paper_service.list_papers(&query.into_inner()).await?;
    Ok(HttpResponse::Ok().json(response))
}

#[get("/api/papers/{id}")]
pub async fn get_paper(
    state: web::Data<AppState>,
    id: web::Path<String>,
) -> Result<HttpResponse, AppError> {
    let paper = state.paper_service.get_paper(&id).await?;
    Ok(HttpResponse::Ok().json(paper))
}

#[get("/health")]
pub async fn health_check() -> HttpResponse {
    HttpResponse::Ok().json(serde_json::json!({
        "status": "healthy",
        "service": env!("CARGO_PKG_NAME"),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
