use actix_cors::Cors;
use actix_web::{
    http::header::{self, HeaderName},
    middleware::Logger,
    web, App, HttpServer,
};

use examdesk_server::{app_state::AppState, config::Config, handlers};

const JSON_PAYLOAD_LIMIT: usize = 16 * 1024 * 1024;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    let config = Config::from_env();

    if config.ai_api_key.is_none() {
        log::warn!("AI_API_KEY is not set; /api/exam-chat will answer 503 until it is configured");
    }
    if config.storage_service_key.is_none() {
        log::warn!("STORAGE_SERVICE_KEY is not set; PDF downloads will be unauthenticated");
    }

    let host = config.web_server_host.clone();
    let port = config.web_server_port;

    let state = AppState::new(config).await.map_err(|e| {
        std::io::Error::new(
            std::io::ErrorKind::Other,
            format!("failed to initialize application state: {}", e),
        )
    })?;

    log::info!("starting HTTP server on {}:{}", host, port);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allowed_methods(vec!["GET", "POST", "PUT", "DELETE"])
            .allowed_headers(vec![
                header::CONTENT_TYPE,
                header::AUTHORIZATION,
                HeaderName::from_static("x-client-info"),
                HeaderName::from_static("apikey"),
            ])
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .app_data(web::JsonConfig::default().limit(JSON_PAYLOAD_LIMIT))
            .wrap(cors)
            .wrap(Logger::default())
            .service(handlers::extract_pdf_text)
            .service(handlers::list_papers)
            .service(handlers::get_paper)
            .service(handlers::exam_chat)
            .service(handlers::get_chat_session)
            .service(handlers::health_check)
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
