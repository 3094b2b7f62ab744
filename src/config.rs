use secrecy::SecretString;
use std::env;

#[derive(Clone, Debug)]
pub struct Config {
    pub mongo_conn_string: String,
    pub mongo_db_name: String,
    pub storage_base_url: String,
    pub storage_service_key: Option<SecretString>,
    pub paper_bucket: String,
    pub marking_scheme_bucket: String,
    /// Absent means the chat feature is unconfigured and must answer 503.
    pub ai_api_key: Option<SecretString>,
    pub ai_api_base: String,
    pub ai_model: String,
    pub web_server_host: String,
    pub web_server_port: u16,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            mongo_conn_string: env::var("MONGO_CONN_STRING")
                .unwrap_or_else(|_| "mongodb://localhost:27017".to_string()),
            mongo_db_name: env::var("MONGO_DB_NAME")
                .unwrap_or_else(|_| "examdesk-local".to_string()),
            storage_base_url: env::var("STORAGE_BASE_URL")
                .unwrap_or_else(|_| "http://localhost:54321/storage/v1".to_string()),
            storage_service_key: env::var("STORAGE_SERVICE_KEY").ok().map(SecretString::from),
            paper_bucket: env::var("PAPER_BUCKET").unwrap_or_else(|_| "exam-papers".to_string()),
            marking_scheme_bucket: env::var("MARKING_SCHEME_BUCKET")
                .unwrap_or_else(|_| "marking-schemes".to_string()),
            ai_api_key: env::var("AI_API_KEY").ok().map(SecretString::from),
            ai_api_base: env::var("AI_API_BASE").unwrap_or_else(|_| {
                "https://generativelanguage.googleapis.com/v1beta/openai".to_string()
            }),
            ai_model: env::var("AI_MODEL").unwrap_or_else(|_| "gemini-2.5-flash".to_string()),
            web_server_host: env::var("WEB_SERVER_HOST")
                .unwrap_or_else(|_| "localhost".to_string()),
            web_server_port: env::var("WEB_SERVER_PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(8080),
        }
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            mongo_conn_string: "mongodb://localhost:27017".to_string(),
            mongo_db_name: "examdesk-test".to_string(),
            storage_base_url: "http://localhost:54321/storage/v1".to_string(),
            storage_service_key: Some(SecretString::from("test_service_key".to_string())),
            paper_bucket: "exam-papers".to_string(),
            marking_scheme_bucket: "marking-schemes".to_string(),
            ai_api_key: Some(SecretString::from("test_api_key".to_string())),
            ai_api_base: "http://localhost:9999/v1".to_string(),
            ai_model: "gemini-2.5-flash".to_string(),
            web_server_host: "127.0.0.1".to_string(),
            web_server_port: 8080,
        }
    }
}
