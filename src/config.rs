/// Runtime configuration, collected once at startup from the environment.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub bind_addr: String,
    pub session_key: Option<String>,
    pub public_base_url: String,
    pub upload_dir: String,
    pub cors_origins: Vec<String>,
    pub max_upload_bytes: usize,
}

impl Config {
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL")
            .unwrap_or_else(|_| "postgres://localhost/cadastra".to_string());
        let bind_addr =
            std::env::var("BIND_ADDR").unwrap_or_else(|_| "127.0.0.1:8080".to_string());
        let session_key = std::env::var("SESSION_KEY").ok();
        let public_base_url = std::env::var("PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:8080".to_string());
        let upload_dir = std::env::var("UPLOAD_DIR").unwrap_or_else(|_| "uploads".to_string());

        let cors_origins = match std::env::var("CORS_ORIGINS") {
            Ok(val) => val
                .split(',')
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .collect(),
            Err(_) => {
                log::warn!("No CORS_ORIGINS set, allowing http://localhost:5173 only");
                vec!["http://localhost:5173".to_string()]
            }
        };

        let max_upload_bytes = std::env::var("MAX_UPLOAD_BYTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(2 * 1024 * 1024);

        Config {
            database_url,
            bind_addr,
            session_key,
            public_base_url,
            upload_dir,
            cors_origins,
            max_upload_bytes,
        }
    }
}
