use once_cell::sync::OnceCell;
use std::{env, fs};

/// Runtime configuration loaded once from `.env` / process environment.
#[derive(Debug)]
pub struct Config {
    pub project_name: String,
    pub log_level: String,
    pub log_file: String,
    pub database_path: String,
    pub host: String,
    pub port: u16,
    pub jwt_secret: String,
    pub jwt_duration_minutes: u64,
    /// Rotation window for session codes, in milliseconds.
    pub code_window_millis: i64,
}

static CONFIG: OnceCell<Config> = OnceCell::new();

impl Config {
    pub fn init() -> &'static Self {
        dotenvy::dotenv().ok();

        CONFIG.get_or_init(|| {
            let project_name =
                env::var("PROJECT_NAME").unwrap_or_else(|_| "rollcall-api".into());
            let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".into());
            let log_file = env::var("LOG_FILE").unwrap_or_else(|_| "logs/api.log".into());
            let database_path =
                env::var("DATABASE_PATH").unwrap_or_else(|_| "data/rollcall.db".into());
            let host = env::var("HOST").unwrap_or_else(|_| "127.0.0.1".into());
            let port = env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000);

            if let Some(parent) = std::path::Path::new(&log_file).parent() {
                fs::create_dir_all(parent).expect("Failed to create log directory");
            }

            let jwt_secret =
                env::var("JWT_SECRET").unwrap_or_else(|_| "insecure-dev-secret".into());
            let jwt_duration_minutes = env::var("JWT_DURATION_MINUTES")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(60);
            let code_window_millis = env::var("CODE_WINDOW_MILLIS")
                .ok()
                .and_then(|m| m.parse().ok())
                .unwrap_or(15_000);

            Config {
                project_name,
                log_level,
                log_file,
                database_path,
                host,
                port,
                jwt_secret,
                jwt_duration_minutes,
                code_window_millis,
            }
        })
    }

    pub fn get() -> &'static Self {
        // Lazily fall back to init so binaries and tests that never call
        // init explicitly still get a usable configuration.
        CONFIG.get().unwrap_or_else(|| Self::init())
    }
}
