// src/config.rs

use std::env;
use std::path::PathBuf;

use dotenvy::dotenv;

#[derive(Debug, Clone)]
pub struct Config {
    /// Location of the JSON file backing the key-value store.
    pub store_path: PathBuf,
    /// Directory of static pages served for non-API paths.
    pub static_dir: PathBuf,
    pub rust_log: String,
    pub port: u16,
    /// Absolute lifetime of an admin session.
    pub admin_session_minutes: i64,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store_path: PathBuf::from("data/store.json"),
            static_dir: PathBuf::from("public"),
            rust_log: "info".to_string(),
            port: 3000,
            admin_session_minutes: 30,
            admin_email: None,
            admin_password: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        dotenv().ok();

        let defaults = Self::default();

        let store_path = env::var("STORE_PATH")
            .map(PathBuf::from)
            .unwrap_or(defaults.store_path);

        let static_dir = env::var("STATIC_DIR")
            .map(PathBuf::from)
            .unwrap_or(defaults.static_dir);

        let rust_log = env::var("RUST_LOG").unwrap_or(defaults.rust_log);

        let port = env::var("PORT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.port);

        let admin_session_minutes = env::var("ADMIN_SESSION_MINUTES")
            .ok()
            .and_then(|v| v.parse().ok())
            .filter(|m: &i64| *m > 0)
            .unwrap_or(defaults.admin_session_minutes);

        let admin_email = env::var("ADMIN_EMAIL").ok();
        let admin_password = env::var("ADMIN_PASSWORD").ok();

        Self {
            store_path,
            static_dir,
            rust_log,
            port,
            admin_session_minutes,
            admin_email,
            admin_password,
        }
    }
}
