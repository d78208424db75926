use std::env;

pub struct AppConfig {
    pub port: String,
    pub search_url: String,
    pub upload_dir: String,
}

impl AppConfig {
    pub fn from_env() -> Self {
        let get = |key: &str, default: &str| env::var(key).unwrap_or_else(|_| default.to_string());

        Self {
            port: get("PORT", "7000"),
            search_url: get("SEARCH_API_URL", "https://openlibrary.org/search.json"),
            upload_dir: get("UPLOAD_DIR", "uploads"),
        }
    }
}
