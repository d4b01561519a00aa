/// Server configuration
///
/// # Environment variables
///
/// | Variable | Default | Meaning |
/// |----------|---------|---------|
/// | DATABASE_URL | sqlite:products.db | SQLite connection string |
/// | PORT | 4000 | HTTP port |
/// | FRONTEND_URL | - | allowed cross-origin URL |
/// | BACKEND_URL | - | second allowed cross-origin URL |
/// | DB_TIMEOUT_MS | 5000 | pool acquire / busy timeout (ms) |
/// | DB_MAX_CONNECTIONS | 5 | pool size |
/// | REQUEST_TIMEOUT_MS | 30000 | per-request timeout (ms) |
/// | LOG_LEVEL | info | log filter when RUST_LOG is unset |
/// | LOG_DIR | - | daily rolling log files go here when the directory exists |
///
/// # Example
///
/// ```ignore
/// DATABASE_URL=sqlite:/data/products.db PORT=8080 FRONTEND_URL=http://localhost:5173 cargo run
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub http_port: u16,
    /// Cross-origin allow-list, without trailing slashes
    pub allowed_origins: Vec<String>,
    pub db_timeout_ms: u64,
    pub db_max_connections: u32,
    pub request_timeout_ms: u64,
    pub log_level: String,
    pub log_dir: Option<String>,
}

impl Config {
    /// Load configuration from environment variables
    ///
    /// Unset or unparsable variables fall back to their defaults.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    ///
    /// Mostly used by tests to avoid touching the process environment.
    pub fn from_lookup<F>(get: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let allowed_origins = ["FRONTEND_URL", "BACKEND_URL"]
            .iter()
            .filter_map(|key| get(key))
            .map(|origin| origin.trim().trim_end_matches('/').to_string())
            .filter(|origin| !origin.is_empty())
            .collect();

        Self {
            database_url: get("DATABASE_URL")
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| "sqlite:products.db".into()),
            http_port: get("PORT").and_then(|p| p.parse().ok()).unwrap_or(4000),
            allowed_origins,
            db_timeout_ms: get("DB_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            db_max_connections: get("DB_MAX_CONNECTIONS")
                .and_then(|p| p.parse().ok())
                .filter(|n| *n > 0)
                .unwrap_or(5),
            request_timeout_ms: get("REQUEST_TIMEOUT_MS")
                .and_then(|p| p.parse().ok())
                .unwrap_or(30000),
            log_level: get("LOG_LEVEL").unwrap_or_else(|| "info".into()),
            log_dir: get("LOG_DIR").filter(|s| !s.is_empty()),
        }
    }

    /// Whether a browser `Origin` header value is on the allow-list
    pub fn is_origin_allowed(&self, origin: &str) -> bool {
        let origin = origin.trim_end_matches('/');
        self.allowed_origins.iter().any(|allowed| allowed == origin)
    }

    /// Whether the database lives in memory (one connection, never recycled)
    pub fn is_memory_database(&self) -> bool {
        self.database_url.contains(":memory:") || self.database_url.contains("mode=memory")
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::from_env()
    }
}
