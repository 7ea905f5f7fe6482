use std::time::Duration;

/// Runtime configuration, read from the environment (a `.env` file is loaded first).
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub port: u16,
    pub jwt_secret: String,
    /// The protected account: undeletable, email and role frozen.
    pub master_admin_email: String,
    /// When set, the master admin is created on startup if it does not exist yet.
    pub master_admin_password: Option<String>,
    pub page_size: u64,
    pub csrf_token_ttl: Duration,
    pub permission_cache_ttl: Duration,
    pub session_ttl: Duration,
    pub bcrypt_cost: u32,
}

impl AppConfig {
    /// Panics when a required variable is missing, like the server's other startup checks.
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: parse_env("PORT", 8080),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET must be set"),
            master_admin_email: std::env::var("MASTER_ADMIN_EMAIL")
                .unwrap_or_else(|_| "admin@example.com".to_string())
                .to_lowercase(),
            master_admin_password: std::env::var("MASTER_ADMIN_PASSWORD").ok(),
            page_size: page_size(std::env::var("PAGE_SIZE").ok()),
            csrf_token_ttl: Duration::from_secs(parse_env("CSRF_TOKEN_TTL_SECS", 3600)),
            permission_cache_ttl: Duration::from_secs(parse_env("PERMISSION_CACHE_TTL_SECS", 300)),
            session_ttl: Duration::from_secs(parse_env("SESSION_TTL_SECS", 28800)),
            bcrypt_cost: parse_env("BCRYPT_COST", bcrypt::DEFAULT_COST),
        }
    }

    /// Settings for tests and tools that bring their own database.
    pub fn for_database(database_url: &str) -> Self {
        Self {
            database_url: database_url.to_string(),
            port: 0,
            jwt_secret: "local-development-secret".to_string(),
            master_admin_email: "admin@example.com".to_string(),
            master_admin_password: None,
            page_size: 20,
            csrf_token_ttl: Duration::from_secs(3600),
            permission_cache_ttl: Duration::from_secs(300),
            session_ttl: Duration::from_secs(3600),
            bcrypt_cost: 4,
        }
    }
}

fn parse_env<T: std::str::FromStr>(env_var: &str, default: T) -> T {
    parse_or(std::env::var(env_var).ok(), default)
}

fn parse_or<T: std::str::FromStr>(raw: Option<String>, default: T) -> T {
    raw.and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

/// Listings page by this size, so it is never zero.
fn page_size(raw: Option<String>) -> u64 {
    parse_or(raw, 20).max(1)
}
