//! Configuration management via environment variables
//!
//! Provides helper functions for reading `RECIPE_API_*` environment
//! variables with defaults.

/// Get an environment variable
///
/// # Returns
/// * `Some(value)` - The environment variable value
/// * `None` - The variable is not set
pub fn get_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Get an environment variable with a default value
pub fn get_env_or(name: &str, default: &str) -> String {
    get_env(name).unwrap_or_else(|| default.to_string())
}

/// Get an environment variable, parsing to a specific type
///
/// # Returns
/// The parsed environment variable value, or the default if the
/// variable is not set or parsing fails.
pub fn get_env_parse<T: std::str::FromStr>(name: &str, default: T) -> T {
    get_env(name).and_then(|s| s.parse().ok()).unwrap_or(default)
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind host
    pub host: String,
    /// Bind port
    pub port: u16,
    /// SQLite database URL
    pub database_url: String,
}

impl ServerConfig {
    /// Load server configuration from environment variables.
    pub fn from_env() -> Self {
        Self {
            host: get_env_or("RECIPE_API_HOST", "0.0.0.0"),
            port: get_env_parse("RECIPE_API_PORT", 8000),
            database_url: database_url_from_env(),
        }
    }

    /// バインドアドレス（host:port形式）
    pub fn bind_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// データベースURLを取得
///
/// 環境変数 `RECIPE_API_DATABASE_URL` から取得し、未設定の場合は
/// `data/recipe-api.db` を使用する（ディレクトリは初期化時に作成される）。
pub fn database_url_from_env() -> String {
    get_env_or("RECIPE_API_DATABASE_URL", "sqlite:data/recipe-api.db")
}
