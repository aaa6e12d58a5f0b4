//! エラー型定義
//!
//! 統一エラー型（thiserror使用）

use axum::http::StatusCode;
use thiserror::Error;

/// Recipe API error type
#[derive(Debug, Error)]
pub enum RecipeError {
    /// Database error
    #[error("Database error: {0}")]
    Database(String),

    /// Validation error
    #[error("Validation error: {0}")]
    Validation(String),

    /// Authentication error
    #[error("Authentication error: {0}")]
    Authentication(String),

    /// Resource not found
    #[error("Not found: {0}")]
    NotFound(String),

    /// Password hash error
    #[error("Password hash error: {0}")]
    PasswordHash(String),

    /// Internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RecipeError {
    /// Returns a safe error message for external clients.
    ///
    /// Validation, authentication and not-found messages are written for the
    /// client and pass through unchanged. Database and internal errors may
    /// contain connection strings or SQL fragments, so they are replaced with
    /// a generic message; full details go to the server logs only.
    pub fn client_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Authentication(msg) | Self::NotFound(msg) => msg.clone(),
            Self::Database(_) => "Database error".to_string(),
            Self::PasswordHash(_) => "Authentication error".to_string(),
            Self::Internal(_) => "Internal server error".to_string(),
        }
    }

    /// Returns the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            // バリデーション失敗は認証系も含めて400を返す（トークン発行失敗と同扱い）
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Authentication(_) => StatusCode::UNAUTHORIZED,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::PasswordHash(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Result type alias
pub type RecipeResult<T> = Result<T, RecipeError>;
