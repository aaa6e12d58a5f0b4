//! APIエラーレスポンス型
//!
//! axum用の共通エラーハンドリング

use crate::common::error::RecipeError;
use axum::{http::StatusCode, response::IntoResponse, Json};
use serde_json::json;

/// Axum用のエラーレスポンス型
#[derive(Debug)]
pub struct AppError(pub RecipeError);

impl From<RecipeError> for AppError {
    fn from(err: RecipeError) -> Self {
        AppError(err)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = self.0.status_code();

        // 5xxは内部詳細（接続文字列やSQL断片）を含みうるためログのみに残す
        if status.is_server_error() {
            tracing::error!("Request failed: {}", self.0);
        }

        let payload = json!({
            "detail": self.0.client_message()
        });

        (status, Json(payload)).into_response()
    }
}
