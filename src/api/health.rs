//! ヘルスチェックAPI

use crate::api::error::AppError;
use crate::AppState;
use axum::{extract::State, Json};
use serde_json::{json, Value};

/// ヘルスチェック
///
/// データベースへの疎通を確認して`{"status": "ok"}`を返す。
pub async fn health_check(State(state): State<AppState>) -> Result<Json<Value>, AppError> {
    sqlx::query("SELECT 1")
        .execute(&state.db_pool)
        .await
        .map_err(|e| {
            crate::common::error::RecipeError::Database(format!("Health check failed: {}", e))
        })?;

    Ok(Json(json!({ "status": "ok" })))
}
