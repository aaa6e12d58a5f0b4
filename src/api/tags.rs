//! タグAPI

use crate::api::error::AppError;
use crate::api::extract::JsonBody;
use crate::auth::middleware::AuthUser;
use crate::common::error::RecipeError;
use crate::db::models::Tag;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

/// タグ更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateTagRequest {
    /// 新しいタグ名
    pub name: String,
}

fn not_found() -> RecipeError {
    RecipeError::NotFound("Not found.".to_string())
}

/// GET /api/recipe/tags - 自分のタグ一覧（名前の降順）
pub async fn list_tags(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Vec<Tag>>, AppError> {
    let tags = crate::db::tags::list_for_user(&state.db_pool, user.id).await?;
    Ok(Json(tags))
}

/// PATCH /api/recipe/tags/:id - タグ名変更
pub async fn update_tag(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateTagRequest>,
) -> Result<Json<Tag>, AppError> {
    if req.name.trim().is_empty() {
        return Err(RecipeError::Validation("name may not be blank".to_string()).into());
    }

    let tag = crate::db::tags::update_name(&state.db_pool, user.id, id, &req.name)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(tag))
}

/// DELETE /api/recipe/tags/:id - タグ削除
pub async fn delete_tag(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = crate::db::tags::delete_for_user(&state.db_pool, user.id, id).await?;
    if !deleted {
        return Err(not_found().into());
    }
    Ok(StatusCode::NO_CONTENT)
}
