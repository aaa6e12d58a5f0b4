//! 食材API

use crate::api::error::AppError;
use crate::api::extract::JsonBody;
use crate::auth::middleware::AuthUser;
use crate::common::error::RecipeError;
use crate::db::models::Ingredient;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::Deserialize;

/// 食材更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateIngredientRequest {
    /// 新しい食材名
    pub name: String,
}

fn not_found() -> RecipeError {
    RecipeError::NotFound("Not found.".to_string())
}

/// GET /api/recipe/ingredients - 自分の食材一覧（名前の降順）
pub async fn list_ingredients(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Vec<Ingredient>>, AppError> {
    let ingredients = crate::db::ingredients::list_for_user(&state.db_pool, user.id).await?;
    Ok(Json(ingredients))
}

/// PATCH /api/recipe/ingredients/:id - 食材名変更
pub async fn update_ingredient(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateIngredientRequest>,
) -> Result<Json<Ingredient>, AppError> {
    if req.name.trim().is_empty() {
        return Err(RecipeError::Validation("name may not be blank".to_string()).into());
    }

    let ingredient = crate::db::ingredients::update_name(&state.db_pool, user.id, id, &req.name)
        .await?
        .ok_or_else(not_found)?;

    Ok(Json(ingredient))
}

/// DELETE /api/recipe/ingredients/:id - 食材削除
pub async fn delete_ingredient(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = crate::db::ingredients::delete_for_user(&state.db_pool, user.id, id).await?;
    if !deleted {
        return Err(not_found().into());
    }
    Ok(StatusCode::NO_CONTENT)
}
