//! レシピAPI
//!
//! レシピのCRUDと、ネストしたタグ・食材の紐付け

use crate::api::error::AppError;
use crate::api::extract::JsonBody;
use crate::auth::middleware::AuthUser;
use crate::common::error::RecipeError;
use crate::db::models::{Ingredient, Recipe, Tag};
use crate::db::recipes::NewRecipe;
use crate::AppState;
use axum::{
    extract::{Path, State},
    http::StatusCode,
    Extension, Json,
};
use serde::{Deserialize, Serialize};
use sqlx::SqlitePool;

/// 価格の最大桁数（小数点を除く）
const PRICE_MAX_DIGITS: usize = 5;
/// 価格の小数部の最大桁数
const PRICE_DECIMAL_PLACES: usize = 2;

/// ネストしたタグ・食材の指定
#[derive(Debug, Deserialize)]
pub struct NestedName {
    /// 名前
    pub name: String,
}

/// 価格フィールド（JSON数値と文字列の両方を受け付ける）
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum PriceField {
    /// 文字列表現（例: "5.50"）
    Text(String),
    /// 数値表現
    Number(f64),
}

impl PriceField {
    fn into_string(self) -> String {
        match self {
            PriceField::Text(s) => s,
            PriceField::Number(n) => format!("{:.2}", n),
        }
    }
}

/// レシピ作成リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateRecipeRequest {
    /// タイトル
    pub title: String,
    /// 調理時間（分）
    pub time_minutes: i64,
    /// 価格
    pub price: PriceField,
    /// 説明
    #[serde(default)]
    pub description: String,
    /// 参考リンク
    #[serde(default)]
    pub link: String,
    /// タグ（名前で指定、なければ作成）
    #[serde(default)]
    pub tags: Vec<NestedName>,
    /// 食材（名前で指定、なければ作成）
    #[serde(default)]
    pub ingredients: Vec<NestedName>,
}

/// レシピ部分更新リクエスト
#[derive(Debug, Deserialize)]
pub struct UpdateRecipeRequest {
    /// タイトル
    pub title: Option<String>,
    /// 調理時間（分）
    pub time_minutes: Option<i64>,
    /// 価格
    pub price: Option<PriceField>,
    /// 説明
    pub description: Option<String>,
    /// 参考リンク
    pub link: Option<String>,
    /// タグ（指定された場合は集合ごと置き換え）
    pub tags: Option<Vec<NestedName>>,
    /// 食材（指定された場合は集合ごと置き換え）
    pub ingredients: Option<Vec<NestedName>>,
}

/// 一覧用レシピレスポンス（説明を含まない）
#[derive(Debug, Serialize)]
pub struct RecipeListItem {
    /// レシピID
    pub id: i64,
    /// タイトル
    pub title: String,
    /// 調理時間（分）
    pub time_minutes: i64,
    /// 価格（10進文字列）
    pub price: String,
    /// 参考リンク
    pub link: String,
    /// タグ
    pub tags: Vec<Tag>,
    /// 食材
    pub ingredients: Vec<Ingredient>,
}

/// 詳細用レシピレスポンス
#[derive(Debug, Serialize)]
pub struct RecipeDetail {
    /// レシピID
    pub id: i64,
    /// タイトル
    pub title: String,
    /// 調理時間（分）
    pub time_minutes: i64,
    /// 価格（10進文字列）
    pub price: String,
    /// 説明
    pub description: String,
    /// 参考リンク
    pub link: String,
    /// タグ
    pub tags: Vec<Tag>,
    /// 食材
    pub ingredients: Vec<Ingredient>,
}

/// 価格文字列を検証
///
/// 非負の10進数で、数字は合計5桁まで、小数部は2桁までを許可する。
fn validate_price(price: &str) -> Result<(), RecipeError> {
    let invalid = || RecipeError::Validation("A valid number is required.".to_string());

    let (integer, fraction) = match price.split_once('.') {
        Some((i, f)) => (i, f),
        None => (price, ""),
    };

    if integer.is_empty() && fraction.is_empty() {
        return Err(invalid());
    }
    if !integer.chars().all(|c| c.is_ascii_digit()) || !fraction.chars().all(|c| c.is_ascii_digit())
    {
        return Err(invalid());
    }
    if fraction.len() > PRICE_DECIMAL_PLACES {
        return Err(RecipeError::Validation(format!(
            "Ensure that there are no more than {} decimal places.",
            PRICE_DECIMAL_PLACES
        )));
    }
    if integer.trim_start_matches('0').len() + fraction.len() > PRICE_MAX_DIGITS {
        return Err(RecipeError::Validation(format!(
            "Ensure that there are no more than {} digits in total.",
            PRICE_MAX_DIGITS
        )));
    }
    Ok(())
}

fn validate_fields(title: &str, time_minutes: i64, price: &str) -> Result<(), RecipeError> {
    if title.trim().is_empty() {
        return Err(RecipeError::Validation(
            "title may not be blank".to_string(),
        ));
    }
    if time_minutes < 0 {
        return Err(RecipeError::Validation(
            "time_minutes must not be negative".to_string(),
        ));
    }
    validate_price(price)
}

async fn build_detail(pool: &SqlitePool, recipe: Recipe) -> Result<RecipeDetail, RecipeError> {
    let tags = crate::db::recipes::tags_for_recipe(pool, recipe.id).await?;
    let ingredients = crate::db::recipes::ingredients_for_recipe(pool, recipe.id).await?;
    Ok(RecipeDetail {
        id: recipe.id,
        title: recipe.title,
        time_minutes: recipe.time_minutes,
        price: recipe.price,
        description: recipe.description,
        link: recipe.link,
        tags,
        ingredients,
    })
}

/// タグ・食材の名前リストを解決し、レシピに紐付ける
async fn link_nested(
    pool: &SqlitePool,
    user_id: uuid::Uuid,
    recipe_id: i64,
    tags: Option<&[NestedName]>,
    ingredients: Option<&[NestedName]>,
) -> Result<(), RecipeError> {
    if let Some(tags) = tags {
        let mut tag_ids = Vec::with_capacity(tags.len());
        for nested in tags {
            let tag = crate::db::tags::get_or_create(pool, user_id, &nested.name).await?;
            tag_ids.push(tag.id);
        }
        crate::db::recipes::set_tags(pool, recipe_id, &tag_ids).await?;
    }

    if let Some(ingredients) = ingredients {
        let mut ingredient_ids = Vec::with_capacity(ingredients.len());
        for nested in ingredients {
            let ingredient =
                crate::db::ingredients::get_or_create(pool, user_id, &nested.name).await?;
            ingredient_ids.push(ingredient.id);
        }
        crate::db::recipes::set_ingredients(pool, recipe_id, &ingredient_ids).await?;
    }

    Ok(())
}

fn not_found() -> RecipeError {
    RecipeError::NotFound("Not found.".to_string())
}

/// GET /api/recipe/recipes - 自分のレシピ一覧（新しい順）
pub async fn list_recipes(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
) -> Result<Json<Vec<RecipeListItem>>, AppError> {
    let recipes = crate::db::recipes::list_for_user(&state.db_pool, user.id).await?;

    let mut items = Vec::with_capacity(recipes.len());
    for recipe in recipes {
        let tags = crate::db::recipes::tags_for_recipe(&state.db_pool, recipe.id).await?;
        let ingredients =
            crate::db::recipes::ingredients_for_recipe(&state.db_pool, recipe.id).await?;
        items.push(RecipeListItem {
            id: recipe.id,
            title: recipe.title,
            time_minutes: recipe.time_minutes,
            price: recipe.price,
            link: recipe.link,
            tags,
            ingredients,
        });
    }

    Ok(Json(items))
}

/// POST /api/recipe/recipes - レシピ作成
pub async fn create_recipe(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(req): JsonBody<CreateRecipeRequest>,
) -> Result<(StatusCode, Json<RecipeDetail>), AppError> {
    let price = req.price.into_string();
    validate_fields(&req.title, req.time_minutes, &price)?;

    let fields = NewRecipe {
        title: req.title,
        description: req.description,
        time_minutes: req.time_minutes,
        price,
        link: req.link,
    };
    let recipe = crate::db::recipes::create(&state.db_pool, user.id, &fields).await?;

    link_nested(
        &state.db_pool,
        user.id,
        recipe.id,
        Some(&req.tags),
        Some(&req.ingredients),
    )
    .await?;

    let detail = build_detail(&state.db_pool, recipe).await?;
    Ok((StatusCode::CREATED, Json(detail)))
}

/// GET /api/recipe/recipes/:id - レシピ詳細
pub async fn get_recipe(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<Json<RecipeDetail>, AppError> {
    let recipe = crate::db::recipes::find_for_user(&state.db_pool, user.id, id)
        .await?
        .ok_or_else(not_found)?;

    let detail = build_detail(&state.db_pool, recipe).await?;
    Ok(Json(detail))
}

/// PATCH /api/recipe/recipes/:id - レシピ部分更新
pub async fn update_recipe(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
    JsonBody(req): JsonBody<UpdateRecipeRequest>,
) -> Result<Json<RecipeDetail>, AppError> {
    let current = crate::db::recipes::find_for_user(&state.db_pool, user.id, id)
        .await?
        .ok_or_else(not_found)?;

    let fields = NewRecipe {
        title: req.title.unwrap_or(current.title),
        description: req.description.unwrap_or(current.description),
        time_minutes: req.time_minutes.unwrap_or(current.time_minutes),
        price: req
            .price
            .map(PriceField::into_string)
            .unwrap_or(current.price),
        link: req.link.unwrap_or(current.link),
    };
    validate_fields(&fields.title, fields.time_minutes, &fields.price)?;

    let updated = crate::db::recipes::update(&state.db_pool, user.id, id, &fields)
        .await?
        .ok_or_else(not_found)?;

    link_nested(
        &state.db_pool,
        user.id,
        id,
        req.tags.as_deref(),
        req.ingredients.as_deref(),
    )
    .await?;

    let detail = build_detail(&state.db_pool, updated).await?;
    Ok(Json(detail))
}

/// DELETE /api/recipe/recipes/:id - レシピ削除
pub async fn delete_recipe(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    Path(id): Path<i64>,
) -> Result<StatusCode, AppError> {
    let deleted = crate::db::recipes::delete_for_user(&state.db_pool, user.id, id).await?;
    if !deleted {
        return Err(not_found().into());
    }
    Ok(StatusCode::NO_CONTENT)
}
