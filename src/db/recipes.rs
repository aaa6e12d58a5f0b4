// レシピCRUD操作

use crate::common::error::RecipeError;
use crate::db::models::{Ingredient, Recipe, Tag};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// レシピ作成・更新時のフィールド一式
#[derive(Debug, Clone)]
pub struct NewRecipe {
    /// タイトル
    pub title: String,
    /// 説明
    pub description: String,
    /// 調理時間（分）
    pub time_minutes: i64,
    /// 価格（10進文字列）
    pub price: String,
    /// 参考リンク
    pub link: String,
}

/// レシピを作成
///
/// # Returns
/// * `Ok(Recipe)` - 作成されたレシピ
/// * `Err(RecipeError)` - 作成失敗
pub async fn create(
    pool: &SqlitePool,
    user_id: Uuid,
    new_recipe: &NewRecipe,
) -> Result<Recipe, RecipeError> {
    let created_at = Utc::now();

    let result = sqlx::query(
        "INSERT INTO recipes (user_id, title, description, time_minutes, price, link, created_at)
         VALUES (?, ?, ?, ?, ?, ?, ?)",
    )
    .bind(user_id.to_string())
    .bind(&new_recipe.title)
    .bind(&new_recipe.description)
    .bind(new_recipe.time_minutes)
    .bind(&new_recipe.price)
    .bind(&new_recipe.link)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to create recipe: {}", e)))?;

    Ok(Recipe {
        id: result.last_insert_rowid(),
        user_id,
        title: new_recipe.title.clone(),
        description: new_recipe.description.clone(),
        time_minutes: new_recipe.time_minutes,
        price: new_recipe.price.clone(),
        link: new_recipe.link.clone(),
        created_at,
    })
}

/// ユーザーのレシピ一覧を取得（新しい順）
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Recipe>, RecipeError> {
    let rows = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, user_id, title, description, time_minutes, price, link, created_at
         FROM recipes WHERE user_id = ? ORDER BY id DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to list recipes: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_recipe()).collect())
}

/// ユーザー所有のレシピをIDで検索
///
/// 他ユーザーのレシピは存在しないものとして扱う。
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<Option<Recipe>, RecipeError> {
    let row = sqlx::query_as::<_, RecipeRow>(
        "SELECT id, user_id, title, description, time_minutes, price, link, created_at
         FROM recipes WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find recipe: {}", e)))?;

    Ok(row.map(|r| r.into_recipe()))
}

/// レシピを更新
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `user_id` - 所有ユーザーID
/// * `id` - レシピID
/// * `fields` - 更新後のフィールド一式（部分更新はハンドラー側でマージ済み）
///
/// # Returns
/// * `Ok(Some(Recipe))` - 更新後のレシピ
/// * `Ok(None)` - 該当レシピなし
pub async fn update(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
    fields: &NewRecipe,
) -> Result<Option<Recipe>, RecipeError> {
    let result = sqlx::query(
        "UPDATE recipes SET title = ?, description = ?, time_minutes = ?, price = ?, link = ?
         WHERE id = ? AND user_id = ?",
    )
    .bind(&fields.title)
    .bind(&fields.description)
    .bind(fields.time_minutes)
    .bind(&fields.price)
    .bind(&fields.link)
    .bind(id)
    .bind(user_id.to_string())
    .execute(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to update recipe: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    find_for_user(pool, user_id, id).await
}

/// レシピを削除
///
/// # Returns
/// * `Ok(true)` - 削除した（関連リンクはON DELETE CASCADEで消える）
/// * `Ok(false)` - 該当レシピなし
pub async fn delete_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<bool, RecipeError> {
    let result = sqlx::query("DELETE FROM recipes WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to delete recipe: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

/// レシピに付くタグ集合を置き換える
pub async fn set_tags(
    pool: &SqlitePool,
    recipe_id: i64,
    tag_ids: &[i64],
) -> Result<(), RecipeError> {
    sqlx::query("DELETE FROM recipe_tags WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to clear recipe tags: {}", e)))?;

    for tag_id in tag_ids {
        sqlx::query("INSERT OR IGNORE INTO recipe_tags (recipe_id, tag_id) VALUES (?, ?)")
            .bind(recipe_id)
            .bind(tag_id)
            .execute(pool)
            .await
            .map_err(|e| RecipeError::Database(format!("Failed to link tag: {}", e)))?;
    }

    Ok(())
}

/// レシピに付く食材集合を置き換える
pub async fn set_ingredients(
    pool: &SqlitePool,
    recipe_id: i64,
    ingredient_ids: &[i64],
) -> Result<(), RecipeError> {
    sqlx::query("DELETE FROM recipe_ingredients WHERE recipe_id = ?")
        .bind(recipe_id)
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to clear recipe ingredients: {}", e)))?;

    for ingredient_id in ingredient_ids {
        sqlx::query(
            "INSERT OR IGNORE INTO recipe_ingredients (recipe_id, ingredient_id) VALUES (?, ?)",
        )
        .bind(recipe_id)
        .bind(ingredient_id)
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to link ingredient: {}", e)))?;
    }

    Ok(())
}

/// レシピに付くタグ一覧を取得
pub async fn tags_for_recipe(pool: &SqlitePool, recipe_id: i64) -> Result<Vec<Tag>, RecipeError> {
    let rows = sqlx::query_as::<_, LinkedTagRow>(
        "SELECT t.id, t.user_id, t.name FROM tags t
         JOIN recipe_tags rt ON rt.tag_id = t.id
         WHERE rt.recipe_id = ? ORDER BY t.name DESC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to list recipe tags: {}", e)))?;

    Ok(rows
        .into_iter()
        .map(|r| Tag {
            id: r.id,
            name: r.name,
            user_id: Uuid::parse_str(&r.user_id).unwrap(),
        })
        .collect())
}

/// レシピに付く食材一覧を取得
pub async fn ingredients_for_recipe(
    pool: &SqlitePool,
    recipe_id: i64,
) -> Result<Vec<Ingredient>, RecipeError> {
    let rows = sqlx::query_as::<_, LinkedTagRow>(
        "SELECT i.id, i.user_id, i.name FROM ingredients i
         JOIN recipe_ingredients ri ON ri.ingredient_id = i.id
         WHERE ri.recipe_id = ? ORDER BY i.name DESC",
    )
    .bind(recipe_id)
    .fetch_all(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to list recipe ingredients: {}", e)))?;

    Ok(rows
        .into_iter()
        .map(|r| Ingredient {
            id: r.id,
            name: r.name,
            user_id: Uuid::parse_str(&r.user_id).unwrap(),
        })
        .collect())
}

#[derive(sqlx::FromRow)]
struct RecipeRow {
    id: i64,
    user_id: String,
    title: String,
    description: String,
    time_minutes: i64,
    price: String,
    link: String,
    created_at: String,
}

impl RecipeRow {
    fn into_recipe(self) -> Recipe {
        Recipe {
            id: self.id,
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
            title: self.title,
            description: self.description,
            time_minutes: self.time_minutes,
            price: self.price,
            link: self.link,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .unwrap()
                .with_timezone(&Utc),
        }
    }
}

#[derive(sqlx::FromRow)]
struct LinkedTagRow {
    id: i64,
    user_id: String,
    name: String,
}
