// 食材CRUD操作

use crate::common::error::RecipeError;
use crate::db::models::Ingredient;
use sqlx::SqlitePool;
use uuid::Uuid;

/// 食材を取得または作成
///
/// レシピ作成・更新時のネストした食材指定で使用する。
pub async fn get_or_create(
    pool: &SqlitePool,
    user_id: Uuid,
    name: &str,
) -> Result<Ingredient, RecipeError> {
    if let Some(existing) = find_by_name(pool, user_id, name).await? {
        return Ok(existing);
    }

    let result = sqlx::query("INSERT INTO ingredients (user_id, name) VALUES (?, ?)")
        .bind(user_id.to_string())
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to create ingredient: {}", e)))?;

    Ok(Ingredient {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        user_id,
    })
}

/// ユーザーの食材一覧を取得（名前の降順）
pub async fn list_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
) -> Result<Vec<Ingredient>, RecipeError> {
    let rows = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, user_id, name FROM ingredients WHERE user_id = ? ORDER BY name DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to list ingredients: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_ingredient()).collect())
}

/// ユーザー所有の食材をIDで検索
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<Option<Ingredient>, RecipeError> {
    let row = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, user_id, name FROM ingredients WHERE id = ? AND user_id = ?",
    )
    .bind(id)
    .bind(user_id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find ingredient: {}", e)))?;

    Ok(row.map(|r| r.into_ingredient()))
}

/// 食材名を変更
///
/// # Returns
/// * `Ok(Some(Ingredient))` - 更新後の食材
/// * `Ok(None)` - 該当食材なし（他ユーザー所有を含む）
pub async fn update_name(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
    name: &str,
) -> Result<Option<Ingredient>, RecipeError> {
    let result = sqlx::query("UPDATE ingredients SET name = ? WHERE id = ? AND user_id = ?")
        .bind(name)
        .bind(id)
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to update ingredient: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Ingredient {
        id,
        name: name.to_string(),
        user_id,
    }))
}

/// 食材を削除
pub async fn delete_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<bool, RecipeError> {
    let result = sqlx::query("DELETE FROM ingredients WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to delete ingredient: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

async fn find_by_name(
    pool: &SqlitePool,
    user_id: Uuid,
    name: &str,
) -> Result<Option<Ingredient>, RecipeError> {
    let row = sqlx::query_as::<_, IngredientRow>(
        "SELECT id, user_id, name FROM ingredients WHERE user_id = ? AND name = ?",
    )
    .bind(user_id.to_string())
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find ingredient: {}", e)))?;

    Ok(row.map(|r| r.into_ingredient()))
}

#[derive(sqlx::FromRow)]
struct IngredientRow {
    id: i64,
    user_id: String,
    name: String,
}

impl IngredientRow {
    fn into_ingredient(self) -> Ingredient {
        Ingredient {
            id: self.id,
            name: self.name,
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
        }
    }
}
