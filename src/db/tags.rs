// タグCRUD操作

use crate::common::error::RecipeError;
use crate::db::models::Tag;
use sqlx::SqlitePool;
use uuid::Uuid;

/// タグを取得または作成
///
/// レシピ作成・更新時のネストしたタグ指定で使用する。同名タグが
/// 同一ユーザーに既に存在する場合はそれを返す。
///
/// # Returns
/// * `Ok(Tag)` - 既存または新規作成されたタグ
/// * `Err(RecipeError)` - 取得・作成失敗
pub async fn get_or_create(
    pool: &SqlitePool,
    user_id: Uuid,
    name: &str,
) -> Result<Tag, RecipeError> {
    if let Some(existing) = find_by_name(pool, user_id, name).await? {
        return Ok(existing);
    }

    let result = sqlx::query("INSERT INTO tags (user_id, name) VALUES (?, ?)")
        .bind(user_id.to_string())
        .bind(name)
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to create tag: {}", e)))?;

    Ok(Tag {
        id: result.last_insert_rowid(),
        name: name.to_string(),
        user_id,
    })
}

/// ユーザーのタグ一覧を取得（名前の降順）
pub async fn list_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<Vec<Tag>, RecipeError> {
    let rows = sqlx::query_as::<_, TagRow>(
        "SELECT id, user_id, name FROM tags WHERE user_id = ? ORDER BY name DESC",
    )
    .bind(user_id.to_string())
    .fetch_all(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to list tags: {}", e)))?;

    Ok(rows.into_iter().map(|r| r.into_tag()).collect())
}

/// ユーザー所有のタグをIDで検索
pub async fn find_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<Option<Tag>, RecipeError> {
    let row =
        sqlx::query_as::<_, TagRow>("SELECT id, user_id, name FROM tags WHERE id = ? AND user_id = ?")
            .bind(id)
            .bind(user_id.to_string())
            .fetch_optional(pool)
            .await
            .map_err(|e| RecipeError::Database(format!("Failed to find tag: {}", e)))?;

    Ok(row.map(|r| r.into_tag()))
}

/// タグ名を変更
///
/// # Returns
/// * `Ok(Some(Tag))` - 更新後のタグ
/// * `Ok(None)` - 該当タグなし（他ユーザー所有を含む）
pub async fn update_name(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
    name: &str,
) -> Result<Option<Tag>, RecipeError> {
    let result = sqlx::query("UPDATE tags SET name = ? WHERE id = ? AND user_id = ?")
        .bind(name)
        .bind(id)
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to update tag: {}", e)))?;

    if result.rows_affected() == 0 {
        return Ok(None);
    }

    Ok(Some(Tag {
        id,
        name: name.to_string(),
        user_id,
    }))
}

/// タグを削除
///
/// # Returns
/// * `Ok(true)` - 削除した
/// * `Ok(false)` - 該当タグなし（他ユーザー所有を含む）
pub async fn delete_for_user(
    pool: &SqlitePool,
    user_id: Uuid,
    id: i64,
) -> Result<bool, RecipeError> {
    let result = sqlx::query("DELETE FROM tags WHERE id = ? AND user_id = ?")
        .bind(id)
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to delete tag: {}", e)))?;

    Ok(result.rows_affected() > 0)
}

async fn find_by_name(
    pool: &SqlitePool,
    user_id: Uuid,
    name: &str,
) -> Result<Option<Tag>, RecipeError> {
    let row = sqlx::query_as::<_, TagRow>(
        "SELECT id, user_id, name FROM tags WHERE user_id = ? AND name = ?",
    )
    .bind(user_id.to_string())
    .bind(name)
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find tag: {}", e)))?;

    Ok(row.map(|r| r.into_tag()))
}

#[derive(sqlx::FromRow)]
struct TagRow {
    id: i64,
    user_id: String,
    name: String,
}

impl TagRow {
    fn into_tag(self) -> Tag {
        Tag {
            id: self.id,
            name: self.name,
            user_id: Uuid::parse_str(&self.user_id).unwrap(),
        }
    }
}
