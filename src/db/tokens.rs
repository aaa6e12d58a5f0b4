// 認証トークンCRUD操作

use crate::common::error::RecipeError;
use crate::db::models::{AuthToken, User};
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// 認証トークンを発行
///
/// 平文トークンは呼び出し側で生成し、ここにはSHA-256ハッシュのみを渡す。
/// 平文はレスポンスで一度だけクライアントに返り、DBには残らない。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `token_hash` - トークンのSHA-256ハッシュ（16進文字列）
/// * `token_prefix` - 平文トークンの先頭8文字（一覧表示用）
/// * `user_id` - 発行先ユーザーID
///
/// # Returns
/// * `Ok(AuthToken)` - 発行されたトークンレコード
/// * `Err(RecipeError)` - 発行失敗
pub async fn create(
    pool: &SqlitePool,
    token_hash: &str,
    token_prefix: &str,
    user_id: Uuid,
) -> Result<AuthToken, RecipeError> {
    let id = Uuid::new_v4();
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO auth_tokens (id, token_hash, token_prefix, user_id, created_at)
         VALUES (?, ?, ?, ?, ?)",
    )
    .bind(id.to_string())
    .bind(token_hash)
    .bind(token_prefix)
    .bind(user_id.to_string())
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to create auth token: {}", e)))?;

    Ok(AuthToken {
        id,
        token_hash: token_hash.to_string(),
        token_prefix: token_prefix.to_string(),
        user_id,
        created_at,
    })
}

/// トークンハッシュから所有ユーザーを検索
///
/// 認証ミドルウェアの本体。1クエリでトークンとユーザーを結合する。
///
/// # Returns
/// * `Ok(Some(User))` - 有効なトークン
/// * `Ok(None)` - 該当トークンなし
/// * `Err(RecipeError)` - 検索失敗
pub async fn find_user_by_hash(
    pool: &SqlitePool,
    token_hash: &str,
) -> Result<Option<User>, RecipeError> {
    let row = sqlx::query_as::<_, TokenUserRow>(
        "SELECT u.id, u.email, u.name, u.password_hash, u.is_staff, u.is_superuser,
                u.created_at, u.last_login
         FROM auth_tokens t
         JOIN users u ON u.id = t.user_id
         WHERE t.token_hash = ?",
    )
    .bind(token_hash)
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to look up auth token: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// ユーザーのトークンをすべて失効させる
pub async fn delete_for_user(pool: &SqlitePool, user_id: Uuid) -> Result<u64, RecipeError> {
    let result = sqlx::query("DELETE FROM auth_tokens WHERE user_id = ?")
        .bind(user_id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to delete auth tokens: {}", e)))?;

    Ok(result.rows_affected())
}

#[derive(sqlx::FromRow)]
struct TokenUserRow {
    id: String,
    email: String,
    name: String,
    password_hash: String,
    is_staff: i32,
    is_superuser: i32,
    created_at: String,
    last_login: Option<String>,
}

impl TokenUserRow {
    fn into_user(self) -> User {
        User {
            id: Uuid::parse_str(&self.id).unwrap(),
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            is_staff: self.is_staff != 0,
            is_superuser: self.is_superuser != 0,
            created_at: DateTime::parse_from_rfc3339(&self.created_at)
                .unwrap()
                .with_timezone(&Utc),
            last_login: self.last_login.as_ref().and_then(|s| {
                DateTime::parse_from_rfc3339(s)
                    .ok()
                    .map(|dt| dt.with_timezone(&Utc))
            }),
        }
    }
}
