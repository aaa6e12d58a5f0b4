// ユーザーCRUD操作

use crate::common::error::RecipeError;
use crate::db::models::User;
use chrono::{DateTime, Utc};
use sqlx::SqlitePool;
use uuid::Uuid;

/// メールアドレスを正規化する
///
/// ドメイン部のみを小文字化する（ローカル部は大文字小文字を区別する
/// メールサーバーが存在するため保持する）。
///
/// # Returns
/// * `Ok(String)` - 正規化済みメールアドレス
/// * `Err(RecipeError)` - 空文字列または`@`を含まない
pub fn normalize_email(email: &str) -> Result<String, RecipeError> {
    let email = email.trim();
    if email.is_empty() {
        return Err(RecipeError::Validation(
            "Users must have an email address".to_string(),
        ));
    }
    let (local, domain) = email
        .rsplit_once('@')
        .filter(|(local, domain)| !local.is_empty() && !domain.is_empty())
        .ok_or_else(|| RecipeError::Validation("Enter a valid email address".to_string()))?;
    Ok(format!("{}@{}", local, domain.to_lowercase()))
}

/// ユーザーを作成
///
/// メールアドレスは正規化してから保存する。
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `email` - メールアドレス
/// * `name` - 表示名
/// * `password_hash` - bcryptハッシュ化されたパスワード
/// * `is_staff` - 管理権限フラグ
/// * `is_superuser` - 全権限フラグ
///
/// # Returns
/// * `Ok(User)` - 作成されたユーザー
/// * `Err(RecipeError)` - 作成失敗（メールアドレス重複など）
pub async fn create(
    pool: &SqlitePool,
    email: &str,
    name: &str,
    password_hash: &str,
    is_staff: bool,
    is_superuser: bool,
) -> Result<User, RecipeError> {
    let id = Uuid::new_v4();
    let email = normalize_email(email)?;
    let created_at = Utc::now();

    sqlx::query(
        "INSERT INTO users (id, email, name, password_hash, is_staff, is_superuser, created_at, last_login)
         VALUES (?, ?, ?, ?, ?, ?, ?, NULL)",
    )
    .bind(id.to_string())
    .bind(&email)
    .bind(name)
    .bind(password_hash)
    .bind(is_staff as i32)
    .bind(is_superuser as i32)
    .bind(created_at.to_rfc3339())
    .execute(pool)
    .await
    .map_err(|e| {
        if e.to_string().contains("UNIQUE constraint failed") {
            RecipeError::Validation("user with this email already exists".to_string())
        } else {
            RecipeError::Database(format!("Failed to create user: {}", e))
        }
    })?;

    Ok(User {
        id,
        email,
        name: name.to_string(),
        password_hash: password_hash.to_string(),
        is_staff,
        is_superuser,
        created_at,
        last_login: None,
    })
}

/// メールアドレスでユーザーを検索
///
/// 検索前にメールアドレスを正規化するため、ドメイン部の大文字小文字は
/// 問わない。
///
/// # Returns
/// * `Ok(Some(User))` - ユーザーが見つかった
/// * `Ok(None)` - ユーザーが見つからなかった
/// * `Err(RecipeError)` - 検索失敗
pub async fn find_by_email(pool: &SqlitePool, email: &str) -> Result<Option<User>, RecipeError> {
    let email = match normalize_email(email) {
        Ok(email) => email,
        Err(_) => return Ok(None),
    };

    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, password_hash, is_staff, is_superuser, created_at, last_login
         FROM users WHERE email = ?",
    )
    .bind(&email)
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find user: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// IDでユーザーを検索
pub async fn find_by_id(pool: &SqlitePool, id: Uuid) -> Result<Option<User>, RecipeError> {
    let row = sqlx::query_as::<_, UserRow>(
        "SELECT id, email, name, password_hash, is_staff, is_superuser, created_at, last_login
         FROM users WHERE id = ?",
    )
    .bind(id.to_string())
    .fetch_optional(pool)
    .await
    .map_err(|e| RecipeError::Database(format!("Failed to find user: {}", e)))?;

    Ok(row.map(|r| r.into_user()))
}

/// ユーザーを更新
///
/// # Arguments
/// * `pool` - データベース接続プール
/// * `id` - ユーザーID
/// * `name` - 新しい表示名（Noneの場合は変更なし）
/// * `password_hash` - 新しいパスワードハッシュ（Noneの場合は変更なし）
///
/// # Returns
/// * `Ok(User)` - 更新されたユーザー
/// * `Err(RecipeError)` - 更新失敗
pub async fn update(
    pool: &SqlitePool,
    id: Uuid,
    name: Option<&str>,
    password_hash: Option<&str>,
) -> Result<User, RecipeError> {
    let current = find_by_id(pool, id)
        .await?
        .ok_or_else(|| RecipeError::NotFound(format!("User not found: {}", id)))?;

    let new_name = name.unwrap_or(&current.name);
    let new_password_hash = password_hash.unwrap_or(&current.password_hash);

    sqlx::query("UPDATE users SET name = ?, password_hash = ? WHERE id = ?")
        .bind(new_name)
        .bind(new_password_hash)
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to update user: {}", e)))?;

    Ok(User {
        name: new_name.to_string(),
        password_hash: new_password_hash.to_string(),
        ..current
    })
}

/// 最終ログイン日時を更新
pub async fn update_last_login(pool: &SqlitePool, id: Uuid) -> Result<(), RecipeError> {
    let now = Utc::now();

    sqlx::query("UPDATE users SET last_login = ? WHERE id = ?")
        .bind(now.to_rfc3339())
        .bind(id.to_string())
        .execute(pool)
        .await
        .map_err(|e| RecipeError::Database(format!("Failed to update last login: {}", e)))?;

    Ok(())
}

// SQLiteからの行取得用の内部型
#[derive(sqlx::FromRow)]
struct UserRow {
    id: String,
    email: String,
    name: String,
    password_hash: String,
    is_staff: i32,
    is_superuser: i32,
    created_at: String,
    last_login: Option<String>,
}

impl UserRow {
    fn into_user(self) -> User {
        let id = Uuid::parse_str(&self.id).unwrap();
        let created_at = DateTime::parse_from_rfc3339(&self.created_at)
            .unwrap()
            .with_timezone(&Utc);
        let last_login = self.last_login.as_ref().and_then(|s| {
            DateTime::parse_from_rfc3339(s)
                .ok()
                .map(|dt| dt.with_timezone(&Utc))
        });

        User {
            id,
            email: self.email,
            name: self.name,
            password_hash: self.password_hash,
            is_staff: self.is_staff != 0,
            is_superuser: self.is_superuser != 0,
            created_at,
            last_login,
        }
    }
}
