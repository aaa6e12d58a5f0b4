//! ユーザー管理API
//!
//! ユーザー登録、トークン発行、プロフィール取得・更新

use crate::api::error::AppError;
use crate::api::extract::JsonBody;
use crate::auth::middleware::AuthUser;
use crate::common::error::RecipeError;
use crate::AppState;
use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::{Deserialize, Serialize};

/// パスワードの最小文字数
const PASSWORD_MIN_LENGTH: usize = 5;

/// ユーザー登録リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateUserRequest {
    /// メールアドレス
    pub email: String,
    /// 表示名
    #[serde(default)]
    pub name: String,
    /// パスワード（平文、保存前にハッシュ化）
    pub password: String,
}

/// ユーザープロフィール（パスワードは含めない）
#[derive(Debug, Serialize)]
pub struct UserResponse {
    /// メールアドレス
    pub email: String,
    /// 表示名
    pub name: String,
}

/// トークン発行リクエスト
#[derive(Debug, Deserialize)]
pub struct CreateTokenRequest {
    /// メールアドレス
    #[serde(default)]
    pub email: String,
    /// パスワード
    #[serde(default)]
    pub password: String,
}

/// トークン発行レスポンス
#[derive(Debug, Serialize)]
pub struct TokenResponse {
    /// 平文トークン（この一度だけ返す）
    pub token: String,
}

/// プロフィール更新リクエスト（部分更新）
#[derive(Debug, Deserialize)]
pub struct UpdateMeRequest {
    /// 新しい表示名
    pub name: Option<String>,
    /// 新しいパスワード
    pub password: Option<String>,
}

fn validate_password(password: &str) -> Result<(), RecipeError> {
    if password.chars().count() < PASSWORD_MIN_LENGTH {
        return Err(RecipeError::Validation(format!(
            "Ensure this field has at least {} characters.",
            PASSWORD_MIN_LENGTH
        )));
    }
    Ok(())
}

/// POST /api/user/create - ユーザー登録
///
/// パスワードが短すぎる、またはメールアドレスが不正・重複の場合は
/// 400を返し、ユーザーは作成しない。
pub async fn create_user(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateUserRequest>,
) -> Result<(StatusCode, Json<UserResponse>), AppError> {
    // メールアドレスの検証を先に行い、無効なら何も保存しない
    crate::db::users::normalize_email(&req.email)?;
    validate_password(&req.password)?;

    let password_hash = crate::auth::password::hash_password(&req.password)?;
    let user = crate::db::users::create(
        &state.db_pool,
        &req.email,
        &req.name,
        &password_hash,
        false,
        false,
    )
    .await?;

    Ok((
        StatusCode::CREATED,
        Json(UserResponse {
            email: user.email,
            name: user.name,
        }),
    ))
}

/// POST /api/user/token - トークン発行
///
/// 資格情報が不正な場合は400を返す（401ではない。未認証ではなく
/// リクエスト内容の不備として扱う）。
pub async fn create_token(
    State(state): State<AppState>,
    JsonBody(req): JsonBody<CreateTokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let invalid = || {
        RecipeError::Validation("Unable to authenticate with provided credentials".to_string())
    };

    if req.email.is_empty() || req.password.is_empty() {
        return Err(invalid().into());
    }

    let user = crate::db::users::find_by_email(&state.db_pool, &req.email)
        .await?
        .ok_or_else(invalid)?;

    if !crate::auth::password::verify_password(&req.password, &user.password_hash)? {
        return Err(invalid().into());
    }

    let plaintext = crate::auth::generate_token(crate::auth::TOKEN_LENGTH);
    let token_hash = crate::auth::hash_token(&plaintext);
    let token_prefix: String = plaintext.chars().take(8).collect();
    crate::db::tokens::create(&state.db_pool, &token_hash, &token_prefix, user.id).await?;
    crate::db::users::update_last_login(&state.db_pool, user.id).await?;

    Ok(Json(TokenResponse { token: plaintext }))
}

/// GET /api/user/me - 認証済みユーザーのプロフィール取得
pub async fn me(Extension(AuthUser(user)): Extension<AuthUser>) -> Json<UserResponse> {
    Json(UserResponse {
        email: user.email,
        name: user.name,
    })
}

/// PATCH /api/user/me - プロフィール部分更新
pub async fn update_me(
    State(state): State<AppState>,
    Extension(AuthUser(user)): Extension<AuthUser>,
    JsonBody(req): JsonBody<UpdateMeRequest>,
) -> Result<Json<UserResponse>, AppError> {
    let password_hash = match req.password.as_deref() {
        Some(password) => {
            validate_password(password)?;
            Some(crate::auth::password::hash_password(password)?)
        }
        None => None,
    };

    let updated = crate::db::users::update(
        &state.db_pool,
        user.id,
        req.name.as_deref(),
        password_hash.as_deref(),
    )
    .await?;

    Ok(Json(UserResponse {
        email: updated.email,
        name: updated.name,
    }))
}
