// トークン認証ミドルウェア

use crate::db::models::User;
use crate::AppState;
use axum::{
    extract::{Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;

/// 認証済みユーザー
///
/// ミドルウェアがリクエスト拡張に挿入し、ハンドラーが
/// `Extension<AuthUser>`で取り出す。
#[derive(Debug, Clone)]
pub struct AuthUser(pub User);

/// `Authorization: Token <token>`ヘッダーから平文トークンを取り出す
fn extract_token(headers: &HeaderMap) -> Option<&str> {
    let auth_header = headers.get(header::AUTHORIZATION)?.to_str().ok()?;
    let token = auth_header.strip_prefix(&format!("{} ", crate::auth::TOKEN_SCHEME))?;
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn unauthorized(message: &str) -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({ "detail": message })),
    )
        .into_response()
}

/// トークン認証を要求するミドルウェア
///
/// ヘッダーのトークンをハッシュ化してDBと照合し、一致したユーザーを
/// リクエスト拡張に挿入する。失敗時は401を返す。
pub async fn require_token(
    State(state): State<AppState>,
    mut request: Request,
    next: Next,
) -> Response {
    let Some(token) = extract_token(request.headers()) else {
        return unauthorized("Authentication credentials were not provided.");
    };

    let token_hash = crate::auth::hash_token(token);
    match crate::db::tokens::find_user_by_hash(&state.db_pool, &token_hash).await {
        Ok(Some(user)) => {
            request.extensions_mut().insert(AuthUser(user));
            next.run(request).await
        }
        Ok(None) => unauthorized("Invalid token."),
        Err(e) => {
            tracing::error!("Token lookup failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "detail": "Internal server error" })),
            )
                .into_response()
        }
    }
}
