//! リクエスト抽出ヘルパー

use crate::api::error::AppError;
use crate::common::error::RecipeError;
use axum::extract::rejection::JsonRejection;
use axum::extract::{FromRequest, Request};

/// JSONリクエストボディ
///
/// axum標準の`Json`は必須フィールド欠落や構文エラーを422で返すが、
/// このAPIはリクエスト内容の不備をすべて400に揃える。抽出失敗を
/// バリデーションエラーとして包み直す。
pub struct JsonBody<T>(pub T);

#[axum::async_trait]
impl<S, T> FromRequest<S> for JsonBody<T>
where
    axum::Json<T>: FromRequest<S, Rejection = JsonRejection>,
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        match axum::Json::<T>::from_request(req, state).await {
            Ok(axum::Json(value)) => Ok(JsonBody(value)),
            Err(rejection) => Err(RecipeError::Validation(rejection.body_text()).into()),
        }
    }
}
