//! ヘルスチェックAPI Contract Tests
//!
//! GET /health

use crate::support::app::{create_test_app, send};
use axum::http::StatusCode;

/// ヘルスチェックは認証不要で200を返す
#[tokio::test]
async fn test_health_check_returns_ok() {
    let (app, _db_pool) = create_test_app().await;

    let (status, body) = send(&app, "GET", "/health", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
