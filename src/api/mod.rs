//! REST APIハンドラー
//!
//! ルーティング定義とエンドポイント実装

use crate::AppState;
use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// エラーレスポンス型
pub mod error;

/// リクエスト抽出ヘルパー
pub mod extract;

/// ヘルスチェックAPI
pub mod health;

/// ユーザー管理API（登録・トークン発行・プロフィール）
pub mod users;

/// レシピAPI
pub mod recipes;

/// タグAPI
pub mod tags;

/// 食材API
pub mod ingredients;

/// アプリケーションのルーターを構築
///
/// 認証不要の公開ルートと、トークン認証ミドルウェアを通る保護ルートの
/// 2層で構成する。
pub fn create_app(state: AppState) -> Router {
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/api/user/create", post(users::create_user))
        .route("/api/user/token", post(users::create_token));

    let protected_routes = Router::new()
        .route("/api/user/me", get(users::me).patch(users::update_me))
        .route(
            "/api/recipe/recipes",
            get(recipes::list_recipes).post(recipes::create_recipe),
        )
        .route(
            "/api/recipe/recipes/:id",
            get(recipes::get_recipe)
                .patch(recipes::update_recipe)
                .delete(recipes::delete_recipe),
        )
        .route("/api/recipe/tags", get(tags::list_tags))
        .route(
            "/api/recipe/tags/:id",
            axum::routing::patch(tags::update_tag).delete(tags::delete_tag),
        )
        .route("/api/recipe/ingredients", get(ingredients::list_ingredients))
        .route(
            "/api/recipe/ingredients/:id",
            axum::routing::patch(ingredients::update_ingredient)
                .delete(ingredients::delete_ingredient),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            crate::auth::middleware::require_token,
        ));

    Router::new()
        .merge(public_routes)
        .merge(protected_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
