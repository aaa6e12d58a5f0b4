//! 食材API Contract Tests
//!
//! GET /api/recipe/ingredients, PATCH/DELETE /api/recipe/ingredients/:id

use crate::support::app::{create_test_app, register_and_token, send, send_json};
use axum::http::StatusCode;
use serde_json::json;

/// 食材付きレシピを1件作成（食材作成の近道）
async fn create_recipe_with_ingredients(app: &axum::Router, token: &str, ingredients: &[&str]) {
    let ingredients: Vec<_> = ingredients
        .iter()
        .map(|name| json!({ "name": name }))
        .collect();
    let (status, _) = send_json(
        app,
        "POST",
        "/api/recipe/recipes",
        Some(token),
        json!({
            "title": "Sample",
            "time_minutes": 10,
            "price": "5.00",
            "ingredients": ingredients
        }),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
}

/// 未認証は401
#[tokio::test]
async fn test_ingredients_require_auth() {
    let (app, _db_pool) = create_test_app().await;

    let (status, _) = send(&app, "GET", "/api/recipe/ingredients", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// 食材一覧は名前の降順
#[tokio::test]
async fn test_list_ingredients_ordered_by_name_descending() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "ing@example.cz", "testpass123").await;
    create_recipe_with_ingredients(&app, &token, &["Banana", "Kale"]).await;

    let (status, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let names: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap())
        .collect();
    assert_eq!(names, ["Kale", "Banana"]);
}

/// 他ユーザーの食材は一覧に含まれない
#[tokio::test]
async fn test_list_ingredients_limited_to_user() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "mine@example.cz", "testpass123").await;
    let other_token = register_and_token(&app, "theirs@example.cz", "testpass123").await;

    create_recipe_with_ingredients(&app, &other_token, &["Vanilla"]).await;
    create_recipe_with_ingredients(&app, &token, &["Chili"]).await;

    let (status, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let ingredients = body.as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["name"], "Chili");
}

/// 食材名変更
#[tokio::test]
async fn test_update_ingredient() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "upd@example.cz", "testpass123").await;
    create_recipe_with_ingredients(&app, &token, &["Peanut"]).await;

    let (_, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&token)).await;
    let id = body[0]["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipe/ingredients/{}", id),
        Some(&token),
        json!({ "name": "Cabbage" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Cabbage");
}

/// 食材削除は204
#[tokio::test]
async fn test_delete_ingredient() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "del@example.cz", "testpass123").await;
    create_recipe_with_ingredients(&app, &token, &["Tomato"]).await;

    let (_, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&token)).await;
    let id = body[0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/recipe/ingredients/{}", id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&token)).await;
    assert!(body.as_array().unwrap().is_empty());
}

/// 他ユーザーの食材削除は404
#[tokio::test]
async fn test_delete_other_users_ingredient_not_found() {
    let (app, _db_pool) = create_test_app().await;
    let owner_token = register_and_token(&app, "owner@example.cz", "testpass123").await;
    let other_token = register_and_token(&app, "other@example.cz", "testpass123").await;
    create_recipe_with_ingredients(&app, &owner_token, &["Salt"]).await;

    let (_, body) = send(&app, "GET", "/api/recipe/ingredients", Some(&owner_token)).await;
    let id = body[0]["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/recipe/ingredients/{}", id),
        Some(&other_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}
