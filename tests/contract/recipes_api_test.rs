//! レシピAPI Contract Tests
//!
//! GET/POST /api/recipe/recipes, GET/PATCH/DELETE /api/recipe/recipes/:id

use crate::support::app::{create_test_app, register_and_token, send, send_json};
use axum::http::StatusCode;
use serde_json::json;

fn sample_payload() -> serde_json::Value {
    json!({
        "title": "Sample recipe",
        "time_minutes": 22,
        "price": "5.25",
        "description": "Sample description",
        "link": "http://example.com/recipe.pdf"
    })
}

/// 未認証は401
#[tokio::test]
async fn test_recipes_require_auth() {
    let (app, _db_pool) = create_test_app().await;

    let (status, _) = send(&app, "GET", "/api/recipe/recipes", None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

/// レシピ作成は201で詳細を返す
#[tokio::test]
async fn test_create_recipe() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "rec@example.cz", "testpass123").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["title"], "Sample recipe");
    assert_eq!(body["time_minutes"], 22);
    assert_eq!(body["price"], "5.25");
    assert_eq!(body["description"], "Sample description");
    assert!(body["id"].is_i64());
}

/// 数値の価格も受け付けて文字列で返す
#[tokio::test]
async fn test_create_recipe_numeric_price() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "num@example.cz", "testpass123").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({ "title": "Curry", "time_minutes": 30, "price": 5.25 }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["price"], "5.25");
}

/// 一覧は自分のレシピのみ、新しい順
#[tokio::test]
async fn test_list_recipes_limited_to_user_newest_first() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "mine@example.cz", "testpass123").await;
    let other_token = register_and_token(&app, "theirs@example.cz", "testpass123").await;

    let (_, first) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;
    let (_, second) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;
    send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&other_token),
        sample_payload(),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/recipe/recipes", Some(&token)).await;

    assert_eq!(status, StatusCode::OK);
    let recipes = body.as_array().unwrap();
    assert_eq!(recipes.len(), 2);
    assert_eq!(recipes[0]["id"], second["id"]);
    assert_eq!(recipes[1]["id"], first["id"]);
}

/// 新しいタグ・食材はネスト指定で作成される
#[tokio::test]
async fn test_create_recipe_with_new_tags_and_ingredients() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "nest@example.cz", "testpass123").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({
            "title": "Thai Prawn Curry",
            "time_minutes": 30,
            "price": "2.50",
            "tags": [{ "name": "Thai" }, { "name": "Dinner" }],
            "ingredients": [{ "name": "Prawns" }, { "name": "Ginger" }]
        }),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["tags"].as_array().unwrap().len(), 2);
    assert_eq!(body["ingredients"].as_array().unwrap().len(), 2);
}

/// 既存タグはネスト指定で再利用され、重複作成されない
#[tokio::test]
async fn test_create_recipe_with_existing_tag() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "reuse@example.cz", "testpass123").await;

    for title in ["Pongal", "Dosa"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/recipe/recipes",
            Some(&token),
            json!({
                "title": title,
                "time_minutes": 60,
                "price": "4.50",
                "tags": [{ "name": "Indian" }]
            }),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (_, tags) = send(&app, "GET", "/api/recipe/tags", Some(&token)).await;
    assert_eq!(tags.as_array().unwrap().len(), 1);
}

/// レシピ詳細の取得
#[tokio::test]
async fn test_get_recipe_detail() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "detail@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send(
        &app,
        "GET",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["description"], "Sample description");
}

/// 他ユーザーのレシピ詳細は404
#[tokio::test]
async fn test_get_other_users_recipe_not_found() {
    let (app, _db_pool) = create_test_app().await;
    let owner_token = register_and_token(&app, "owner@example.cz", "testpass123").await;
    let other_token = register_and_token(&app, "other@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&owner_token),
        sample_payload(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/recipe/recipes/{}", id),
        Some(&other_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// タイトルのみの部分更新は他フィールドを保持する
#[tokio::test]
async fn test_partial_update_recipe() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "patch@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
        json!({ "title": "New title" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["title"], "New title");
    assert_eq!(body["time_minutes"], 22);
    assert_eq!(body["price"], "5.25");
}

/// 更新でタグを指定すると集合ごと置き換える
#[tokio::test]
async fn test_update_recipe_replaces_tags() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "retag@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({
            "title": "Sample",
            "time_minutes": 10,
            "price": "5.00",
            "tags": [{ "name": "Breakfast" }]
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
        json!({ "tags": [{ "name": "Lunch" }] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let tags = body["tags"].as_array().unwrap();
    assert_eq!(tags.len(), 1);
    assert_eq!(tags[0]["name"], "Lunch");
}

/// 更新で空のタグ配列を渡すと紐付けを全て外す
#[tokio::test]
async fn test_update_recipe_clears_tags() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "clear@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({
            "title": "Sample",
            "time_minutes": 10,
            "price": "5.00",
            "tags": [{ "name": "Dessert" }]
        }),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, body) = send_json(
        &app,
        "PATCH",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
        json!({ "tags": [] }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["tags"].as_array().unwrap().is_empty());
}

/// レシピ削除は204、その後の取得は404
#[tokio::test]
async fn test_delete_recipe() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "del@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        sample_payload(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/recipe/recipes/{}", id),
        Some(&token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

/// 他ユーザーのレシピ削除は404
#[tokio::test]
async fn test_delete_other_users_recipe_not_found() {
    let (app, _db_pool) = create_test_app().await;
    let owner_token = register_and_token(&app, "keep@example.cz", "testpass123").await;
    let other_token = register_and_token(&app, "thief@example.cz", "testpass123").await;

    let (_, created) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&owner_token),
        sample_payload(),
    )
    .await;
    let id = created["id"].as_i64().unwrap();

    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/recipe/recipes/{}", id),
        Some(&other_token),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    // 所有者からはまだ見える
    let (status, _) = send(
        &app,
        "GET",
        &format!("/api/recipe/recipes/{}", id),
        Some(&owner_token),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
}

/// 空タイトルは400
#[tokio::test]
async fn test_create_recipe_blank_title() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "blank@example.cz", "testpass123").await;

    let (status, _) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({ "title": "", "time_minutes": 10, "price": "5.00" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

/// 必須フィールド欠落は400（422ではない）
#[tokio::test]
async fn test_create_recipe_missing_title_field() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "missing@example.cz", "testpass123").await;

    let (status, body) = send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({ "time_minutes": 10, "price": "5.00" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["detail"].is_string());
}

/// 一覧アイテムはネストしたタグ・食材を{id, name}で持つ
#[tokio::test]
async fn test_list_item_shape() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "shape@example.cz", "testpass123").await;

    send_json(
        &app,
        "POST",
        "/api/recipe/recipes",
        Some(&token),
        json!({
            "title": "Sample",
            "time_minutes": 10,
            "price": "5.00",
            "tags": [{ "name": "Dinner" }],
            "ingredients": [{ "name": "Salt" }]
        }),
    )
    .await;

    let (status, body) = send(&app, "GET", "/api/recipe/recipes", Some(&token)).await;
    assert_eq!(status, StatusCode::OK);

    let item = &body.as_array().unwrap()[0];
    assert!(item.get("description").is_none());
    let tag = &item["tags"][0];
    assert!(tag["id"].is_i64());
    assert_eq!(tag["name"], "Dinner");
    assert!(tag.get("user_id").is_none());
    let ingredient = &item["ingredients"][0];
    assert!(ingredient["id"].is_i64());
    assert_eq!(ingredient["name"], "Salt");
}

/// 不正な価格は400
#[tokio::test]
async fn test_create_recipe_invalid_price() {
    let (app, _db_pool) = create_test_app().await;
    let token = register_and_token(&app, "price@example.cz", "testpass123").await;

    for price in ["abc", "-5.00", "5.505", "123456"] {
        let (status, _) = send_json(
            &app,
            "POST",
            "/api/recipe/recipes",
            Some(&token),
            json!({ "title": "Curry", "time_minutes": 10, "price": price }),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "price {} should fail", price);
    }
}
