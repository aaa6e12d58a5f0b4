//! データベースアクセス層
//!
//! SQLiteベースのデータ永続化

/// ユーザー管理
pub mod users;

/// 認証トークン管理
pub mod tokens;

/// レシピ管理
pub mod recipes;

/// タグ管理
pub mod tags;

/// 食材管理
pub mod ingredients;

/// 行データ型定義
pub mod models;

/// データベースマイグレーション
pub mod migrations;
