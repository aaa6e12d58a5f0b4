//! Recipe API Server
//!
//! ユーザーごとのレシピ・タグ・食材を管理するREST APIサーバー

#![warn(missing_docs)]

/// 共通型定義（エラー型）
pub mod common;

/// REST APIハンドラー
pub mod api;

/// データベースアクセス
pub mod db;

/// 認証・認可機能
pub mod auth;

/// データベース到達性プローブ（起動ゲート）
pub mod readiness;

/// ロギング初期化ユーティリティ
pub mod logging;

/// 設定管理（環境変数ヘルパー）
pub mod config;

/// CLIインターフェース
pub mod cli;

/// axumサーバー起動・シャットダウン
pub mod server;

/// アプリケーション状態
#[derive(Clone)]
pub struct AppState {
    /// データベース接続プール
    pub db_pool: sqlx::SqlitePool,
}
