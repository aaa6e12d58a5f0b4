//! データモデル定義
//!
//! データベース行に対応するドメイン型

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// ユーザー
#[derive(Debug, Clone)]
pub struct User {
    /// ユーザーID
    pub id: Uuid,
    /// メールアドレス（ドメイン部は小文字に正規化済み）
    pub email: String,
    /// 表示名
    pub name: String,
    /// bcryptパスワードハッシュ
    pub password_hash: String,
    /// 管理サイトへのアクセス権
    pub is_staff: bool,
    /// 全権限フラグ
    pub is_superuser: bool,
    /// 作成日時
    pub created_at: DateTime<Utc>,
    /// 最終ログイン日時
    pub last_login: Option<DateTime<Utc>>,
}

/// 認証トークン（平文はDBに保存しない）
#[derive(Debug, Clone)]
pub struct AuthToken {
    /// トークンID
    pub id: Uuid,
    /// トークンのSHA-256ハッシュ（16進文字列）
    pub token_hash: String,
    /// 先頭8文字（一覧表示用）
    pub token_prefix: String,
    /// 発行先ユーザーID
    pub user_id: Uuid,
    /// 発行日時
    pub created_at: DateTime<Utc>,
}

/// レシピ
#[derive(Debug, Clone)]
pub struct Recipe {
    /// レシピID
    pub id: i64,
    /// 所有ユーザーID
    pub user_id: Uuid,
    /// タイトル
    pub title: String,
    /// 説明
    pub description: String,
    /// 調理時間（分）
    pub time_minutes: i64,
    /// 価格（10進文字列、例: "5.50"）
    pub price: String,
    /// 参考リンク
    pub link: String,
    /// 作成日時
    pub created_at: DateTime<Utc>,
}

/// タグ
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Tag {
    /// タグID
    pub id: i64,
    /// タグ名
    pub name: String,
    /// 所有ユーザーID
    #[serde(skip)]
    pub user_id: Uuid,
}

/// 食材
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct Ingredient {
    /// 食材ID
    pub id: i64,
    /// 食材名
    pub name: String,
    /// 所有ユーザーID
    #[serde(skip)]
    pub user_id: Uuid,
}
