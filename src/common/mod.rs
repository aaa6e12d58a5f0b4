// 共通モジュール

/// エラー型定義
pub mod error;
