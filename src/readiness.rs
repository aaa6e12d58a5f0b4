//! データベース到達性プローブ
//!
//! サーバー起動やマイグレーション前にデータベースが受け付け可能に
//! なるまでブロックする起動ゲート。コンテナ環境でDBコンテナより
//! 先にアプリが起動するケースを吸収する。

use crate::common::error::RecipeError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::time::Duration;

/// 再試行間隔（固定）
pub const RETRY_INTERVAL: Duration = Duration::from_secs(2);

/// データベース到達性の確認手段
///
/// 本番では[`SqliteDatabaseProbe`]が実クエリを投げる。テストでは
/// 失敗回数を制御できるモックを差し込む。
#[async_trait]
pub trait DatabaseProbe: Send + Sync {
    /// データベースが受け付け可能なら`Ok(())`を返す
    async fn check(&self) -> Result<(), RecipeError>;
}

/// SQLite接続プールに対する到達性プローブ
pub struct SqliteDatabaseProbe {
    pool: SqlitePool,
}

impl SqliteDatabaseProbe {
    /// プールを包んだプローブを作成
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl DatabaseProbe for SqliteDatabaseProbe {
    async fn check(&self) -> Result<(), RecipeError> {
        sqlx::query("SELECT 1")
            .execute(&self.pool)
            .await
            .map_err(|e| RecipeError::Database(format!("Database unavailable: {}", e)))?;
        Ok(())
    }
}

/// データベースが応答するまでブロックする
///
/// 成功するまで[`RETRY_INTERVAL`]間隔で無限に再試行する。
/// タイムアウトは持たない（起動順序の問題は必ずいつか解消される
/// 前提で、落とすよりも待ち続ける）。
///
/// # Returns
/// 成功までに要した試行回数（初回成功なら1）
pub async fn wait_for_db(probe: &dyn DatabaseProbe) -> u64 {
    // CLIの進捗表示なので、ログフィルタに左右されないstdoutへ直接出す
    println!("Waiting for database...");
    let mut attempts: u64 = 0;

    loop {
        attempts += 1;
        match probe.check().await {
            Ok(()) => {
                println!("Database available!");
                return attempts;
            }
            Err(e) => {
                tracing::debug!("Database check failed: {}", e);
                println!(
                    "Database unavailable, waiting {} seconds...",
                    RETRY_INTERVAL.as_secs()
                );
                tokio::time::sleep(RETRY_INTERVAL).await;
            }
        }
    }
}
