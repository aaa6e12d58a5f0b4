//! wait-for-db サブコマンド
//!
//! データベースが接続を受け付けるまでブロックします。コンテナ環境で
//! マイグレーションやサーバー起動の前段として実行します。

use crate::common::error::RecipeError;
use crate::readiness::{self, SqliteDatabaseProbe};
use clap::Args;
use sqlx::sqlite::SqliteConnectOptions;
use sqlx::SqlitePool;
use std::str::FromStr;

/// wait-for-db サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct WaitForDbArgs {
    /// Database URL
    #[arg(
        long,
        default_value = "sqlite:data/recipe-api.db",
        env = "RECIPE_API_DATABASE_URL"
    )]
    pub database_url: String,
}

/// データベースが応答するまで待機
pub async fn execute(args: &WaitForDbArgs) -> Result<(), RecipeError> {
    // 接続自体は遅延させ、到達性の判定はプローブのクエリに委ねる
    let connect_options = SqliteConnectOptions::from_str(&args.database_url)
        .map_err(|e| RecipeError::Database(format!("Invalid database URL: {}", e)))?;
    let pool = SqlitePool::connect_lazy_with(connect_options);

    let probe = SqliteDatabaseProbe::new(pool);
    let attempts = readiness::wait_for_db(&probe).await;

    println!("Database ready after {} attempt(s)", attempts);
    Ok(())
}
