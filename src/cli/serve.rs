//! serve サブコマンド
//!
//! Recipe APIサーバーを起動します。

use crate::common::error::RecipeError;
use crate::AppState;
use clap::Args;
use tracing::info;

/// serve サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct ServeArgs {
    /// Listen port
    #[arg(short, long, default_value = "8000", env = "RECIPE_API_PORT")]
    pub port: u16,

    /// Bind address
    #[arg(short = 'H', long, default_value = "0.0.0.0", env = "RECIPE_API_HOST")]
    pub host: String,

    /// Database URL
    #[arg(
        long,
        default_value = "sqlite:data/recipe-api.db",
        env = "RECIPE_API_DATABASE_URL"
    )]
    pub database_url: String,
}

/// サーバーを起動
pub async fn execute(args: &ServeArgs) -> Result<(), RecipeError> {
    info!("Recipe API v{}", env!("CARGO_PKG_VERSION"));

    let db_pool = crate::db::migrations::initialize_database(&args.database_url).await?;

    let state = AppState { db_pool };
    let bind_addr = format!("{}:{}", args.host, args.port);

    crate::server::run(state, &bind_addr).await
}
