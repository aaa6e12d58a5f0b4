//! ロギング初期化
//!
//! tracing-subscriberによる構造化ログの初期化

use tracing_subscriber::EnvFilter;

/// ロギングを初期化
///
/// フィルタは `RUST_LOG` を優先し、未設定の場合は環境変数
/// `RECIPE_API_LOG_LEVEL`（デフォルト: `info`）を使用する。
///
/// # Returns
/// * `Ok(())` - 初期化成功
/// * `Err` - グローバルサブスクライバーが既に設定されている
pub fn init() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let default_level = crate::config::get_env_or("RECIPE_API_LOG_LEVEL", "info");
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("recipe_api={0},tower_http={0}", default_level)));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init()?;

    Ok(())
}
