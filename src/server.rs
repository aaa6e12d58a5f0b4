//! axumサーバーの起動とグレースフルシャットダウン

use crate::common::error::RecipeError;
use crate::{api, AppState};
use tracing::info;

/// サーバーを起動し、シャットダウンシグナルまで待機する
///
/// # Arguments
/// * `state` - アプリケーション状態
/// * `bind_addr` - バインドアドレス（`host:port`形式）
pub async fn run(state: AppState, bind_addr: &str) -> Result<(), RecipeError> {
    let app = api::create_app(state);

    let listener = tokio::net::TcpListener::bind(bind_addr)
        .await
        .map_err(|e| RecipeError::Internal(format!("Failed to bind to {}: {}", bind_addr, e)))?;

    info!("Recipe API server listening on {}", bind_addr);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| RecipeError::Internal(format!("Server error: {}", e)))?;

    info!("Server shutdown complete");
    Ok(())
}

/// シャットダウンシグナルを待機
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, shutting down...");
        }
        _ = terminate => {
            info!("Received SIGTERM, shutting down...");
        }
    }
}
