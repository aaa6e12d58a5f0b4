//! Recipe API Server Entry Point

use clap::Parser;
use recipe_api::cli::{serve, Cli, Commands};
use recipe_api::logging;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    logging::init().expect("failed to initialize logging");

    let result = match cli.command {
        Some(Commands::Serve(args)) => recipe_api::cli::serve::execute(&args).await,
        Some(Commands::WaitForDb(args)) => recipe_api::cli::wait_for_db::execute(&args).await,
        Some(Commands::CreateSuperuser(args)) => {
            recipe_api::cli::create_superuser::execute(&args).await
        }
        None => {
            // No subcommand - default to serve with env configuration
            let args = serve::ServeArgs {
                port: recipe_api::config::get_env_parse("RECIPE_API_PORT", 8000),
                host: recipe_api::config::get_env_or("RECIPE_API_HOST", "0.0.0.0"),
                database_url: recipe_api::config::database_url_from_env(),
            };
            recipe_api::cli::serve::execute(&args).await
        }
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
