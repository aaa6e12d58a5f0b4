//! CLI module for recipe-api
//!
//! Provides command-line interface for server and database management.

pub mod create_superuser;
pub mod serve;
pub mod wait_for_db;

use clap::{Parser, Subcommand};

/// Recipe API - User-scoped recipe, tag and ingredient management server
#[derive(Parser, Debug)]
#[command(name = "recipe-api")]
#[command(version, about, long_about = None)]
#[command(after_help = r#"ENVIRONMENT VARIABLES:
    RECIPE_API_HOST          Bind address (default: 0.0.0.0)
    RECIPE_API_PORT          Listen port (default: 8000)
    RECIPE_API_LOG_LEVEL     Log level (default: info)
    RECIPE_API_DATABASE_URL  Database URL (default: sqlite:data/recipe-api.db)
"#)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the API server
    Serve(serve::ServeArgs),
    /// Block until the database accepts connections
    WaitForDb(wait_for_db::WaitForDbArgs),
    /// Create a superuser account interactively
    CreateSuperuser(create_superuser::CreateSuperuserArgs),
}
