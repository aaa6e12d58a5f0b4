//! create-superuser サブコマンド
//!
//! 管理権限を持つユーザーを対話的に作成します。

use crate::common::error::RecipeError;
use clap::Args;
use std::io::{self, Write};

/// create-superuser サブコマンドの引数
#[derive(Args, Debug, Clone)]
pub struct CreateSuperuserArgs {
    /// Database URL
    #[arg(
        long,
        default_value = "sqlite:data/recipe-api.db",
        env = "RECIPE_API_DATABASE_URL"
    )]
    pub database_url: String,

    /// Email address (prompted if not given)
    #[arg(long)]
    pub email: Option<String>,

    /// Display name (prompted if not given)
    #[arg(long)]
    pub name: Option<String>,
}

fn prompt_line(label: &str) -> Result<String, RecipeError> {
    print!("{}: ", label);
    io::stdout()
        .flush()
        .map_err(|e| RecipeError::Internal(format!("Failed to flush stdout: {}", e)))?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .map_err(|e| RecipeError::Internal(format!("Failed to read input: {}", e)))?;
    Ok(input.trim().to_string())
}

/// スーパーユーザーを作成
pub async fn execute(args: &CreateSuperuserArgs) -> Result<(), RecipeError> {
    let pool = crate::db::migrations::initialize_database(&args.database_url).await?;

    let email = match &args.email {
        Some(email) => email.clone(),
        None => prompt_line("Email address")?,
    };
    crate::db::users::normalize_email(&email)?;

    if crate::db::users::find_by_email(&pool, &email).await?.is_some() {
        return Err(RecipeError::Validation(
            "user with this email already exists".to_string(),
        ));
    }

    let name = match &args.name {
        Some(name) => name.clone(),
        None => prompt_line("Name")?,
    };

    let password = rpassword::prompt_password("Password: ")
        .map_err(|e| RecipeError::Internal(format!("Failed to read password: {}", e)))?;
    let confirmation = rpassword::prompt_password("Password (again): ")
        .map_err(|e| RecipeError::Internal(format!("Failed to read password: {}", e)))?;

    if password != confirmation {
        return Err(RecipeError::Validation(
            "Passwords do not match".to_string(),
        ));
    }
    if password.chars().count() < 5 {
        return Err(RecipeError::Validation(
            "Ensure this field has at least 5 characters.".to_string(),
        ));
    }

    let password_hash = crate::auth::password::hash_password(&password)?;
    let user = crate::db::users::create(&pool, &email, &name, &password_hash, true, true).await?;

    println!("Superuser created: {}", user.email);
    Ok(())
}
