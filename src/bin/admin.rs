//! CLI administration tool for subdomain-redirect.
//!
//! Provides commands for creating and inspecting redirects and performing
//! database operations without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a redirect (prompts for the URL when omitted)
//! cargo run --bin admin -- redirect create https://example.com/page
//!
//! # Show a redirect
//! cargo run --bin admin -- redirect show nkhf8idmvhen
//!
//! # Count stored redirects
//! cargo run --bin admin -- redirect count
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_MAX_ATTEMPTS` (optional): candidate tokens tried per creation

use subdomain_redirect::application::services::{DEFAULT_MAX_ATTEMPTS, TokenService};
use subdomain_redirect::domain::repositories::RedirectRepository;
use subdomain_redirect::infrastructure::persistence::PgRedirectRepository;
use subdomain_redirect::utils::target_url::sanitize_for_display;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing subdomain-redirect.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage redirects
    Redirect {
        #[command(subcommand)]
        action: RedirectAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Redirect management subcommands.
#[derive(Subcommand)]
enum RedirectAction {
    /// Register a target URL under a new token
    Create {
        /// Target URL (prompted for if omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show the target stored for a token
    Show {
        /// Token to look up
        token: String,
    },

    /// Count stored redirects
    Count,
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::Redirect { action } => handle_redirect_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches redirect management commands.
async fn handle_redirect_action(action: RedirectAction, pool: &PgPool) -> Result<()> {
    let repo = Arc::new(PgRedirectRepository::new(Arc::new(pool.clone())));

    match action {
        RedirectAction::Create { url, yes } => create_redirect(repo, url, yes).await?,
        RedirectAction::Show { token } => show_redirect(repo, &token).await?,
        RedirectAction::Count => count_redirects(repo).await?,
    }

    Ok(())
}

/// Registers a redirect with interactive prompts.
///
/// Uses the same [`TokenService`] as the HTTP API, so tokens are derived and
/// collision-checked exactly as for `POST /`.
async fn create_redirect(
    repo: Arc<PgRedirectRepository>,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Redirect".bright_blue().bold());
    println!();

    let target_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };

    println!("  Target: {}", sanitize_for_display(&target_url).cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this redirect?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let max_attempts = std::env::var("TOKEN_MAX_ATTEMPTS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(DEFAULT_MAX_ATTEMPTS);
    let service = TokenService::new(repo, max_attempts);

    let token = service
        .generate_and_register(&target_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create redirect: {}", e))?;

    println!();
    println!("{}", "✅ Redirect created successfully!".green().bold());
    println!();
    println!("  Token: {}", token.bright_yellow().bold());
    println!();

    Ok(())
}

/// Prints the record stored for `token`.
///
/// # Output Format
///
/// ```text
/// 🔎 Redirect nkhf8idmvhen
///
///   Target:  https://example.com/page
///   Created: 2024-01-15 10:30:00 UTC
/// ```
async fn show_redirect(repo: Arc<PgRedirectRepository>, token: &str) -> Result<()> {
    println!("{} {}", "🔎 Redirect".bright_blue().bold(), token.cyan());
    println!();

    let record = repo
        .get(token)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    let Some(record) = record else {
        println!("{}", "  Redirect not found".yellow());
        return Ok(());
    };

    let created = record
        .created_at_utc()
        .map(|dt| dt.format("%Y-%m-%d %H:%M:%S UTC").to_string())
        .unwrap_or_else(|| record.created_at.to_string());

    println!("  Target:  {}", record.target_url.bright_white());
    println!("  Created: {}", created.bright_black());
    println!();

    Ok(())
}

async fn count_redirects(repo: Arc<PgRedirectRepository>) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let count = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?;

    println!(
        "  Redirects: {}",
        count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            println!("{}", "🛠  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to migrate")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!();
        }
    }

    Ok(())
}
