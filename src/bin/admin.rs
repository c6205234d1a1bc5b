//! CLI administration tool for shortcode-service.
//!
//! Provides database maintenance, store statistics, per-owner listings, and
//! development token minting without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Check database connection
//! cargo run --bin admin -- db check
//!
//! # Apply pending migrations
//! cargo run --bin admin -- db migrate
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # List mappings created by an owner
//! cargo run --bin admin -- links --owner user@example.com
//!
//! # Mint a bearer token for local testing
//! cargo run --bin admin -- token issue --email user@example.com
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (or `DB_*` components): required for `db`, `stats`, `links`
//! - `AUTH_JWT_SECRET`: required for `token issue`
//! - `AUTH_JWT_ISSUER`, `AUTH_JWT_AUDIENCE`: copied into issued tokens when set

use shortcode_service::application::services::auth_service::issue_token;
use shortcode_service::config::Config;
use shortcode_service::domain::repositories::UrlMappingRepository;
use shortcode_service::infrastructure::persistence::PgUrlMappingRepository;
use shortcode_service::server::connect_pool;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Input;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortcode-service.
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
    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },

    /// Show store statistics
    Stats,

    /// List mappings created by an owner
    Links {
        /// Owner email
        #[arg(short, long)]
        owner: String,
    },

    /// Bearer token utilities
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Apply pending migrations
    Migrate,
}

/// Token subcommands.
#[derive(Subcommand)]
enum TokenAction {
    /// Issue an HS256 token signed with AUTH_JWT_SECRET
    Issue {
        /// Email claim (prompted for if omitted)
        #[arg(short, long)]
        email: Option<String>,

        /// Lifetime in hours
        #[arg(long, default_value_t = 24)]
        ttl_hours: i64,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Db { action } => handle_db_action(action, &open_pool().await?).await?,
        Commands::Stats => handle_stats(&open_pool().await?).await?,
        Commands::Links { owner } => handle_links(&open_pool().await?, &owner).await?,
        Commands::Token { action } => handle_token_action(action)?,
    }

    Ok(())
}

/// Connects with the same pool settings as the server.
async fn open_pool() -> Result<PgPool> {
    let config = Config::from_env().context("Failed to load configuration")?;
    connect_pool(&config).await
}

/// Handles database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));
            repo.ping()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            println!("{}", "✅ Database connection OK".green().bold());
            println!("  PostgreSQL: {}", version.bright_white());
        }
        DbAction::Migrate => {
            println!("{}", "🛠️  Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations")
                .run(pool)
                .await
                .context("Failed to run migrations")?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}

/// Displays store statistics.
///
/// Shows:
/// - Total number of mappings
/// - Total number of recorded visits
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));
    let summary = repo
        .summary()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to read statistics: {}", e))?;

    println!(
        "  Mappings: {}",
        summary.mappings.to_string().bright_green().bold()
    );
    println!(
        "  Visits:   {}",
        summary.total_visits.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Lists an owner's mappings in creation order.
///
/// # Output Format
///
/// ```text
/// 🔗 Links for user@example.com
///
///   Code      Visits   Created            Long URL
///   ─────────────────────────────────────────────────────────────────
///   k3x9q2ab  42       2025-01-15 10:30   https://example.com/page
/// ```
async fn handle_links(pool: &PgPool, owner: &str) -> Result<()> {
    println!(
        "{} {}",
        "🔗 Links for".bright_blue().bold(),
        owner.cyan().bold()
    );
    println!();

    let repo = PgUrlMappingRepository::new(Arc::new(pool.clone()));
    let mappings = repo
        .list_by_owner(owner)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list links: {}", e))?;

    if mappings.is_empty() {
        println!("{}", "  No links found".yellow());
        return Ok(());
    }

    println!(
        "  {:<9} {:<8} {:<18} {}",
        "Code".bright_white().bold(),
        "Visits".bright_white().bold(),
        "Created".bright_white().bold(),
        "Long URL".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for mapping in &mappings {
        println!(
            "  {:<9} {:<8} {:<18} {}",
            mapping.short_code.cyan(),
            mapping.total_visits.to_string().bright_green(),
            mapping
                .created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black(),
            mapping.long_url
        );
    }

    println!();
    println!(
        "  Total: {}",
        mappings.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Dispatches token commands.
fn handle_token_action(action: TokenAction) -> Result<()> {
    match action {
        TokenAction::Issue { email, ttl_hours } => issue(email, ttl_hours),
    }
}

/// Mints a development token.
///
/// The service accepts it when it runs with the same `AUTH_JWT_SECRET`
/// (and issuer/audience, if configured).
fn issue(email: Option<String>, ttl_hours: i64) -> Result<()> {
    println!("{}", "🔑 Issue Bearer Token".bright_blue().bold());
    println!();

    let secret = std::env::var("AUTH_JWT_SECRET").context("AUTH_JWT_SECRET must be set")?;
    let issuer = std::env::var("AUTH_JWT_ISSUER").ok();
    let audience = std::env::var("AUTH_JWT_AUDIENCE").ok();

    let email = match email {
        Some(e) => e,
        None => Input::new()
            .with_prompt("Email")
            .validate_with(|input: &String| -> Result<(), &str> {
                if input.contains('@') {
                    Ok(())
                } else {
                    Err("Not an email address")
                }
            })
            .interact_text()?,
    };

    let token = issue_token(
        &secret,
        &email,
        chrono::Duration::hours(ttl_hours),
        issuer.as_deref(),
        audience.as_deref(),
    )
    .context("Failed to sign token")?;

    println!("  Email:   {}", email.cyan());
    println!("  Expires: in {} hours", ttl_hours.to_string().bright_white());
    println!();
    println!("{}", "Add this to your requests:".bright_white());
    println!(
        "  {}: Bearer {}",
        "Authorization".bright_cyan(),
        token.bright_yellow()
    );
    println!();
    println!("{}", "Example:".bright_white());
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/all-urls",
        token.bright_yellow()
    );
    println!();

    Ok(())
}
