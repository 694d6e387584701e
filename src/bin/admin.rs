//! CLI administration tool for urlbite.
//!
//! Talks to the PostgreSQL registry directly, without going through the
//! HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Show totals
//! cargo run --bin admin -- stats
//!
//! # Inspect one link
//! cargo run --bin admin -- link Xk9pL2
//!
//! # Register a link from the command line
//! cargo run --bin admin -- shorten https://example.com --slug promo
//!
//! # Check database connection / apply migrations
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `urlbite::config`.

use urlbite::application::services::LinkService;
use urlbite::config;
use urlbite::domain::repositories::LinkRepository;
use urlbite::infrastructure::persistence::PgLinkRepository;
use urlbite::server::{MIGRATOR, connect_pool};
use urlbite::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing urlbite.
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
    /// Show link and click totals
    Stats,

    /// Show a single short link
    Link {
        /// Short code to look up
        code: String,
    },

    /// Register a new short link
    Shorten {
        /// URL to shorten
        url: String,

        /// Custom slug (random code if omitted)
        #[arg(short, long)]
        slug: Option<String>,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
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

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;
    let repo = Arc::new(PgLinkRepository::new(Arc::new(pool.clone())));

    match cli.command {
        Commands::Stats => handle_stats(repo.as_ref()).await?,
        Commands::Link { code } => show_link(repo.as_ref(), &code).await?,
        Commands::Shorten { url, slug } => {
            let service = LinkService::new(
                repo,
                Arc::new(RandomCodeGenerator::new(config.code_length)),
                config.registration(),
            );
            shorten(&service, &url, slug.as_deref()).await?;
        }
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Displays link and click totals.
async fn handle_stats(repo: &PgLinkRepository) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let links = repo
        .count()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to count links: {}", e))?;
    let clicks = repo
        .total_clicks()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to sum clicks: {}", e))?;

    println!("  Links:  {}", links.to_string().bright_white().bold());
    println!("  Clicks: {}", clicks.to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Prints one link record.
async fn show_link(repo: &PgLinkRepository, code: &str) -> Result<()> {
    let link = repo
        .find_by_code(code)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Short link not found")?;

    println!("{}", "🔗 Short link".bright_blue().bold());
    println!();
    println!("  Code:    {}", link.short_code.cyan());
    println!("  Target:  {}", link.original_url);
    println!("  Clicks:  {}", link.click_count.to_string().bright_white());
    println!(
        "  Created: {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Registers a link through the same service the HTTP API uses.
async fn shorten(
    service: &LinkService<PgLinkRepository>,
    url: &str,
    slug: Option<&str>,
) -> Result<()> {
    let link = service
        .register(url, slug)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "✅ Short link created".green().bold());
    println!();
    println!("  Code:      {}", link.short_code.cyan());
    println!("  Short URL: {}", link.short_url.bright_yellow());
    println!();

    Ok(())
}

/// Dispatches database commands.
async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            sqlx::query("SELECT 1")
                .execute(pool)
                .await
                .context("Database check failed")?;
            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Migrate => {
            MIGRATOR
                .run(pool)
                .await
                .context("Failed to run migrations")?;
            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
