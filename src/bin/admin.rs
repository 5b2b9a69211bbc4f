//! CLI administration tool for url-shortener.
//!
//! Creates and inspects short links and checks the database without going
//! through the HTTP server. Uses the same link service as the server, so
//! allocation rules (validation, collision retry) are identical.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL (prompts when the URL is omitted)
//! cargo run --bin admin -- link create https://example.com/a/b?c=1
//!
//! # Show a link without counting a click
//! cargo run --bin admin -- link show aZ3kP9q
//!
//! # View statistics
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (default `sqlite://data/urls.db`)
//! - `BASE_URL` (optional): origin printed in front of created codes
//! - `CODE_LENGTH` (default 7)

use url_shortener::application::services::LinkService;
use url_shortener::config::{self, Config};
use url_shortener::infrastructure::database;
use url_shortener::infrastructure::persistence::SqliteLinkRepository;
use url_shortener::utils::code_generator::RandomCodeGenerator;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::SqlitePool;
use std::sync::Arc;

type SqliteLinkService = LinkService<SqliteLinkRepository, RandomCodeGenerator>;

/// CLI tool for managing url-shortener.
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
    /// Manage short links
    Link {
        #[command(subcommand)]
        action: LinkAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Link management subcommands.
#[derive(Subcommand)]
enum LinkAction {
    /// Shorten a URL
    Create {
        /// Target URL (prompted for when omitted)
        url: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show a link and its click count (does not count as a visit)
    Show {
        /// Short code
        code: String,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    let pool = database::connect(&config.database_url, &config.pool_settings())
        .await
        .context("Failed to connect to database")?;
    database::migrate(&pool)
        .await
        .context("Failed to migrate")?;

    let service = LinkService::new(
        Arc::new(SqliteLinkRepository::new(Arc::new(pool.clone()))),
        Arc::new(RandomCodeGenerator),
    )
    .with_code_length(config.code_length);

    match cli.command {
        Commands::Link { action } => handle_link_action(action, &service, &config).await?,
        Commands::Stats => handle_stats(&service).await?,
        Commands::Db { action } => handle_db_action(action, &pool, &config).await?,
    }

    Ok(())
}

/// Dispatches link management commands.
async fn handle_link_action(
    action: LinkAction,
    service: &SqliteLinkService,
    config: &Config,
) -> Result<()> {
    match action {
        LinkAction::Create { url, yes } => create_link(service, config, url, yes).await,
        LinkAction::Show { code } => show_link(service, config, &code).await,
    }
}

/// Creates a short link with interactive prompts.
///
/// # Flow
///
/// 1. Prompt for the URL (or use provided)
/// 2. Confirm creation (unless `--yes` flag)
/// 3. Validate and allocate through the link service
/// 4. Print the code and short URL
async fn create_link(
    service: &SqliteLinkService,
    config: &Config,
    url: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔗 Create Short Link".bright_blue().bold());
    println!();

    let target_url = match url {
        Some(u) => u,
        None => Input::new()
            .with_prompt("Target URL")
            .with_initial_text("https://")
            .interact_text()?,
    };
    let target_url = target_url.trim().to_string();

    println!("  Target: {}", target_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Create this link?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let link = service
        .create_short_link(&target_url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create link: {}", e))?;

    println!("{}", "✅ Link created successfully!".green().bold());
    println!();
    println!("  Code:      {}", link.code.bright_yellow().bold());
    println!("  Short URL: {}", short_url(service, config, &link.code).bright_cyan());
    println!();

    Ok(())
}

/// Displays a single link without recording a visit.
async fn show_link(service: &SqliteLinkService, config: &Config, code: &str) -> Result<()> {
    let link = service
        .get_link(code)
        .await
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    println!("{}", "🔎 Short Link".bright_blue().bold());
    println!();
    println!("  ID:        {}", link.id.to_string().bright_black());
    println!("  Code:      {}", link.code.bright_yellow());
    println!("  Short URL: {}", short_url(service, config, &link.code).bright_cyan());
    println!("  Target:    {}", link.target_url.cyan());
    println!(
        "  Clicks:    {}",
        link.clicks.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        link.created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Displays system statistics.
///
/// Shows:
/// - Total number of links
/// - Total number of clicks
async fn handle_stats(service: &SqliteLinkService) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let totals = service
        .totals()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to load statistics: {}", e))?;

    println!(
        "  Links:  {}",
        totals.links.to_string().bright_green().bold()
    );
    println!(
        "  Clicks: {}",
        totals.clicks.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, pool: &SqlitePool, config: &Config) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT sqlite_version()")
                .fetch_one(pool)
                .await?;
            let journal_mode: String = sqlx::query_scalar("PRAGMA journal_mode")
                .fetch_one(pool)
                .await?;

            println!("  SQLite:       {}", version.bright_white());
            println!("  Journal mode: {}", journal_mode.bright_white());
            println!("  Database:     {}", config.database_url.bright_white());
            println!();
        }
    }

    Ok(())
}

/// Short URL for display; falls back to the configured listen address.
fn short_url(service: &SqliteLinkService, config: &Config, code: &str) -> String {
    let origin = config
        .base_url
        .clone()
        .unwrap_or_else(|| format!("http://{}", config.listen_addr));
    service.short_url(&origin, code)
}
