//! CLI administration tool for shortlink.
//!
//! Runs the same cache-aside operations as the HTTP API directly against
//! PostgreSQL and Redis, plus a few database diagnostics.
//!
//! # Usage
//!
//! ```bash
//! # Shorten a URL
//! cargo run --bin admin -- create https://example.com
//!
//! # Resolve a key (counts as an access)
//! cargo run --bin admin -- lookup aB3xYz
//!
//! # Delete a short URL (key or full short URL)
//! cargo run --bin admin -- delete http://localhost/aB3xYz --yes
//!
//! # Show access statistics
//! cargo run --bin admin -- stats aB3xYz
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server: `DATABASE_URL` (or `DB_*`) is required, `REDIS_URL`
//! enables the cache. See [`shortlink::config`].

use shortlink::application::services::ShortenerService;
use shortlink::config::{self, Config};
use shortlink::server;

use anyhow::Result;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level commands.
#[derive(Subcommand)]
enum Commands {
    /// Shorten a URL
    Create {
        /// The long URL to shorten
        url: String,
    },

    /// Resolve a short URL to its target
    Lookup {
        /// Short key or full short URL
        key: String,
    },

    /// Delete a short URL
    Delete {
        /// Short key or full short URL
        key: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Show access statistics for a short URL
    Stats {
        /// Short key or full short URL
        key: String,
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

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    let config = config::load_from_env()?;

    match cli.command {
        Commands::Create { url } => create_url(&connect(&config).await?, &url).await?,
        Commands::Lookup { key } => lookup_url(&connect(&config).await?, &key).await?,
        Commands::Delete { key, yes } => delete_url(&connect(&config).await?, &key, yes).await?,
        Commands::Stats { key } => show_stats(&connect(&config).await?, &key).await?,
        Commands::Db { action } => handle_db_action(action, &config).await?,
    }

    Ok(())
}

/// Builds the shortener service against the configured stores.
async fn connect(config: &Config) -> Result<ShortenerService> {
    server::connect_shortener(config).await
}

async fn create_url(shortener: &ShortenerService, url: &str) -> Result<()> {
    println!("{}", "🔗 Create Short URL".bright_blue().bold());
    println!();

    let short_url = shortener
        .create_short_url(url)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("  Target:    {}", url.cyan());
    println!("  Short URL: {}", short_url.bright_yellow().bold());
    println!();
    println!("{}", "✅ Short URL created".green().bold());

    Ok(())
}

/// Resolves a key the same way a redirect does, including the access count.
async fn lookup_url(shortener: &ShortenerService, input: &str) -> Result<()> {
    let key = shortener.key_of(input);

    match shortener.get_long_url(key).await {
        Ok(long_url) => {
            println!("  {} → {}", shortener.short_url(key).cyan(), long_url.bright_white());
        }
        Err(e) if e.is_not_found() => {
            println!("{}", format!("⚠️  No short URL for '{}'", key).yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Lookup failed: {}", e)),
    }

    Ok(())
}

/// Deletes a short URL after confirmation (default: No).
async fn delete_url(shortener: &ShortenerService, input: &str, skip_confirm: bool) -> Result<()> {
    println!("{}", "🗑️  Delete Short URL".bright_blue().bold());
    println!();

    let key = shortener.key_of(input);
    let short_url = shortener.short_url(key);
    println!("  Short URL: {}", short_url.cyan());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Delete this short URL?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    match shortener.delete_url(key).await {
        Ok(deleted_url) => {
            println!("{}", "✅ URL deleted successfully".green().bold());
            println!("  Was pointing to: {}", deleted_url.bright_white());
        }
        Err(e) if e.is_not_found() => {
            println!("{}", "⚠️  Nothing to delete".yellow());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to delete short URL: {}", e)),
    }
    println!();

    Ok(())
}

/// Displays the durable record of a short URL.
async fn show_stats(shortener: &ShortenerService, input: &str) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let key = shortener.key_of(input);
    let record = match shortener.get_url_stats(key).await {
        Ok(record) => record,
        Err(e) if e.is_not_found() => {
            println!("{}", format!("⚠️  No short URL for '{}'", key).yellow());
            return Ok(());
        }
        Err(e) => return Err(anyhow::anyhow!("Failed to load statistics: {}", e)),
    };

    println!("  Short URL: {}", record.short_url.cyan());
    println!("  Target:    {}", record.long_url.bright_white());
    println!(
        "  Accesses:  {}",
        record.access_count.to_string().bright_green().bold()
    );
    println!(
        "  Created:   {}",
        record
            .created_at
            .format("%Y-%m-%d %H:%M")
            .to_string()
            .bright_black()
    );
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction, config: &Config) -> Result<()> {
    let pool = server::connect_database(config).await?;

    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(&pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(&pool)
                .await?;

            let urls_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM urls")
                .fetch_one(&pool)
                .await
                .unwrap_or(0);

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Short URLs: {}",
                urls_count.to_string().bright_green().bold()
            );
            println!();
        }
    }

    Ok(())
}
