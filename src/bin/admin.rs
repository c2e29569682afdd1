//! CLI administration tool for tinylink.
//!
//! Creates and inspects short URLs directly against the configured store,
//! without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create a short URL with a synthesized code
//! cargo run --bin admin -- shorten https://example.com/article
//!
//! # Create with a custom code and a one-hour TTL
//! cargo run --bin admin -- shorten https://example.com --code promo25 --ttl 3600
//!
//! # Resolve a code the way the redirect endpoint does
//! cargo run --bin admin -- resolve promo25
//!
//! # Decode a code back into its record identifier
//! cargo run --bin admin -- decode 2Ez8mZ8Dv3rHbqLY
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see [`tinylink::config`].

use tinylink::application::services::CreateShortUrl;
use tinylink::config::{self, StorageBackend};
use tinylink::domain::{RecordId, Resolution};
use tinylink::server;
use tinylink::utils::code_generator::decode;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;

/// CLI tool for managing tinylink.
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
    /// Create a short URL
    Shorten {
        /// Long URL to shorten
        url: String,

        /// Custom code (4-8 letters or digits)
        #[arg(short, long)]
        code: Option<String>,

        /// Time to live in seconds
        #[arg(short, long)]
        ttl: Option<i64>,
    },

    /// Resolve a code without redirecting
    Resolve {
        /// Short code
        code: String,
    },

    /// Decode a synthesized code into its record identifier
    Decode {
        /// Short code
        code: String,
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
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    match cli.command {
        Commands::Decode { code } => handle_decode(&code),
        Commands::Shorten { url, code, ttl } => handle_shorten(url, code, ttl).await,
        Commands::Resolve { code } => handle_resolve(&code).await,
        Commands::Db { action } => handle_db_action(action).await,
    }
}

/// Creates a short URL through the service, with the same validation as the API.
async fn handle_shorten(url: String, code: Option<String>, ttl: Option<i64>) -> Result<()> {
    let config = config::load_from_env()?;
    let repository = server::build_repository(&config).await?;
    let service = server::build_service(&config, repository);

    println!("{}", "✂️  Create Short URL".bright_blue().bold());
    println!();

    let created = service
        .create(CreateShortUrl {
            long_url: url,
            custom_code: code,
            ttl_seconds: ttl,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create short URL: {}", e))?;

    println!("{}", "✅ Short URL created".green().bold());
    println!();
    println!("  Code:      {}", created.record.code.cyan());
    println!("  Short URL: {}", created.short_url.bright_yellow().bold());
    println!("  Long URL:  {}", created.record.long_url);
    println!(
        "  Created:   {}",
        created
            .record
            .created_at
            .format("%Y-%m-%d %H:%M:%S UTC")
            .to_string()
            .bright_black()
    );
    match created.record.expires_at {
        Some(expires_at) => println!(
            "  Expires:   {}",
            expires_at.format("%Y-%m-%d %H:%M:%S UTC").to_string().yellow()
        ),
        None => println!("  Expires:   {}", "never".bright_black()),
    }
    println!();

    Ok(())
}

/// Resolves a code and prints the outcome.
async fn handle_resolve(code: &str) -> Result<()> {
    let config = config::load_from_env()?;
    let repository = server::build_repository(&config).await?;
    let service = server::build_service(&config, repository);

    let resolution = service
        .resolve(code)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to resolve code: {}", e))?;

    match resolution {
        Resolution::Found(record) => {
            println!("{} {}", "FOUND".green().bold(), record.long_url);
        }
        Resolution::NotFound => {
            println!("{} no short URL with code {}", "NOT FOUND".red().bold(), code.cyan());
        }
        Resolution::Expired { expired_at } => {
            println!(
                "{} expired at {}",
                "EXPIRED".yellow().bold(),
                expired_at.format("%Y-%m-%d %H:%M:%S UTC")
            );
        }
    }

    Ok(())
}

fn handle_decode(code: &str) -> Result<()> {
    let value = decode(code).context("Not a valid base-62 code")?;
    let id = RecordId::new(value);

    println!("  Code:    {}", code.cyan());
    println!("  Decimal: {}", value.to_string().bright_white());
    println!("  Hex:     {}", id.to_string().bright_black());

    Ok(())
}

/// Handles database diagnostic commands.
async fn handle_db_action(action: DbAction) -> Result<()> {
    let config = config::load_from_env()?;
    if config.storage_backend != StorageBackend::Postgres {
        anyhow::bail!("Database commands require STORAGE_BACKEND=postgres");
    }

    let pool = server::connect_pool(&config).await?;

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
            let total: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM short_urls")
                .fetch_one(&pool)
                .await?;
            let expired: i64 = sqlx::query_scalar(
                "SELECT COUNT(*) FROM short_urls WHERE expires_at IS NOT NULL AND expires_at <= NOW()",
            )
            .fetch_one(&pool)
            .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!(
                "  Short URLs: {} ({} expired)",
                total.to_string().bright_green().bold(),
                expired.to_string().yellow()
            );
            println!();
        }
    }

    Ok(())
}
