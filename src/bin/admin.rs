//! CLI administration tool for shop-onboarding.
//!
//! Records which shops have finished payment onboarding and performs
//! database checks without going through the embedded app.
//!
//! # Usage
//!
//! ```bash
//! # Mark a shop's onboarding as complete
//! cargo run --bin admin -- setup complete acme.myshopify.com acct_1Nv0FGQ9RKHgCVdK
//!
//! # List completed shops
//! cargo run --bin admin -- setup list
//!
//! # Show one shop
//! cargo run --bin admin -- setup status acme.myshopify.com
//!
//! # Clear a shop's record so it is offered onboarding again
//! cargo run --bin admin -- setup reset acme.myshopify.com
//!
//! # Database tools
//! cargo run --bin admin -- db check
//! cargo run --bin admin -- db migrate
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `SHOP_CUSTOM_DOMAIN` (optional): extra domain accepted as a shop domain
//!
//! # Features
//!
//! - **Setup Status**: Complete, list, inspect, and reset shop onboarding
//! - **Database Tools**: Connection checks, info, and migrations
//! - **Interactive Prompts**: Confirmation dialogs for writes
//! - **Colored Output**: Terminal-friendly formatting using `colored` crate

use shop_onboarding::application::services::SetupService;
use shop_onboarding::domain::entities::ShopDomain;
use shop_onboarding::infrastructure::persistence::PgSetupRepository;
use shop_onboarding::utils::shop_domain::ShopDomainPolicy;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shop-onboarding.
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
    /// Manage shop setup status
    Setup {
        #[command(subcommand)]
        action: SetupAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

/// Setup status subcommands.
#[derive(Subcommand)]
enum SetupAction {
    /// Mark a shop's onboarding as complete
    Complete {
        /// Shop domain (e.g., "acme.myshopify.com")
        shop: String,

        /// Connected account id (e.g., "acct_1Nv0FGQ9RKHgCVdK"), prompted if omitted
        account: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List shops with completed onboarding
    List,

    /// Show the setup status of one shop
    Status {
        /// Shop domain
        shop: String,
    },

    /// Clear a shop's completion record
    Reset {
        /// Shop domain
        shop: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,

    /// Apply pending migrations
    Migrate,
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
        Commands::Setup { action } => handle_setup_action(action, &pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

/// Dispatches setup status commands.
async fn handle_setup_action(action: SetupAction, pool: &PgPool) -> Result<()> {
    let service = SetupService::new(Arc::new(PgSetupRepository::new(Arc::new(pool.clone()))));

    let custom_domains: Vec<String> = std::env::var("SHOP_CUSTOM_DOMAIN")
        .ok()
        .filter(|d| !d.trim().is_empty())
        .into_iter()
        .collect();
    let policy = ShopDomainPolicy::new(&custom_domains).context("Invalid SHOP_CUSTOM_DOMAIN")?;

    match action {
        SetupAction::Complete { shop, account, yes } => {
            complete_setup(&service, parse_shop(&policy, &shop)?, account, yes).await?;
        }
        SetupAction::List => list_setups(&service).await?,
        SetupAction::Status { shop } => show_setup(&service, parse_shop(&policy, &shop)?).await?,
        SetupAction::Reset { shop, yes } => {
            reset_setup(&service, parse_shop(&policy, &shop)?, yes).await?;
        }
    }

    Ok(())
}

fn parse_shop(policy: &ShopDomainPolicy, raw: &str) -> Result<ShopDomain> {
    policy
        .sanitize(raw)
        .with_context(|| format!("'{raw}' is not a valid shop domain"))
}

/// Records a completed onboarding.
///
/// # Flow
///
/// 1. Prompt for the account id (or use provided)
/// 2. Display the record to be written
/// 3. Confirm (unless `--yes` flag)
/// 4. Validate and upsert
async fn complete_setup(
    service: &SetupService,
    shop: ShopDomain,
    account: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "💳 Complete Onboarding".bright_blue().bold());
    println!();

    let account = match account {
        Some(a) => a,
        None => Input::new()
            .with_prompt("Stripe account id")
            .with_initial_text("acct_")
            .interact_text()?,
    };

    println!("  Shop:    {}", shop.as_str().cyan());
    println!("  Account: {}", account.bright_yellow().bold());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Mark this shop as connected?")
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let status = service.complete(shop, &account).await?;

    println!();
    println!("{}", "✅ Onboarding marked complete!".green().bold());
    println!(
        "  The app now shows: Your Stripe Account ({}) is connected.",
        status.stripe_account_id.bright_yellow()
    );
    println!();

    Ok(())
}

/// Lists completed shops.
///
/// # Output Format
///
/// ```text
/// 📋 Connected Shops
///
///   Shop                                     Account                   Completed
///   ────────────────────────────────────────────────────────────────────────────────────
///   acme.myshopify.com                       acct_1Nv0FGQ9RKHgCVdK     2024-01-15 10:30
/// ```
async fn list_setups(service: &SetupService) -> Result<()> {
    println!("{}", "📋 Connected Shops".bright_blue().bold());
    println!();

    let setups = service.list().await?;

    if setups.is_empty() {
        println!("{}", "  No shops have completed onboarding".yellow());
        println!();
        println!(
            "  Record one with: {} admin setup complete <shop> <account>",
            "cargo run --bin".bright_cyan()
        );
        return Ok(());
    }

    println!(
        "  {:<40} {:<25} {}",
        "Shop".bright_white().bold(),
        "Account".bright_white().bold(),
        "Completed".bright_white().bold()
    );
    println!("  {}", "─".repeat(84).bright_black());

    for setup in &setups {
        println!(
            "  {:<40} {:<25} {}",
            setup.shop.as_str().cyan(),
            setup.stripe_account_id.bright_yellow(),
            setup
                .completed_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!(
        "  Total: {}",
        setups.len().to_string().bright_white().bold()
    );
    println!();

    Ok(())
}

/// Shows the setup status of one shop.
async fn show_setup(service: &SetupService, shop: ShopDomain) -> Result<()> {
    match service.status(&shop).await? {
        Some(setup) => {
            println!("  Shop:      {}", setup.shop.as_str().cyan());
            println!("  Status:    {}", "CONNECTED".green());
            println!("  Account:   {}", setup.stripe_account_id.bright_yellow());
            println!(
                "  Completed: {}",
                setup.completed_at.format("%Y-%m-%d %H:%M").to_string()
            );
        }
        None => {
            println!("  Shop:   {}", shop.as_str().cyan());
            println!("  Status: {}", "PENDING".yellow());
        }
    }

    Ok(())
}

/// Clears a shop's completion record with confirmation prompt.
///
/// # Safety
///
/// - Requires confirmation (default: No) unless `--yes`
/// - Fails if the shop has no record
async fn reset_setup(service: &SetupService, shop: ShopDomain, skip_confirm: bool) -> Result<()> {
    println!("{}", "🔄 Reset Onboarding".bright_blue().bold());
    println!();

    let setup = service
        .status(&shop)
        .await?
        .with_context(|| format!("No completed onboarding for {shop}"))?;

    println!("  Shop:    {}", setup.shop.as_str().cyan());
    println!("  Account: {}", setup.stripe_account_id.bright_black());
    println!();

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt("Reset this shop's onboarding?")
            .default(false)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    service.reset(&shop).await?;

    println!();
    println!("{}", "✅ Onboarding reset".green().bold());
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
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let shops: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM shop_setups")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL:       {}", version.bright_white());
            println!(
                "  Connected shops:  {}",
                shops.to_string().bright_green().bold()
            );
            println!();
        }
        DbAction::Migrate => {
            println!("{}", "🚚 Applying migrations...".bright_blue());

            sqlx::migrate!("./migrations").run(pool).await?;

            println!("{}", "✅ Migrations applied".green().bold());
        }
    }

    Ok(())
}
