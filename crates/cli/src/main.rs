//! Our Shop CLI - Account management and catalog inspection.
//!
//! # Usage
//!
//! ```bash
//! # Log in and print the matching account
//! shop-cli account login -e user@example.com -p hunter22
//!
//! # Register a new account
//! shop-cli account register -e user@example.com -p hunter22
//!
//! # Inspect accounts
//! shop-cli account get --id 7
//! shop-cli account list
//!
//! # Update or delete an account
//! shop-cli account update --id 7 -e renamed@example.com
//! shop-cli account delete --id 7
//!
//! # Show the default catalog
//! shop-cli catalog list
//! ```
//!
//! The Account Service base URL comes from `OUR_SHOP_API_BASE`
//! (default: `https://our-shop.somee.com/api`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Our Shop CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage accounts through the Account Service
    Account {
        #[command(subcommand)]
        action: AccountAction,
    },
    /// Inspect the product catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum AccountAction {
    /// Check credentials and print the matching account
    Login {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password
        #[arg(short, long)]
        password: String,
    },
    /// Register a new account
    Register {
        /// Account email address
        #[arg(short, long)]
        email: String,

        /// Account password (minimum 6 characters)
        #[arg(short, long)]
        password: String,

        /// Grant admin privileges
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    /// Fetch an account by id
    Get {
        /// Account id
        #[arg(long)]
        id: i32,
    },
    /// List all accounts
    List,
    /// Update an account's email and optionally its password
    Update {
        /// Account id
        #[arg(long)]
        id: i32,

        /// New email address
        #[arg(short, long)]
        email: String,

        /// New password (omit to keep the current one)
        #[arg(short, long)]
        password: Option<String>,

        /// Whether the account keeps admin privileges
        #[arg(long, default_value_t = false)]
        admin: bool,
    },
    /// Delete an account
    Delete {
        /// Account id
        #[arg(long)]
        id: i32,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// Print the default product catalog
    List,
}

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| "our_shop_client=info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Account { action } => match action {
            AccountAction::Login { email, password } => {
                commands::account::login(&email, &password).await?;
            }
            AccountAction::Register {
                email,
                password,
                admin,
            } => {
                commands::account::register(&email, &password, admin).await?;
            }
            AccountAction::Get { id } => commands::account::get(id).await?,
            AccountAction::List => commands::account::list().await?,
            AccountAction::Update {
                id,
                email,
                password,
                admin,
            } => {
                commands::account::update(id, &email, password.as_deref(), admin).await?;
            }
            AccountAction::Delete { id } => commands::account::delete(id).await?,
        },
        Commands::Catalog { action } => match action {
            CatalogAction::List => commands::catalog::list(),
        },
    }
    Ok(())
}
