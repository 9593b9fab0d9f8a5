//! Cloud 9 Cafe CLI - Database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply pending database migrations
//! c9-cli migrate run
//!
//! # Show which migrations have been applied
//! c9-cli migrate status
//!
//! # Bootstrap an admin account
//! c9-cli admin create -e admin@example.com -n "Admin Name" -p 'S3cure!pass'
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run or inspect database migrations
//! - `admin create` - Create an admin account with a password

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "c9-cli")]
#[command(author, version, about = "Cloud 9 Cafe CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate {
        #[command(subcommand)]
        action: MigrateAction,
    },
    /// Manage admin accounts
    Admin {
        #[command(subcommand)]
        action: AdminAction,
    },
}

#[derive(Subcommand)]
enum MigrateAction {
    /// Apply pending migrations
    Run,
    /// Show applied migrations
    Status,
}

#[derive(Subcommand)]
enum AdminAction {
    /// Create a new admin account
    Create {
        /// Admin email address
        #[arg(short, long)]
        email: String,

        /// Admin full name
        #[arg(short, long)]
        name: String,

        /// Initial password (must meet the site's strength rule)
        #[arg(short, long)]
        password: String,

        /// Optional phone number
        #[arg(long)]
        phone: Option<String>,
    },
}

#[tokio::main]
async fn main() -> std::process::ExitCode {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Migrate { action } => match action {
            MigrateAction::Run => commands::migrate::run().await.map_err(|e| e.to_string()),
            MigrateAction::Status => commands::migrate::status().await.map_err(|e| e.to_string()),
        },
        Commands::Admin { action } => match action {
            AdminAction::Create {
                email,
                name,
                password,
                phone,
            } => commands::admin::create(&email, &name, &password, phone.as_deref())
                .await
                .map_err(|e| e.to_string()),
        },
    };

    match result {
        Ok(()) => std::process::ExitCode::SUCCESS,
        Err(message) => {
            tracing::error!("{message}");
            std::process::ExitCode::FAILURE
        }
    }
}
