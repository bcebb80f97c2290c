//! Folio CLI - database migrations, sample data and user management.
//!
//! # Usage
//!
//! ```bash
//! # Run database migrations
//! folio-cli migrate
//!
//! # Replace portfolio items with the built-in sample projects
//! folio-cli seed
//!
//! # Add projects from a YAML file without clearing existing ones
//! folio-cli seed --file projects.yaml --keep-existing
//!
//! # Create the admin user
//! folio-cli user create --username admin --email admin@example.com --password '...'
//!
//! # List users
//! folio-cli user list
//! ```
//!
//! # Environment Variables
//!
//! - `FOLIO_DATABASE_URL` (or `DATABASE_URL`) - `PostgreSQL` connection string
//! - `PASSWORD_SCHEME` - `argon2` (default) or `plaintext`, used by `user create`

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "folio-cli")]
#[command(author, version, about = "Folio CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Load sample portfolio projects
    Seed {
        /// YAML file with projects (defaults to the built-in samples)
        #[arg(short, long)]
        file: Option<PathBuf>,

        /// Keep existing portfolio items instead of clearing them first
        #[arg(long)]
        keep_existing: bool,
    },
    /// Manage users
    User {
        #[command(subcommand)]
        action: UserAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create a new user
    Create {
        /// Login name (unique, case-sensitive)
        #[arg(short, long)]
        username: String,

        /// Email address (unique)
        #[arg(short, long)]
        email: String,

        /// Password, stored according to `PASSWORD_SCHEME`
        #[arg(short, long)]
        password: String,

        /// Role label
        #[arg(short, long, default_value = "admin")]
        role: String,
    },
    /// List users
    List,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Seed {
            file,
            keep_existing,
        } => commands::seed::portfolio(file.as_deref(), keep_existing).await?,
        Commands::User { action } => match action {
            UserAction::Create {
                username,
                email,
                password,
                role,
            } => {
                commands::user::create(&username, &email, &password, &role).await?;
            }
            UserAction::List => commands::user::list().await?,
        },
    }
    Ok(())
}
