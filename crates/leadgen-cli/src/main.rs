use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod context;

use context::AppContext;

#[derive(Parser)]
#[command(name = "leadgen")]
#[command(about = "Leadgen CLI - find business leads with a search-grounded model", long_about = None)]
struct Cli {
    /// Path to config.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "LEADGEN_CONFIG")]
    config: Option<std::path::PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create an account and log in
    Register {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEADGEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Log in to an existing account
    Login {
        #[arg(long)]
        email: String,
        #[arg(long, env = "LEADGEN_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// End the current session
    Logout,
    /// Show the logged-in user
    Whoami,
    /// Search for leads
    Search {
        #[arg(long)]
        industry: String,
        #[arg(long)]
        location: String,
        /// Number of leads to ask for (defaults to [search] default_count)
        #[arg(long)]
        count: Option<usize>,
        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },
    /// Show or clear recent searches
    History {
        #[arg(long)]
        clear: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env early; ignore if missing.
    dotenvy::dotenv().ok();

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .compact()
        .with_target(false)
        .init();

    let cli = Cli::parse();
    let ctx = AppContext::load(cli.config.as_deref())?;

    match cli.command {
        Commands::Register {
            name,
            email,
            password,
        } => commands::auth::register(&ctx, &name, &email, &password).await?,
        Commands::Login { email, password } => {
            commands::auth::login(&ctx, &email, &password).await?
        }
        Commands::Logout => commands::auth::logout(&ctx).await?,
        Commands::Whoami => commands::auth::whoami(&ctx).await,
        Commands::Search {
            industry,
            location,
            count,
            json,
        } => commands::search::run(&ctx, industry, location, count, json).await?,
        Commands::History { clear } => commands::history::run(&ctx, clear).await?,
    }

    Ok(())
}
