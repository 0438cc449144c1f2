//! Explicit schema step: apply, roll back or inspect migrations.
//!
//! The database URL comes from `--database-url`, then `DATABASE_URL`, then the
//! regular application configuration.

use anyhow::Context;
use clap::{Parser, Subcommand};
use inventory_api::{config, db};
use migrations::Migrator;
use sea_orm_migration::MigratorTrait;
use tracing::info;

#[derive(Parser)]
#[command(name = "migration", about = "Manage the inventory-api database schema")]
struct Cli {
    /// Database URL; overrides DATABASE_URL and the configuration files
    #[arg(long)]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Apply pending migrations (default)
    Up {
        /// Apply at most this many migrations
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Print applied and pending migrations
    Status,
    /// Drop every table and re-apply all migrations
    Fresh,
}

fn resolve_database_url(cli_url: Option<String>) -> anyhow::Result<String> {
    if let Some(url) = cli_url {
        return Ok(url);
    }
    if let Ok(url) = std::env::var("DATABASE_URL") {
        return Ok(url);
    }
    let cfg = config::load_config().context("failed to load configuration")?;
    Ok(cfg.database_url)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    config::init_tracing("info", false);

    let cli = Cli::parse();
    let database_url = resolve_database_url(cli.database_url)?;

    info!("Connecting to database");
    let pool = db::establish_connection(&database_url)
        .await
        .context("failed to connect to the database")?;

    match cli.command.unwrap_or(Command::Up { steps: None }) {
        Command::Up { steps } => {
            Migrator::up(&pool, steps).await?;
            info!("Migrations applied");
        }
        Command::Down { steps } => {
            Migrator::down(&pool, Some(steps)).await?;
            info!(steps, "Migrations rolled back");
        }
        Command::Status => {
            Migrator::status(&pool).await?;
        }
        Command::Fresh => {
            Migrator::fresh(&pool).await?;
            info!("Schema recreated");
        }
    }

    Ok(())
}
