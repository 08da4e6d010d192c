use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use sea_orm_migration::MigratorTrait;
use storefront_catalog::{
    config::{init_tracing, load_config},
    db::{establish_connection_with_config, DbConfig},
    migrator::Migrator,
};
use tracing::info;

#[derive(Parser)]
#[command(name = "migration")]
#[command(about = "Apply, revert and inspect the catalog schema migrations", long_about = None)]
struct Cli {
    /// Database URL; falls back to the layered configuration when omitted
    #[arg(long, env = "DATABASE_URL")]
    database_url: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Apply pending migrations
    Up {
        /// Number of migrations to apply (all pending when omitted)
        #[arg(short, long)]
        steps: Option<u32>,
    },
    /// Roll back applied migrations
    Down {
        /// Number of migrations to roll back
        #[arg(short, long, default_value_t = 1)]
        steps: u32,
    },
    /// Show the status of every migration
    Status,
    /// Drop all tables and re-apply every migration
    Fresh,
    /// Roll back every migration and re-apply them
    Refresh,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let config = load_config().context("failed to load configuration")?;

    init_tracing(&config.log_level, config.log_json);

    let mut db_config = DbConfig::from(&config);
    if let Some(url) = cli.database_url {
        db_config.url = url;
    }
    db_config.max_connections = 2;
    db_config.min_connections = 1;

    let db = establish_connection_with_config(&db_config)
        .await
        .context("failed to connect to database")?;

    match cli.command {
        Commands::Up { steps } => {
            info!("Applying migrations");
            Migrator::up(&db, steps).await?;
        }
        Commands::Down { steps } => {
            info!("Rolling back {} migration(s)", steps);
            Migrator::down(&db, Some(steps)).await?;
        }
        Commands::Status => {
            for migration in Migrator::get_migration_with_status(&db).await? {
                println!("{:<50} {}", migration.name(), migration.status());
            }
        }
        Commands::Fresh => {
            info!("Dropping all tables and re-applying migrations");
            Migrator::fresh(&db).await?;
        }
        Commands::Refresh => {
            info!("Refreshing migrations");
            Migrator::refresh(&db).await?;
        }
    }

    info!("Migration command completed successfully");
    Ok(())
}
