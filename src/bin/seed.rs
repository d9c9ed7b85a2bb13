use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use dotenvy::dotenv;
use sqlx::postgres::PgPoolOptions;

use fyyur_server::{db, seed};

/// Load artists.csv, venues.csv and shows.csv into the listings database.
#[derive(Debug, Parser)]
#[command(name = "fyyur-seed", version)]
struct Args {
    /// Directory holding the CSV files.
    #[arg(default_value = "seed_data")]
    dir: PathBuf,

    #[arg(long, env = "DATABASE_URL")]
    database_url: String,

    /// Apply pending migrations before loading.
    #[arg(long)]
    migrate: bool,
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenv().ok();
    tracing_subscriber::fmt::init();

    let args = Args::parse();

    let pool = match PgPoolOptions::new()
        .max_connections(1)
        .connect(&args.database_url)
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!(error = %e, "Failed to connect to database");
            return ExitCode::FAILURE;
        }
    };

    if args.migrate {
        if let Err(e) = db::run_migrations(&pool).await {
            tracing::error!(error = %e, "Failed to run migrations");
            return ExitCode::FAILURE;
        }
    }

    match seed::load_directory(&pool, &args.dir).await {
        Ok(report) => {
            for (table, rows) in report.rows {
                println!("{table}: {rows} rows");
            }
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!(error = %e, "Seeding failed, nothing was committed");
            ExitCode::FAILURE
        }
    }
}
