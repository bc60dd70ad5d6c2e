//! Migration CLI tool for the posts database.
//!
//! Reads `DATABASE_URL` from the environment (or `.env`).

use sea_orm_migration::prelude::*;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    cli::run_cli(migration::Migrator).await;
}
