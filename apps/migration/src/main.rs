//! Migration CLI tool.
//!
//! Reads `DATABASE_URL` from the environment (or `.env`) and accepts the usual
//! `up`, `down`, `status`, `fresh`, `refresh` and `reset` subcommands.

use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,sea_orm_migration=info".into()),
        )
        .init();

    cli::run_cli(migration::Migrator).await;
}
