//! # seed
//!
//! Maintenance tasks against the configured PostgreSQL database:
//!
//! ```text
//! seed categories          # insert the default categories that are missing
//! seed admin <USER_ID>     # promote a user to admin
//! ```

use anyhow::Context;
use auth_adapters::{JwtTokenIssuer, PasswordScheme, SchemeHasher};
use clap::{Parser, Subcommand};
use configs::{Settings, StorageBackend};
use secrecy::ExposeSecret;
use services::{AuthService, CategoryService};
use std::sync::Arc;
use storage_adapters::{PostgresStore, Repositories};
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

#[derive(Parser)]
#[command(name = "seed", version, about = "Seeds and administers the blog database")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Insert every default category that is not present yet
    Categories,
    /// Grant admin rights to an existing user
    Admin {
        /// Id of the user to promote
        user_id: Uuid,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let settings = Settings::load().context("failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.level)),
        )
        .init();

    if settings.storage.backend != StorageBackend::Postgres {
        anyhow::bail!("seeding needs storage.backend = \"postgres\"");
    }
    let db = &settings.database;
    let url = db.url.as_ref().context("database.url is not set")?;
    let store = PostgresStore::connect(url.expose_secret(), db.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    if db.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
    }
    let repos = Repositories::from_store(Arc::new(store));

    match cli.command {
        Command::Categories => {
            let created = CategoryService::new(repos.categories)
                .seed_defaults()
                .await
                .context("failed to seed categories")?;
            tracing::info!(created, "categories seeded");
        }
        Command::Admin { user_id } => {
            // Promotion never hashes or signs, but the service wants both.
            let auth = AuthService::new(
                repos.users,
                Arc::new(SchemeHasher::new(PasswordScheme::default())),
                Arc::new(JwtTokenIssuer::new(
                    settings.auth.jwt_secret()?.as_bytes(),
                    settings.auth.token_ttl_secs,
                )),
            );
            let admin = auth
                .grant_admin(user_id)
                .await
                .with_context(|| format!("failed to promote user {user_id}"))?;
            tracing::info!(%user_id, admin_id = %admin.id, "user promoted to admin");
        }
    }
    Ok(())
}
