//! # rusty-blog
//!
//! The entry point that assembles the blog server from configuration:
//! settings → logging → store → services → router → listener.

use anyhow::Context;
use api_adapters::{router, AppState, Metrics};
use auth_adapters::{PasswordScheme, SchemeHasher};
use configs::{LogFormat, LogSettings, PasswordSchemeKind, Settings, StorageBackend};
use services::{AuthService, CategoryService, CommentService, PostService};
use std::sync::Arc;
use storage_adapters::{InMemoryStore, Repositories};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    init_tracing(&settings.log);

    let repos = repositories(&settings).await?;
    let state = app_state(&settings, repos)?;
    let app = router(state, settings.server.body_limit_bytes);

    let address = settings.server.bind_address();
    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("failed to bind {address}"))?;
    tracing::info!(%address, backend = ?settings.storage.backend, "rusty-blog listening");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;
    Ok(())
}

/// `RUST_LOG` wins over `log.level` when set.
fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&log.level));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);
    match log.format {
        LogFormat::Json => builder.json().init(),
        LogFormat::Pretty => builder.init(),
    }
}

async fn repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    match settings.storage.backend {
        StorageBackend::Memory => {
            tracing::warn!("using the in-memory store; data is lost on shutdown");
            Ok(Repositories::from_store(Arc::new(InMemoryStore::new())))
        }
        StorageBackend::Postgres => postgres_repositories(settings).await,
    }
}

#[cfg(feature = "db-postgres")]
async fn postgres_repositories(settings: &Settings) -> anyhow::Result<Repositories> {
    use secrecy::ExposeSecret;
    use storage_adapters::PostgresStore;

    let db = &settings.database;
    let url = db.url.as_ref().context("database.url is not set")?;
    let store = PostgresStore::connect(url.expose_secret(), db.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    tracing::info!(max_connections = db.max_connections, "database pool ready");

    if db.run_migrations {
        store.migrate().await.context("failed to run migrations")?;
        tracing::info!("database migrations applied");
    }
    Ok(Repositories::from_store(Arc::new(store)))
}

#[cfg(not(feature = "db-postgres"))]
async fn postgres_repositories(_settings: &Settings) -> anyhow::Result<Repositories> {
    anyhow::bail!("storage.backend = \"postgres\" needs the `db-postgres` feature")
}

fn app_state(settings: &Settings, repos: Repositories) -> anyhow::Result<AppState> {
    let auth = &settings.auth;
    let scheme = match auth.password_scheme {
        PasswordSchemeKind::Bcrypt => PasswordScheme::Bcrypt {
            cost: auth.bcrypt_cost,
        },
        PasswordSchemeKind::Argon2 => PasswordScheme::Argon2,
    };

    Ok(AppState {
        auth: Arc::new(AuthService::new(
            repos.users,
            Arc::new(SchemeHasher::new(scheme)),
            token_issuer(settings)?,
        )),
        posts: Arc::new(PostService::new(repos.posts)),
        comments: Arc::new(CommentService::new(repos.comments)),
        categories: Arc::new(CategoryService::new(repos.categories)),
        metrics: Arc::new(Metrics::new()),
    })
}

#[cfg(feature = "auth-jwt")]
fn token_issuer(settings: &Settings) -> anyhow::Result<Arc<dyn domains::TokenIssuer>> {
    let secret = settings.auth.jwt_secret()?;
    Ok(Arc::new(auth_adapters::JwtTokenIssuer::new(
        secret.as_bytes(),
        settings.auth.token_ttl_secs,
    )))
}

#[cfg(not(feature = "auth-jwt"))]
fn token_issuer(_settings: &Settings) -> anyhow::Result<Arc<dyn domains::TokenIssuer>> {
    anyhow::bail!("login tokens need the `auth-jwt` feature")
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
    }
    tracing::info!("shutting down");
}
