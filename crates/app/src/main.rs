//! `morty` -- browse characters from the public API and keep a local
//! collection of your own.
//!
//! # Environment variables
//!
//! | Variable               | Default                       | Description                  |
//! |------------------------|-------------------------------|------------------------------|
//! | `MORTY_API_BASE_URL`   | `https://rickandmortyapi.com` | Character API host           |
//! | `DATABASE_URL`         | `sqlite://characters.db`      | SQLite database of saved characters |
//! | `REQUEST_TIMEOUT_SECS` | `30`                          | HTTP request timeout         |
//! | `RUST_LOG`             | see [`DEFAULT_LOG_FILTER`]    | Log filter (logs go to stderr) |

use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use morty_app::cli::{self, Cli};
use morty_app::config::AppConfig;
use morty_app::repo::MainRepoImpl;
use morty_app::view_model::CharacterViewModel;
use morty_db::LocalStore;
use morty_remote::CharacterApi;

const DEFAULT_LOG_FILTER: &str = "morty_app=info,morty_db=info,morty_remote=info";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| DEFAULT_LOG_FILTER.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let pool = morty_db::create_pool(&config.database_url)
        .await
        .with_context(|| format!("Failed to open database {}", config.database_url))?;
    morty_db::health_check(&pool)
        .await
        .context("Database health check failed")?;
    morty_db::run_migrations(&pool)
        .await
        .context("Failed to prepare database schema")?;

    let api = CharacterApi::with_timeout(&config.api_base_url, config.request_timeout())
        .context("Failed to build HTTP client")?;
    let store = Arc::new(LocalStore::new(pool));
    let repo = Arc::new(MainRepoImpl::new(api, store));
    let vm = CharacterViewModel::new(repo);

    let mut stdout = std::io::stdout().lock();
    let mut stdin = std::io::stdin().lock();
    cli::run(&cli, &vm, &mut stdout, &mut stdin).await?;
    Ok(())
}
