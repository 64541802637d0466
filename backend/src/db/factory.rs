//! Builds the post store chosen at startup.
//!
//! The store is handed to the service layer as an explicit constructor
//! argument; nothing here is global.

use std::path::Path;
use std::str::FromStr;
use std::sync::Arc;

use super::repo_config::{PostgresConfig, RepositoryConfig};
use super::repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
use super::repositories::PostgresRepository;
use super::repository::{PostRepository, RepositoryError, RepositoryResult};

/// Which post store backs the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// Postgres through Diesel
    Postgres,
    /// In-memory map, lost on restart
    Local,
}

impl FromStr for RepositoryType {
    type Err = RepositoryError;

    /// Accepts `local`, `postgres` or `pg`, in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "pg" => Ok(Self::Postgres),
            "local" => Ok(Self::Local),
            _ => Err(RepositoryError::configuration(format!(
                "unknown post store '{}', expected 'local' or 'postgres'",
                s
            ))),
        }
    }
}

impl RepositoryType {
    /// Pick the store from the environment.
    ///
    /// `REPOSITORY_TYPE` wins when set and must name a known store. Without
    /// it, a `DATABASE_URL` or `PG_DATABASE_URL` selects Postgres and
    /// anything else selects the local store.
    pub fn from_env() -> RepositoryResult<Self> {
        if let Ok(value) = std::env::var("REPOSITORY_TYPE") {
            return value.parse();
        }

        let has_url = ["DATABASE_URL", "PG_DATABASE_URL"]
            .iter()
            .any(|name| std::env::var_os(name).is_some());
        Ok(if has_url { Self::Postgres } else { Self::Local })
    }
}

/// Post store construction.
///
/// # Example
/// ```ignore
/// use board::db::{RepositoryFactory, RepositoryType};
///
/// # async fn run() -> Result<(), board::db::RepositoryError> {
/// let store = RepositoryFactory::create(RepositoryType::Local, None).await?;
/// assert!(store.health_check().await?);
/// # Ok(())
/// # }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Build a store of the given type. Postgres needs its settings.
    pub async fn create(
        repo_type: RepositoryType,
        postgres: Option<&PostgresConfig>,
    ) -> RepositoryResult<Arc<dyn PostRepository>> {
        match repo_type {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => {
                let config = postgres.ok_or_else(|| {
                    RepositoryError::configuration("postgres store requested without settings")
                })?;
                Self::connect_postgres(config).await
            }
        }
    }

    pub fn create_local() -> Arc<dyn PostRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Connect to Postgres and apply pending migrations.
    #[cfg(feature = "postgres-repo")]
    pub async fn create_postgres(
        config: &PostgresConfig,
    ) -> RepositoryResult<Arc<PostgresRepository>> {
        let config = config.clone();
        let repo = tokio::task::spawn_blocking(move || PostgresRepository::new(config))
            .await
            .map_err(|e| RepositoryError::internal(format!("postgres setup task failed: {}", e)))??;
        Ok(Arc::new(repo))
    }

    #[cfg(feature = "postgres-repo")]
    async fn connect_postgres(config: &PostgresConfig) -> RepositoryResult<Arc<dyn PostRepository>> {
        let repo: Arc<dyn PostRepository> = Self::create_postgres(config).await?;
        Ok(repo)
    }

    #[cfg(not(feature = "postgres-repo"))]
    async fn connect_postgres(_config: &PostgresConfig) -> RepositoryResult<Arc<dyn PostRepository>> {
        Err(RepositoryError::configuration(
            "postgres store requested but the crate was built without `postgres-repo`",
        ))
    }

    /// Build the store selected by [`RepositoryType::from_env`], reading
    /// Postgres settings from [`PostgresConfig::from_env`] when needed.
    pub async fn from_env() -> RepositoryResult<Arc<dyn PostRepository>> {
        match RepositoryType::from_env()? {
            RepositoryType::Local => Ok(Self::create_local()),
            RepositoryType::Postgres => Self::connect_postgres(&PostgresConfig::from_env()?).await,
        }
    }

    /// Build the store described by a `repository.toml`.
    pub async fn from_config_file<P: AsRef<Path>>(
        path: P,
    ) -> RepositoryResult<Arc<dyn PostRepository>> {
        let config = RepositoryConfig::from_file(path)?;
        Self::create(config.backend()?, config.postgres()?).await
    }
}
