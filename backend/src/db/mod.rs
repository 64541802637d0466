//! Post persistence.
//!
//! The service layer only sees [`PostRepository`]; which store sits behind it
//! is decided once at startup by [`RepositoryFactory`].
//!
//! ```text
//! services::post ──► PostRepository (async handle)
//!                        │  in_transaction(UnitOfWork)
//!                        ▼
//!                    PostStore (one transaction)
//!                        │
//!          ┌─────────────┴──────────────┐
//!   LocalRepository               PostgresRepository
//!   BTreeMap + undo log           Diesel over an r2d2 pool
//! ```
//!
//! - `repository`: the store traits and [`RepositoryError`]
//! - `repositories`: the two stores
//! - `factory` / `repo_config`: store selection from env or `repository.toml`

#[cfg(not(any(feature = "postgres-repo", feature = "local-repo")))]
compile_error!("Enable at least one post store feature: `local-repo` or `postgres-repo`.");

pub mod factory;
pub mod repo_config;
pub mod repositories;
pub mod repository;

pub use factory::{RepositoryFactory, RepositoryType};
pub use repo_config::{PostgresConfig, RepositoryConfig};
pub use repositories::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use repositories::PostgresRepository;
pub use repository::{
    unit_of_work, PostRepository, PostStore, RepositoryError, RepositoryResult, UnitOfWork,
};
