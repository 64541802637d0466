//! Post store implementations.
//!
//! - `local`: in-memory, for tests and local development
//! - `postgres`: Diesel-backed, behind the `postgres-repo` feature

pub mod local;
#[cfg(feature = "postgres-repo")]
pub mod postgres;

pub use local::LocalRepository;
#[cfg(feature = "postgres-repo")]
pub use postgres::PostgresRepository;
