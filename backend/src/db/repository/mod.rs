//! Repository trait definitions for database operations.
//!
//! # Module Organization
//!
//! - [`error`]: Error types for repository operations
//! - [`post`]: Post store and repository traits

pub mod error;
pub mod post;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};
pub use post::{unit_of_work, PostRepository, PostStore, UnitOfWork};
