//! Service layer for business logic and orchestration.
//!
//! Services sit between the HTTP handlers and the repository. They translate
//! transfer shapes to entities, enforce existence checks and own the
//! transaction boundary of every mutating operation.

pub mod error;
pub mod post;

pub use error::{ServiceError, ServiceResult};
pub use post::{PostService, PostServiceImpl};
