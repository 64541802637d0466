//! Error type shared by the post stores.
//!
//! A [`RepositoryError`] names what went wrong; the attached [`ErrorContext`]
//! records where (store operation) and on which post.

use std::fmt;

use crate::api::PostId;

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

/// Where a store failure happened.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ErrorContext {
    /// Store operation, e.g. `"save"` or `"find_all"`
    pub operation: Option<&'static str>,
    /// Post the operation targeted
    pub post_id: Option<PostId>,
    /// Backend-specific detail (SQL error kind, pool state, ...)
    pub details: Option<String>,
}

impl ErrorContext {
    fn is_empty(&self) -> bool {
        self.operation.is_none() && self.post_id.is_none() && self.details.is_none()
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return Ok(());
        }
        f.write_str(" (")?;
        let mut sep = "";
        if let Some(op) = self.operation {
            write!(f, "{sep}in {op}")?;
            sep = ", ";
        }
        if let Some(id) = self.post_id {
            write!(f, "{sep}postId={id}")?;
            sep = ", ";
        }
        if let Some(details) = &self.details {
            write!(f, "{sep}{details}")?;
        }
        f.write_str(")")
    }
}

/// Failure reported by a post store.
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    /// The store could not be reached or a connection could not be checked out.
    #[error("store unavailable: {message}{context}")]
    Unavailable {
        message: String,
        context: ErrorContext,
    },

    /// A statement failed inside a reachable store.
    #[error("query failed: {message}{context}")]
    Query {
        message: String,
        context: ErrorContext,
    },

    /// The targeted post does not exist.
    #[error("{message}{context}")]
    NotFound {
        message: String,
        context: ErrorContext,
    },

    /// The store selection or its settings are invalid.
    #[error("invalid store configuration: {0}")]
    Configuration(String),

    /// Commit or rollback itself failed.
    #[error("transaction failed: {message}{context}")]
    Transaction {
        message: String,
        context: ErrorContext,
    },

    /// Broken invariant inside the store layer.
    #[error("internal store error: {message}{context}")]
    Internal {
        message: String,
        context: ErrorContext,
    },
}

impl RepositoryError {
    pub fn unavailable(message: impl Into<String>) -> Self {
        Self::Unavailable {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn query(message: impl Into<String>) -> Self {
        Self::Query {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    /// The not-found error for a post id, with the message shown to API clients.
    pub fn post_not_found(post_id: PostId) -> Self {
        Self::NotFound {
            message: format!("no post found for postId={}", post_id),
            context: ErrorContext {
                post_id: Some(post_id),
                ..ErrorContext::default()
            },
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration(message.into())
    }

    pub fn transaction(message: impl Into<String>) -> Self {
        Self::Transaction {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn internal(message: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            context: ErrorContext::default(),
        }
    }

    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// The bare message, without the context suffix.
    pub fn message(&self) -> &str {
        match self {
            Self::Unavailable { message, .. }
            | Self::Query { message, .. }
            | Self::NotFound { message, .. }
            | Self::Transaction { message, .. }
            | Self::Internal { message, .. }
            | Self::Configuration(message) => message,
        }
    }

    /// Context of the failure. Configuration errors carry none.
    pub fn context(&self) -> Option<&ErrorContext> {
        match self {
            Self::Unavailable { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Transaction { context, .. }
            | Self::Internal { context, .. } => Some(context),
            Self::Configuration(_) => None,
        }
    }

    fn context_slot(&mut self) -> Option<&mut ErrorContext> {
        match self {
            Self::Unavailable { context, .. }
            | Self::Query { context, .. }
            | Self::NotFound { context, .. }
            | Self::Transaction { context, .. }
            | Self::Internal { context, .. } => Some(context),
            Self::Configuration(_) => None,
        }
    }

    /// Record the store operation, keeping one already recorded.
    pub fn in_operation(mut self, operation: &'static str) -> Self {
        if let Some(context) = self.context_slot() {
            context.operation.get_or_insert(operation);
        }
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        if let Some(context) = self.context_slot() {
            context.details = Some(details.into());
        }
        self
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::result::Error> for RepositoryError {
    fn from(err: diesel::result::Error) -> Self {
        use diesel::result::Error;

        match err {
            Error::DatabaseError(kind, info) => {
                RepositoryError::query(info.message()).with_details(format!("{:?}", kind))
            }
            tx @ (Error::RollbackTransaction | Error::BrokenTransactionManager) => {
                RepositoryError::transaction(tx.to_string())
            }
            Error::DeserializationError(e) => {
                RepositoryError::internal(format!("cannot decode post row: {}", e))
            }
            other => RepositoryError::query(other.to_string()),
        }
    }
}

#[cfg(feature = "postgres-repo")]
impl From<diesel::r2d2::PoolError> for RepositoryError {
    fn from(err: diesel::r2d2::PoolError) -> Self {
        RepositoryError::unavailable(err.to_string()).with_details("connection pool")
    }
}
