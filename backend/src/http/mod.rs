//! HTTP server module for the board backend.
//!
//! This module provides an axum-based HTTP server that exposes the post
//! service as a REST API under `/api/v1/posts`.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                              │
//! │  - Request parsing and rejection mapping                 │
//! │  - JSON serialization/deserialization                    │
//! │  - CORS, compression, tracing, OpenAPI document          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service Layer (services::post)                          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Repository Layer (db/)                                  │
//! │  - LocalRepository / PostgresRepository                  │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod handlers;
pub mod openapi;
pub mod router;
pub mod state;

pub use openapi::ApiDoc;
pub use router::create_router;
pub use state::AppState;
