//! # Board Backend
//!
//! Bulletin-board post service: create, read (single and paged), update and
//! delete posts over a REST API.
//!
//! ## Architecture
//!
//! The crate is organized into several logical modules:
//!
//! - [`api`]: Data Transfer Objects (DTOs) for API requests and responses
//! - [`models`]: The post entity
//! - [`db`]: Repository pattern and persistence layer (in-memory and Postgres)
//! - [`services`]: Post service, transaction boundaries and not-found checks
//! - [`config`]: Server and pagination configuration
//! - [`http`]: Axum-based HTTP server and request handlers

pub mod api;
pub mod config;
pub mod db;
pub mod models;
pub mod services;

#[cfg(feature = "http-server")]
pub mod http;
