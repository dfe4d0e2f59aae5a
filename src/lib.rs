//! OpenPhone MCP Adapter - an HTTP adapter exposing the OpenPhone API to MCP agent clients.
//!
//! Each endpoint validates its input, makes one or a few calls to the upstream
//! OpenPhone REST API, and relays the result in a fixed JSON envelope.
//!
//! # Architecture
//!
//! - **config**: Configuration loaded once from environment variables
//! - **error**: Error types and the single HTTP error boundary
//! - **client**: Blocking upstream client and its async wrapper
//! - **metrics**: Counters for upstream calls and skipped search branches
//! - **models**: Request-scoped DTOs and upstream wire types
//! - **tools**: Search, fetch, messaging and directory operations
//! - **server**: axum router and handlers

pub mod client;
pub mod config;
pub mod error;
pub mod metrics;
pub mod models;
pub mod server;
pub mod tools;

pub use client::OpenPhoneClient;
pub use config::Config;
pub use error::{AdapterError, ConfigError, OpenPhoneApiError};
pub use metrics::{Metrics, MetricsSnapshot, UpstreamTimer};
pub use models::{ResourceType, SearchResult, UpstreamPage};
pub use server::OpenPhoneMcpServer;
pub use tools::{DirectoryTools, FetchTools, MessagingTools, SearchTools};
