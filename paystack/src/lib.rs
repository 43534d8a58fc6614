//! Async client for the Paystack payment API.
//!
//! This crate owns outbound HTTP communication with Paystack: it builds
//! authenticated requests, serializes bodies, deserializes the
//! `{status, message, data}` response envelope, and maps transport and
//! HTTP failures into typed errors.
//!
//! # Overview
//!
//! Construct an immutable [`config::PaystackConfig`] (usually from the
//! environment) and hand it to [`client::PaystackClient`]. Every
//! operation returns the envelope's `data` payload on success:
//!
//! ```rust,no_run
//! use paystack::client::PaystackClient;
//! use paystack::config::PaystackConfig;
//! use paystack::types::TransactionRequest;
//!
//! # async fn run() -> Result<(), paystack::error::PaystackError> {
//! let config = PaystackConfig::new("sk_test_xxx");
//! let client = PaystackClient::new(config)?;
//!
//! let init = client
//!     .initialize_transaction(&TransactionRequest::new("customer@example.com", 50_000))
//!     .await?;
//! println!("{}", init["authorization_url"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - Resolved configuration (secret key, environment, base URL)
//! - [`client`] - The HTTP gateway client
//! - [`error`] - Typed failure modes
//! - [`types`] - Request and response wire types
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation for outbound requests

pub mod client;
pub mod config;
pub mod error;
pub mod types;

/// Canonical Paystack API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.paystack.co";
