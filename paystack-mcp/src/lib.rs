//! MCP server exposing the Paystack payment API as callable tools.
//!
//! The crate splits into two halves. [`dispatch::ToolDispatcher`] is the
//! protocol-agnostic core: it owns the tool [`catalog`], validates
//! arguments against each tool's [`schema`], routes to a
//! [`gateway::PaymentGateway`], and folds every failure mode into the
//! [`error::ToolOutcome`] envelope. [`rpc`] is the thin MCP transport
//! over stdio that serializes those outcomes for clients.
//!
//! The dispatcher can be embedded without the stdio transport:
//!
//! ```rust,no_run
//! use std::sync::Arc;
//!
//! use paystack::client::PaystackClient;
//! use paystack::config::PaystackConfig;
//! use paystack_mcp::dispatch::ToolDispatcher;
//!
//! # async fn demo() -> Result<(), Box<dyn std::error::Error>> {
//! let client = PaystackClient::new(PaystackConfig::from_env()?)?;
//! let dispatcher = ToolDispatcher::new(Arc::new(client));
//!
//! let args = serde_json::json!({"reference": "tx-123"});
//! let outcome = dispatcher
//!     .call_tool("verify_transaction", args.as_object().cloned().unwrap())
//!     .await;
//! # let _ = outcome;
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod dispatch;
pub mod error;
pub mod gateway;
pub mod rpc;
pub mod schema;
