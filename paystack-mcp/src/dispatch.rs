//! The tool dispatcher.
//!
//! [`ToolDispatcher`] owns the routing from `(tool name, arguments)` to
//! one gateway call and the normalization of every outcome into the
//! [`ToolOutcome`] envelope:
//!
//! 1. Catalog lookup — miss is a terminal `UnknownTool` failure.
//! 2. Schema validation + defaults — failures never reach the gateway.
//! 3. Typed-argument conversion — a fault here is an `InternalError`.
//! 4. Gateway invocation — the only suspending step.
//! 5. Envelope construction — upstream messages pass through verbatim.
//!
//! Each invocation is stateless and independent; the only shared state
//! is the immutable catalog and the gateway's immutable configuration,
//! so any number of calls may run concurrently.

use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use paystack::types::{
    NewCustomer, NewPlan, Pagination, RefundRequest, TransactionQuery, TransactionRequest,
};

use crate::catalog;
use crate::error::{ToolError, ToolOutcome};
use crate::gateway::PaymentGateway;
use crate::schema::ToolDefinition;

/// Routes validated tool calls to the payment gateway.
///
/// Cheap to clone; clones share the same gateway.
#[derive(Clone)]
pub struct ToolDispatcher {
    gateway: Arc<dyn PaymentGateway>,
}

impl std::fmt::Debug for ToolDispatcher {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToolDispatcher").finish_non_exhaustive()
    }
}

/// Arguments for `verify_transaction`.
#[derive(serde::Deserialize)]
struct VerifyArgs {
    reference: String,
}

/// Arguments for `list_banks`.
#[derive(serde::Deserialize)]
struct BanksArgs {
    country: String,
}

/// Arguments for `resolve_account`.
#[derive(serde::Deserialize)]
struct ResolveArgs {
    account_number: String,
    bank_code: String,
}

impl ToolDispatcher {
    /// Creates a dispatcher over the given gateway.
    #[must_use]
    pub fn new(gateway: Arc<dyn PaymentGateway>) -> Self {
        Self { gateway }
    }

    /// Returns the tool catalog for capability discovery.
    ///
    /// The catalog is a process-lifetime static: repeated calls return
    /// the same definitions regardless of any interleaved invocations.
    #[must_use]
    pub fn list_tools(&self) -> &'static [ToolDefinition] {
        catalog::catalog()
    }

    /// Invokes a tool by name and normalizes the outcome.
    ///
    /// Never panics and never returns a raw error: every failure mode
    /// is folded into the [`ToolOutcome::Failure`] envelope at this
    /// boundary.
    pub async fn call_tool(&self, name: &str, arguments: Map<String, Value>) -> ToolOutcome {
        match self.dispatch(name, arguments).await {
            Ok(payload) => ToolOutcome::Success { payload },
            Err(err) => err.into_outcome(),
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        arguments: Map<String, Value>,
    ) -> Result<Value, ToolError> {
        let tool = catalog::find(name).ok_or_else(|| ToolError::UnknownTool {
            name: name.to_owned(),
        })?;
        let validated = Value::Object(tool.validate(&arguments)?);

        let gateway = &*self.gateway;
        let result = match tool.name {
            "initialize_transaction" => {
                let request: TransactionRequest = decode(validated)?;
                gateway.initialize_transaction(request).await
            }
            "verify_transaction" => {
                let args: VerifyArgs = decode(validated)?;
                gateway.verify_transaction(args.reference).await
            }
            "list_transactions" => {
                let query: TransactionQuery = decode(validated)?;
                gateway.list_transactions(query).await
            }
            "create_customer" => {
                let customer: NewCustomer = decode(validated)?;
                gateway.create_customer(customer).await
            }
            "list_customers" => {
                let page: Pagination = decode(validated)?;
                gateway.list_customers(page).await
            }
            "create_plan" => {
                let plan: NewPlan = decode(validated)?;
                gateway.create_plan(plan).await
            }
            "list_plans" => {
                let page: Pagination = decode(validated)?;
                gateway.list_plans(page).await
            }
            "list_banks" => {
                let args: BanksArgs = decode(validated)?;
                gateway.list_banks(args.country).await
            }
            "resolve_account" => {
                let args: ResolveArgs = decode(validated)?;
                gateway.resolve_account(args.account_number, args.bank_code).await
            }
            "create_refund" => {
                let refund: RefundRequest = decode(validated)?;
                gateway.create_refund(refund).await
            }
            // The catalog and this match are maintained together; a name
            // present in one but not the other is a programming error.
            other => {
                return Err(ToolError::Internal(format!(
                    "tool {other} has no gateway route"
                )));
            }
        };

        result.map_err(ToolError::from)
    }
}

/// Converts a validated argument object into its typed request.
///
/// Validation has already passed, so a conversion fault here is an
/// internal inconsistency between the schema and the wire types, not a
/// caller error.
fn decode<T: DeserializeOwned>(validated: Value) -> Result<T, ToolError> {
    serde_json::from_value(validated)
        .map_err(|e| ToolError::Internal(format!("argument conversion failed: {e}")))
}
