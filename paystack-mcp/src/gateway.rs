//! The dispatcher's seam to the upstream client.
//!
//! [`PaymentGateway`] is dyn-compatible (methods return [`BoxFuture`])
//! so the dispatcher can hold `Arc<dyn PaymentGateway>` and tests can
//! substitute a stub without touching the network.

use std::future::Future;
use std::pin::Pin;

use serde_json::Value;

use paystack::client::PaystackClient;
use paystack::error::PaystackError;
use paystack::types::{
    NewCustomer, NewPlan, Pagination, RefundRequest, TransactionQuery, TransactionRequest,
};

/// Boxed future used for dyn-compatible async trait methods.
pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Gateway result alias: the upstream `data` payload, or a typed error.
pub type GatewayResult<'a> = BoxFuture<'a, Result<Value, PaystackError>>;

/// One method per catalog tool, taking pre-validated, domain-typed
/// arguments.
pub trait PaymentGateway: Send + Sync {
    /// Initializes a payment transaction.
    fn initialize_transaction(&self, request: TransactionRequest) -> GatewayResult<'_>;

    /// Verifies a transaction by reference.
    fn verify_transaction(&self, reference: String) -> GatewayResult<'_>;

    /// Lists transactions with filters.
    fn list_transactions(&self, query: TransactionQuery) -> GatewayResult<'_>;

    /// Creates a customer.
    fn create_customer(&self, customer: NewCustomer) -> GatewayResult<'_>;

    /// Lists customers.
    fn list_customers(&self, page: Pagination) -> GatewayResult<'_>;

    /// Creates a subscription plan.
    fn create_plan(&self, plan: NewPlan) -> GatewayResult<'_>;

    /// Lists subscription plans.
    fn list_plans(&self, page: Pagination) -> GatewayResult<'_>;

    /// Lists supported banks for a country.
    fn list_banks(&self, country: String) -> GatewayResult<'_>;

    /// Resolves a bank account number.
    fn resolve_account(&self, account_number: String, bank_code: String) -> GatewayResult<'_>;

    /// Creates a refund.
    fn create_refund(&self, refund: RefundRequest) -> GatewayResult<'_>;
}

impl PaymentGateway for PaystackClient {
    fn initialize_transaction(&self, request: TransactionRequest) -> GatewayResult<'_> {
        Box::pin(async move { Self::initialize_transaction(self, &request).await })
    }

    fn verify_transaction(&self, reference: String) -> GatewayResult<'_> {
        Box::pin(async move { Self::verify_transaction(self, &reference).await })
    }

    fn list_transactions(&self, query: TransactionQuery) -> GatewayResult<'_> {
        Box::pin(async move { Self::list_transactions(self, &query).await })
    }

    fn create_customer(&self, customer: NewCustomer) -> GatewayResult<'_> {
        Box::pin(async move { Self::create_customer(self, &customer).await })
    }

    fn list_customers(&self, page: Pagination) -> GatewayResult<'_> {
        Box::pin(async move { Self::list_customers(self, &page).await })
    }

    fn create_plan(&self, plan: NewPlan) -> GatewayResult<'_> {
        Box::pin(async move { Self::create_plan(self, &plan).await })
    }

    fn list_plans(&self, page: Pagination) -> GatewayResult<'_> {
        Box::pin(async move { Self::list_plans(self, &page).await })
    }

    fn list_banks(&self, country: String) -> GatewayResult<'_> {
        Box::pin(async move { Self::list_banks(self, &country).await })
    }

    fn resolve_account(&self, account_number: String, bank_code: String) -> GatewayResult<'_> {
        Box::pin(async move { Self::resolve_account(self, &account_number, &bank_code).await })
    }

    fn create_refund(&self, refund: RefundRequest) -> GatewayResult<'_> {
        Box::pin(async move { Self::create_refund(self, &refund).await })
    }
}
