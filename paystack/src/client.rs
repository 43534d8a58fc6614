//! The HTTP gateway client.
//!
//! [`PaystackClient`] translates logical operations ("initialize a
//! transaction with these fields") into authenticated HTTP exchanges
//! with the Paystack API, and translates each raw outcome into the
//! envelope's `data` payload or a typed [`PaystackError`].
//!
//! ## Behavior
//!
//! - Uses a single pooled `reqwest` client shared across concurrent calls
//! - Bearer authentication via a sensitive header; the key never rides
//!   in query strings or bodies
//! - Every request is bounded by a timeout (default 30 seconds)
//! - One request per call: no retries, no caching

use std::time::Duration;

use reqwest::header::{AUTHORIZATION, HeaderValue};
use reqwest::{Method, StatusCode};
use serde::Serialize;
use url::Url;

use crate::config::{Environment, PaystackConfig};
use crate::error::PaystackError;
use crate::types::{
    ApiEnvelope, NewCustomer, NewPlan, Pagination, RefundQuery, RefundRequest, TransactionQuery,
    TransactionRequest,
};

/// Async client for the Paystack API.
///
/// Cheap to clone; clones share the underlying connection pool.
#[derive(Clone)]
pub struct PaystackClient {
    /// Base URL, normalized to end with a single `/`.
    base_url: Url,
    /// Shared reqwest HTTP client.
    client: reqwest::Client,
    /// Pre-built bearer header, marked sensitive.
    auth: HeaderValue,
    /// Target environment (informational).
    environment: Environment,
    /// Per-request timeout.
    timeout: Duration,
}

impl std::fmt::Debug for PaystackClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PaystackClient")
            .field("base_url", &self.base_url.as_str())
            .field("environment", &self.environment)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

impl PaystackClient {
    /// Default per-request timeout.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

    /// Constructs a client from a resolved configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError::UrlParse`] if the configured base URL is
    /// invalid, and [`PaystackError::InvalidSecretKey`] if the key cannot
    /// be carried in an HTTP header.
    pub fn new(config: PaystackConfig) -> Result<Self, PaystackError> {
        // Normalize: strip trailing slashes and add a single trailing slash
        // so endpoint joins resolve relative to the full base path.
        let mut normalized = config.base_url.trim_end_matches('/').to_owned();
        normalized.push('/');
        let base_url = Url::parse(&normalized).map_err(|e| PaystackError::UrlParse {
            context: "failed to parse base url",
            source: e,
        })?;

        let mut auth = HeaderValue::from_str(&format!("Bearer {}", config.secret_key))
            .map_err(|_| PaystackError::InvalidSecretKey)?;
        auth.set_sensitive(true);

        Ok(Self {
            base_url,
            client: reqwest::Client::new(),
            auth,
            environment: config.environment,
            timeout: Self::DEFAULT_TIMEOUT,
        })
    }

    /// Returns the base URL used by this client.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Returns the target environment.
    #[must_use]
    pub const fn environment(&self) -> Environment {
        self.environment
    }

    /// Sets the per-request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    // --- Transactions -----------------------------------------------------

    /// Initializes a transaction and returns the checkout payload
    /// (`authorization_url`, `access_code`, `reference`).
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn initialize_transaction(
        &self,
        request: &TransactionRequest,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::POST,
            "transaction/initialize",
            "POST /transaction/initialize",
            Some(request),
            None::<&()>,
        )
        .await
    }

    /// Verifies a transaction by reference and returns its detail payload.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn verify_transaction(
        &self,
        reference: &str,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            &format!("transaction/verify/{reference}"),
            "GET /transaction/verify/{reference}",
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    /// Lists transactions with optional filters, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn list_transactions(
        &self,
        query: &TransactionQuery,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            "transaction",
            "GET /transaction",
            None::<&()>,
            Some(query),
        )
        .await
    }

    /// Fetches a single transaction by numeric ID.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn get_transaction(&self, id: u64) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            &format!("transaction/{id}"),
            "GET /transaction/{id}",
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    // --- Customers --------------------------------------------------------

    /// Creates a customer and returns the customer record.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn create_customer(
        &self,
        customer: &NewCustomer,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::POST,
            "customer",
            "POST /customer",
            Some(customer),
            None::<&()>,
        )
        .await
    }

    /// Lists customers, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn list_customers(
        &self,
        page: &Pagination,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            "customer",
            "GET /customer",
            None::<&()>,
            Some(page),
        )
        .await
    }

    /// Fetches a customer by customer code.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn get_customer(&self, code: &str) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            &format!("customer/{code}"),
            "GET /customer/{code}",
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    /// Updates a customer by customer code.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn update_customer(
        &self,
        code: &str,
        customer: &NewCustomer,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::PUT,
            &format!("customer/{code}"),
            "PUT /customer/{code}",
            Some(customer),
            None::<&()>,
        )
        .await
    }

    // --- Plans ------------------------------------------------------------

    /// Creates a subscription plan and returns the plan record.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn create_plan(&self, plan: &NewPlan) -> Result<serde_json::Value, PaystackError> {
        self.send_json(Method::POST, "plan", "POST /plan", Some(plan), None::<&()>)
            .await
    }

    /// Lists subscription plans, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn list_plans(&self, page: &Pagination) -> Result<serde_json::Value, PaystackError> {
        self.send_json(Method::GET, "plan", "GET /plan", None::<&()>, Some(page))
            .await
    }

    /// Fetches a plan by plan code.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn get_plan(&self, code: &str) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            &format!("plan/{code}"),
            "GET /plan/{code}",
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    // --- Banks ------------------------------------------------------------

    /// Lists supported banks for a country.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn list_banks(&self, country: &str) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            "bank",
            "GET /bank",
            None::<&()>,
            Some(&[("country", country)]),
        )
        .await
    }

    /// Resolves an account number against a bank code, returning
    /// `account_name` and `account_number`.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn resolve_account(
        &self,
        account_number: &str,
        bank_code: &str,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            "bank/resolve",
            "GET /bank/resolve",
            None::<&()>,
            Some(&[
                ("account_number", account_number),
                ("bank_code", bank_code),
            ]),
        )
        .await
    }

    // --- Refunds ----------------------------------------------------------

    /// Creates a refund for a transaction and returns the refund record.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn create_refund(
        &self,
        refund: &RefundRequest,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::POST,
            "refund",
            "POST /refund",
            Some(refund),
            None::<&()>,
        )
        .await
    }

    /// Lists refunds with optional filters, paginated.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn list_refunds(
        &self,
        query: &RefundQuery,
    ) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            "refund",
            "GET /refund",
            None::<&()>,
            Some(query),
        )
        .await
    }

    /// Fetches a refund by numeric ID.
    ///
    /// # Errors
    ///
    /// Returns [`PaystackError`] on any upstream or transport failure.
    pub async fn get_refund(&self, id: u64) -> Result<serde_json::Value, PaystackError> {
        self.send_json(
            Method::GET,
            &format!("refund/{id}"),
            "GET /refund/{id}",
            None::<&()>,
            None::<&()>,
        )
        .await
    }

    // --- Request plumbing ---------------------------------------------------

    /// Generic request helper: builds the authenticated request, applies
    /// the timeout, and unwraps the Paystack envelope.
    ///
    /// `context` is a human-readable identifier used in tracing and error
    /// messages (e.g. `"POST /transaction/initialize"`).
    async fn send_json<B, Q>(
        &self,
        method: Method,
        path: &str,
        context: &'static str,
        body: Option<&B>,
        query: Option<&Q>,
    ) -> Result<serde_json::Value, PaystackError>
    where
        B: Serialize + Sync + ?Sized,
        Q: Serialize + Sync + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .map_err(|e| PaystackError::UrlParse { context, source: e })?;

        let mut req = self
            .client
            .request(method, url)
            .header(AUTHORIZATION, self.auth.clone())
            .timeout(self.timeout);
        if let Some(query) = query {
            req = req.query(query);
        }
        if let Some(body) = body {
            req = req.json(body);
        }

        let response = req
            .send()
            .await
            .map_err(|e| PaystackError::Transport { context, source: e })?;

        let result = Self::unwrap_envelope(response, context).await;
        record_result(context, &result);
        result
    }

    /// Reads a response and applies the envelope contract: 2xx with
    /// `status: true` yields `data`, everything else is a typed error.
    async fn unwrap_envelope(
        response: reqwest::Response,
        context: &'static str,
    ) -> Result<serde_json::Value, PaystackError> {
        let status: StatusCode = response.status();
        let raw = response
            .text()
            .await
            .map_err(|e| PaystackError::Transport { context, source: e })?;

        let envelope: ApiEnvelope =
            serde_json::from_str(&raw).map_err(|_| PaystackError::MalformedResponse {
                context,
                raw: raw.clone(),
            })?;

        if status.is_success() && envelope.status {
            Ok(envelope.data.unwrap_or(serde_json::Value::Null))
        } else {
            Err(PaystackError::Api {
                status: status.as_u16(),
                message: envelope.message,
            })
        }
    }
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result(context: &'static str, result: &Result<serde_json::Value, PaystackError>) {
    match result {
        Ok(_) => tracing::debug!(request = context, "paystack request succeeded"),
        Err(err) => tracing::warn!(request = context, error = %err, "paystack request failed"),
    }
}

/// Noop when telemetry is off.
#[cfg(not(feature = "telemetry"))]
fn record_result(_context: &'static str, _result: &Result<serde_json::Value, PaystackError>) {}
