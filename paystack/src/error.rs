//! Typed failure modes for the gateway client.
//!
//! Every client operation fails with exactly one [`PaystackError`]
//! variant: a structured upstream rejection, a transport-level failure
//! with no response, a response that is not a parseable
//! `{status, message, data}` envelope, or a URL construction error.
//!
//! The secret key never appears in any error message or source chain.

/// Errors that can occur while talking to the Paystack API.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum PaystackError {
    /// Paystack returned a structured failure: a non-2xx status, or a
    /// 2xx body with `status: false`. Carries the envelope message
    /// verbatim.
    #[error("Paystack API error (HTTP {status}): {message}")]
    Api {
        /// HTTP status code of the response.
        status: u16,
        /// The envelope's `message` field, unmodified.
        message: String,
    },

    /// No response was obtained: DNS failure, connection refusal, or
    /// request timeout.
    #[error("transport error: {context}: {source}")]
    Transport {
        /// Human-readable request context (e.g. `"POST /transaction/initialize"`).
        context: &'static str,
        /// The underlying reqwest error.
        #[source]
        source: reqwest::Error,
    },

    /// A response body was received but is not a parseable Paystack
    /// envelope.
    #[error("malformed response body: {context}")]
    MalformedResponse {
        /// Human-readable request context.
        context: &'static str,
        /// The raw response body, for diagnostics.
        raw: String,
    },

    /// Endpoint URL construction failed.
    #[error("URL parse error: {context}: {source}")]
    UrlParse {
        /// Human-readable context.
        context: &'static str,
        /// The underlying parse error.
        #[source]
        source: url::ParseError,
    },

    /// The secret key contains characters that cannot appear in an
    /// HTTP header.
    #[error("secret key is not a valid header value")]
    InvalidSecretKey,
}

impl PaystackError {
    /// Returns the upstream HTTP status, if this is an [`PaystackError::Api`] error.
    #[must_use]
    pub const fn api_status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}
