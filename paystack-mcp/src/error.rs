//! Failure taxonomy and the uniform result envelope.
//!
//! Every tool invocation resolves to a [`ToolOutcome`]: exactly one of
//! `Success` or `Failure`, distinguishable by the `outcome` tag alone.
//! Internally the dispatcher propagates [`ToolError`] and converts it
//! once, at the call boundary — no fault escapes `call_tool`.

use serde::{Deserialize, Serialize};

use paystack::error::PaystackError;

/// Machine-matchable classification of a tool failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureKind {
    /// The requested tool name is not in the catalog. Non-retryable.
    UnknownTool,
    /// An argument is missing, has the wrong type, or violates a
    /// declared constraint.
    ValidationError,
    /// Paystack returned a structured failure.
    UpstreamApiError,
    /// No response was obtained from Paystack.
    TransportError,
    /// A response was received but was not a parseable envelope.
    MalformedResponseError,
    /// An unexpected fault inside the dispatcher itself.
    InternalError,
}

/// Result envelope returned to the caller for every invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ToolOutcome {
    /// The upstream call succeeded; `payload` is the envelope's `data`,
    /// opaque to the dispatcher.
    Success {
        /// Upstream response data.
        payload: serde_json::Value,
    },
    /// The invocation failed at some stage.
    Failure {
        /// Failure classification.
        kind: FailureKind,
        /// Human-readable description; upstream messages pass through
        /// verbatim.
        message: String,
        /// Optional structured context (e.g. the upstream HTTP status).
        #[serde(default, skip_serializing_if = "Option::is_none")]
        detail: Option<serde_json::Value>,
    },
}

impl ToolOutcome {
    /// Returns `true` for the `Success` variant.
    #[must_use]
    pub const fn is_success(&self) -> bool {
        matches!(self, Self::Success { .. })
    }

    /// Returns the failure kind, if this is a failure.
    #[must_use]
    pub const fn failure_kind(&self) -> Option<FailureKind> {
        match self {
            Self::Failure { kind, .. } => Some(*kind),
            Self::Success { .. } => None,
        }
    }
}

/// Internal error type for the dispatch pipeline.
#[derive(Debug, thiserror::Error)]
#[non_exhaustive]
pub enum ToolError {
    /// Tool name not found in the catalog.
    #[error("unknown tool: {name}")]
    UnknownTool {
        /// The requested name.
        name: String,
    },

    /// Argument validation failed. Message shape is `<parameter>: <reason>`.
    #[error("{parameter}: {reason}")]
    Validation {
        /// The offending parameter.
        parameter: String,
        /// Why it was rejected.
        reason: String,
    },

    /// Error surfaced by the gateway client.
    #[error(transparent)]
    Gateway(#[from] PaystackError),

    /// Unexpected fault between validation and gateway invocation.
    #[error("internal error: {0}")]
    Internal(String),
}

impl ToolError {
    /// Converts the error into its `Failure` envelope.
    ///
    /// Upstream API messages are passed through verbatim; the upstream
    /// HTTP status rides in `detail`.
    #[must_use]
    pub fn into_outcome(self) -> ToolOutcome {
        match self {
            Self::UnknownTool { ref name } => ToolOutcome::Failure {
                kind: FailureKind::UnknownTool,
                message: format!("unknown tool: {name}"),
                detail: None,
            },
            Self::Validation { .. } => ToolOutcome::Failure {
                kind: FailureKind::ValidationError,
                message: self.to_string(),
                detail: None,
            },
            Self::Gateway(PaystackError::Api { status, message }) => ToolOutcome::Failure {
                kind: FailureKind::UpstreamApiError,
                message,
                detail: Some(serde_json::json!({ "http_status": status })),
            },
            Self::Gateway(err @ PaystackError::Transport { .. }) => ToolOutcome::Failure {
                kind: FailureKind::TransportError,
                message: err.to_string(),
                detail: None,
            },
            Self::Gateway(PaystackError::MalformedResponse { context, raw }) => {
                ToolOutcome::Failure {
                    kind: FailureKind::MalformedResponseError,
                    message: format!("malformed response body: {context}"),
                    detail: Some(serde_json::json!({ "raw": raw })),
                }
            }
            Self::Gateway(err) => ToolOutcome::Failure {
                kind: FailureKind::InternalError,
                message: err.to_string(),
                detail: None,
            },
            Self::Internal(message) => ToolOutcome::Failure {
                kind: FailureKind::InternalError,
                message,
                detail: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_with_outcome_tag() {
        let success = ToolOutcome::Success {
            payload: serde_json::json!({"reference": "tx1"}),
        };
        let value = serde_json::to_value(&success).unwrap();
        assert_eq!(value["outcome"], "success");
        assert_eq!(value["payload"]["reference"], "tx1");

        let failure = ToolOutcome::Failure {
            kind: FailureKind::UnknownTool,
            message: "unknown tool: nope".to_owned(),
            detail: None,
        };
        let value = serde_json::to_value(&failure).unwrap();
        assert_eq!(value["outcome"], "failure");
        assert_eq!(value["kind"], "unknown_tool");
        assert!(value.get("detail").is_none());
    }

    #[test]
    fn api_error_keeps_message_verbatim_and_status_in_detail() {
        let outcome = ToolError::Gateway(PaystackError::Api {
            status: 400,
            message: "Invalid key".to_owned(),
        })
        .into_outcome();
        match outcome {
            ToolOutcome::Failure {
                kind,
                message,
                detail,
            } => {
                assert_eq!(kind, FailureKind::UpstreamApiError);
                assert_eq!(message, "Invalid key");
                assert_eq!(detail.unwrap()["http_status"], 400);
            }
            ToolOutcome::Success { .. } => panic!("expected failure"),
        }
    }

    #[test]
    fn validation_message_is_parameter_colon_reason() {
        let outcome = ToolError::Validation {
            parameter: "email".to_owned(),
            reason: "required parameter is missing".to_owned(),
        }
        .into_outcome();
        match outcome {
            ToolOutcome::Failure { message, .. } => {
                assert_eq!(message, "email: required parameter is missing");
            }
            ToolOutcome::Success { .. } => panic!("expected failure"),
        }
    }
}
