//! Request and response wire types.
//!
//! Request bodies serialize with `skip_serializing_if` on every
//! optional field, so absent optionals are omitted from the outgoing
//! payload rather than sent as `null` — Paystack treats the two
//! differently for fields like `reference`.
//!
//! Amounts are always integers in the currency's minor unit (kobo for
//! NGN, cents for USD); the client performs no unit conversion.

use std::collections::HashMap;
use std::fmt;

use serde::{Deserialize, Serialize};

/// The envelope Paystack wraps around every response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiEnvelope {
    /// `true` on success, `false` on a structured failure.
    pub status: bool,
    /// Human-readable outcome description.
    pub message: String,
    /// Operation payload; absent on some failures.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
}

fn default_currency() -> String {
    "NGN".to_owned()
}

/// Body for `POST /transaction/initialize`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionRequest {
    /// Customer email address.
    pub email: String,
    /// Charge amount in the currency's minor unit.
    pub amount: u64,
    /// ISO currency code (default `NGN`).
    #[serde(default = "default_currency")]
    pub currency: String,
    /// Unique transaction reference; Paystack generates one if omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// URL the customer is redirected to after payment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub callback_url: Option<String>,
    /// Arbitrary structured data echoed back on the transaction.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

impl TransactionRequest {
    /// Creates a request with the required fields and default currency.
    #[must_use]
    pub fn new(email: impl Into<String>, amount: u64) -> Self {
        Self {
            email: email.into(),
            amount,
            currency: default_currency(),
            reference: None,
            callback_url: None,
            metadata: None,
        }
    }
}

/// Body for `POST /customer` and `PUT /customer/{code}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCustomer {
    /// Customer email address.
    pub email: String,
    /// First name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    /// Last name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    /// Phone number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    /// Arbitrary structured data stored on the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub metadata: Option<serde_json::Map<String, serde_json::Value>>,
}

/// Billing interval for subscription plans.
///
/// Paystack accepts exactly these six values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanInterval {
    /// Every day.
    Daily,
    /// Every week.
    Weekly,
    /// Every month.
    Monthly,
    /// Every three months.
    Quarterly,
    /// Every six months.
    Biannually,
    /// Every year.
    Annually,
}

impl PlanInterval {
    /// All accepted interval values, in wire form.
    pub const ALL: [&'static str; 6] = [
        "daily",
        "weekly",
        "monthly",
        "quarterly",
        "biannually",
        "annually",
    ];
}

impl fmt::Display for PlanInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Daily => "daily",
            Self::Weekly => "weekly",
            Self::Monthly => "monthly",
            Self::Quarterly => "quarterly",
            Self::Biannually => "biannually",
            Self::Annually => "annually",
        };
        f.write_str(s)
    }
}

/// Body for `POST /plan`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPlan {
    /// Plan name.
    pub name: String,
    /// Amount charged per interval, in the currency's minor unit.
    pub amount: u64,
    /// Billing interval.
    pub interval: PlanInterval,
    /// Plan description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// ISO currency code (default `NGN`).
    #[serde(default = "default_currency")]
    pub currency: String,
}

/// Body for `POST /refund`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundRequest {
    /// Transaction ID or reference to refund.
    pub transaction: String,
    /// Amount to refund in the currency's minor unit; the full
    /// transaction amount when omitted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
    /// ISO currency code.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    /// Note shown to the customer.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer_note: Option<String>,
    /// Internal merchant note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub merchant_note: Option<String>,
}

fn default_per_page() -> u32 {
    50
}

fn default_page() -> u32 {
    1
}

/// Query parameters for `GET /transaction`.
///
/// Wire names follow Paystack's conventions: `perPage`, `from`, `to`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransactionQuery {
    /// Results per page (default 50).
    #[serde(rename(serialize = "perPage"), default = "default_per_page")]
    pub per_page: u32,
    /// Page number, 1-based (default 1).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Filter by customer ID.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub customer: Option<String>,
    /// Filter by transaction status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    /// Start of the date range (`YYYY-MM-DD`).
    #[serde(rename(serialize = "from"), default, skip_serializing_if = "Option::is_none")]
    pub from_date: Option<String>,
    /// End of the date range (`YYYY-MM-DD`).
    #[serde(rename(serialize = "to"), default, skip_serializing_if = "Option::is_none")]
    pub to_date: Option<String>,
}

impl Default for TransactionQuery {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
            customer: None,
            status: None,
            from_date: None,
            to_date: None,
        }
    }
}

/// Plain pagination for list endpoints without extra filters.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Pagination {
    /// Results per page (default 50).
    #[serde(rename(serialize = "perPage"), default = "default_per_page")]
    pub per_page: u32,
    /// Page number, 1-based (default 1).
    #[serde(default = "default_page")]
    pub page: u32,
}

impl Default for Pagination {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
        }
    }
}

/// Query parameters for `GET /refund`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RefundQuery {
    /// Results per page (default 50).
    #[serde(rename(serialize = "perPage"), default = "default_per_page")]
    pub per_page: u32,
    /// Page number, 1-based (default 1).
    #[serde(default = "default_page")]
    pub page: u32,
    /// Filter by transaction reference.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Filter by currency.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
}

impl Default for RefundQuery {
    fn default() -> Self {
        Self {
            per_page: default_per_page(),
            page: default_page(),
            reference: None,
            currency: None,
        }
    }
}

/// A supported bank, as returned by `GET /bank`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bank {
    /// Bank display name.
    pub name: String,
    /// URL-friendly identifier.
    pub slug: String,
    /// Bank code used for account resolution.
    pub code: String,
    /// Additional fields Paystack includes (`longcode`, `country`, ...).
    #[serde(flatten)]
    pub extra: HashMap<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optionals_are_omitted() {
        let body = serde_json::to_value(TransactionRequest::new("a@b.com", 50_000)).unwrap();
        let obj = body.as_object().unwrap();
        assert_eq!(obj["email"], "a@b.com");
        assert_eq!(obj["amount"], 50_000);
        assert_eq!(obj["currency"], "NGN");
        assert!(!obj.contains_key("reference"));
        assert!(!obj.contains_key("callback_url"));
        assert!(!obj.contains_key("metadata"));
    }

    #[test]
    fn transaction_query_uses_paystack_wire_names() {
        let query = TransactionQuery {
            from_date: Some("2024-01-01".to_owned()),
            ..TransactionQuery::default()
        };
        let value = serde_json::to_value(&query).unwrap();
        let obj = value.as_object().unwrap();
        assert_eq!(obj["perPage"], 50);
        assert_eq!(obj["page"], 1);
        assert_eq!(obj["from"], "2024-01-01");
        assert!(!obj.contains_key("to"));
        assert!(!obj.contains_key("from_date"));
    }

    #[test]
    fn plan_interval_round_trips_lowercase() {
        let plan: NewPlan = serde_json::from_value(serde_json::json!({
            "name": "Gold",
            "amount": 500_000,
            "interval": "biannually",
        }))
        .unwrap();
        assert_eq!(plan.interval, PlanInterval::Biannually);
        assert_eq!(plan.currency, "NGN");
        assert!(serde_json::from_str::<PlanInterval>("\"biweekly\"").is_err());
    }

    #[test]
    fn envelope_tolerates_missing_data() {
        let envelope: ApiEnvelope =
            serde_json::from_str(r#"{"status":false,"message":"Invalid key"}"#).unwrap();
        assert!(!envelope.status);
        assert_eq!(envelope.message, "Invalid key");
        assert!(envelope.data.is_none());
    }
}
