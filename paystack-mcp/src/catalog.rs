//! The fixed tool catalog.
//!
//! Defined once at process start, immutable for the process lifetime,
//! and shared read-only across concurrent invocations. Names and
//! parameter sets are part of the compatibility contract with MCP
//! hosts; changing them is a breaking change.

use std::sync::LazyLock;

use paystack::types::PlanInterval;

use crate::schema::{ParamSpec, ParamType, ToolDefinition};

static CATALOG: LazyLock<Vec<ToolDefinition>> = LazyLock::new(build_catalog);

/// Returns the full tool catalog, in stable order.
#[must_use]
pub fn catalog() -> &'static [ToolDefinition] {
    &CATALOG
}

/// Looks up a tool definition by name.
#[must_use]
pub fn find(name: &str) -> Option<&'static ToolDefinition> {
    CATALOG.iter().find(|tool| tool.name == name)
}

fn pagination_params() -> Vec<ParamSpec> {
    vec![
        ParamSpec::optional("per_page", ParamType::Integer, "Number of results per page")
            .min(1)
            .with_default(50),
        ParamSpec::optional("page", ParamType::Integer, "Page number")
            .min(1)
            .with_default(1),
    ]
}

fn build_catalog() -> Vec<ToolDefinition> {
    let mut list_transactions = pagination_params();
    list_transactions.extend([
        ParamSpec::optional("customer", ParamType::String, "Filter by customer ID"),
        ParamSpec::optional("status", ParamType::String, "Filter by transaction status"),
        ParamSpec::optional("from_date", ParamType::String, "Start date (YYYY-MM-DD)"),
        ParamSpec::optional("to_date", ParamType::String, "End date (YYYY-MM-DD)"),
    ]);

    vec![
        ToolDefinition::new(
            "initialize_transaction",
            "Initialize a new payment transaction",
            vec![
                ParamSpec::required("email", ParamType::String, "Customer email").email(),
                ParamSpec::required("amount", ParamType::Integer, "Amount in kobo/cents").min(1),
                ParamSpec::optional("currency", ParamType::String, "Currency code")
                    .with_default("NGN"),
                ParamSpec::optional(
                    "reference",
                    ParamType::String,
                    "Unique transaction reference",
                ),
                ParamSpec::optional(
                    "callback_url",
                    ParamType::String,
                    "Callback URL after payment",
                ),
                ParamSpec::optional("metadata", ParamType::Object, "Additional transaction data"),
            ],
        ),
        ToolDefinition::new(
            "verify_transaction",
            "Verify a transaction by reference",
            vec![ParamSpec::required(
                "reference",
                ParamType::String,
                "Transaction reference to verify",
            )],
        ),
        ToolDefinition::new(
            "list_transactions",
            "List transactions with optional filters",
            list_transactions,
        ),
        ToolDefinition::new(
            "create_customer",
            "Create a new customer",
            vec![
                ParamSpec::required("email", ParamType::String, "Customer email").email(),
                ParamSpec::optional("first_name", ParamType::String, "Customer first name"),
                ParamSpec::optional("last_name", ParamType::String, "Customer last name"),
                ParamSpec::optional("phone", ParamType::String, "Customer phone number"),
                ParamSpec::optional("metadata", ParamType::Object, "Additional customer data"),
            ],
        ),
        ToolDefinition::new("list_customers", "List customers", pagination_params()),
        ToolDefinition::new(
            "create_plan",
            "Create a subscription plan",
            vec![
                ParamSpec::required("name", ParamType::String, "Plan name"),
                ParamSpec::required("amount", ParamType::Integer, "Plan amount in kobo/cents")
                    .min(1),
                ParamSpec::required("interval", ParamType::String, "Billing interval")
                    .one_of(&PlanInterval::ALL),
                ParamSpec::optional("description", ParamType::String, "Plan description"),
                ParamSpec::optional("currency", ParamType::String, "Currency code")
                    .with_default("NGN"),
            ],
        ),
        ToolDefinition::new("list_plans", "List subscription plans", pagination_params()),
        ToolDefinition::new(
            "list_banks",
            "List supported banks",
            vec![
                ParamSpec::optional("country", ParamType::String, "Country to get banks for")
                    .with_default("nigeria"),
            ],
        ),
        ToolDefinition::new(
            "resolve_account",
            "Resolve and verify bank account details",
            vec![
                ParamSpec::required(
                    "account_number",
                    ParamType::String,
                    "Account number to verify",
                ),
                ParamSpec::required("bank_code", ParamType::String, "Bank code"),
            ],
        ),
        ToolDefinition::new(
            "create_refund",
            "Create a refund for a transaction",
            vec![
                ParamSpec::required(
                    "transaction",
                    ParamType::String,
                    "Transaction ID or reference",
                ),
                ParamSpec::optional(
                    "amount",
                    ParamType::Integer,
                    "Amount to refund in kobo/cents (full amount if not specified)",
                )
                .min(1),
                ParamSpec::optional("currency", ParamType::String, "Currency code"),
                ParamSpec::optional("customer_note", ParamType::String, "Note for customer"),
                ParamSpec::optional(
                    "merchant_note",
                    ParamType::String,
                    "Internal merchant note",
                ),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    const EXPECTED: [&str; 10] = [
        "initialize_transaction",
        "verify_transaction",
        "list_transactions",
        "create_customer",
        "list_customers",
        "create_plan",
        "list_plans",
        "list_banks",
        "resolve_account",
        "create_refund",
    ];

    #[test]
    fn catalog_contains_exactly_the_expected_tools() {
        let names: Vec<_> = catalog().iter().map(|t| t.name).collect();
        assert_eq!(names, EXPECTED);
    }

    #[test]
    fn tool_names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|t| t.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn required_parameters_carry_no_default() {
        for tool in catalog() {
            for spec in &tool.params {
                assert!(
                    !(spec.required && spec.default.is_some()),
                    "{}.{} is required but has a default",
                    tool.name,
                    spec.name
                );
            }
        }
    }

    #[test]
    fn find_is_exact_match_only() {
        assert!(find("create_plan").is_some());
        assert!(find("Create_Plan").is_none());
        assert!(find("").is_none());
    }

    #[test]
    fn interval_enumeration_matches_the_api_set() {
        let tool = find("create_plan").unwrap();
        let interval = tool.params.iter().find(|p| p.name == "interval").unwrap();
        assert_eq!(
            interval.one_of,
            ["daily", "weekly", "monthly", "quarterly", "biannually", "annually"]
        );
    }
}
