//! Schema-driven argument validation.
//!
//! Tools declare their parameters as tagged descriptors ([`ParamSpec`])
//! rather than ad-hoc per-field checks. Validation walks the
//! declaration order, so the first violation reported is deterministic,
//! then applies declared defaults for omitted optionals.

use serde_json::{Map, Value};

use crate::error::ToolError;

/// Declared type of a tool parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamType {
    /// A JSON string.
    String,
    /// A non-negative JSON integer.
    Integer,
    /// A JSON object with arbitrary members.
    Object,
}

impl ParamType {
    /// JSON Schema type name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Integer => "integer",
            Self::Object => "object",
        }
    }

    /// Whether a JSON value inhabits this type.
    fn matches(self, value: &Value) -> bool {
        match self {
            Self::String => value.is_string(),
            Self::Integer => value.is_u64(),
            Self::Object => value.is_object(),
        }
    }
}

/// String format constraints beyond the raw type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamFormat {
    /// Must look like an email address.
    Email,
}

/// A single declared tool parameter.
///
/// Invariant: a required parameter never carries a default.
#[derive(Debug, Clone)]
pub struct ParamSpec {
    /// Parameter name as it appears in tool arguments.
    pub name: &'static str,
    /// Human-readable description (surfaced in the input schema).
    pub description: &'static str,
    /// Declared type.
    pub param_type: ParamType,
    /// Whether the parameter must be present.
    pub required: bool,
    /// Default applied when an optional parameter is omitted.
    pub default: Option<Value>,
    /// Inclusive lower bound for integers.
    pub minimum: Option<u64>,
    /// Enumerated allowed values for strings; empty means unconstrained.
    pub one_of: &'static [&'static str],
    /// Extra string format constraint.
    pub format: Option<ParamFormat>,
}

impl ParamSpec {
    /// Declares a required parameter.
    #[must_use]
    pub const fn required(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            param_type,
            required: true,
            default: None,
            minimum: None,
            one_of: &[],
            format: None,
        }
    }

    /// Declares an optional parameter without a default.
    #[must_use]
    pub const fn optional(
        name: &'static str,
        param_type: ParamType,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            description,
            param_type,
            required: false,
            default: None,
            minimum: None,
            one_of: &[],
            format: None,
        }
    }

    /// Attaches a default value. Only meaningful on optional parameters.
    #[must_use]
    pub fn with_default(mut self, default: impl Into<Value>) -> Self {
        debug_assert!(!self.required, "required parameters carry no default");
        self.default = Some(default.into());
        self
    }

    /// Constrains an integer parameter to `value..`.
    #[must_use]
    pub const fn min(mut self, value: u64) -> Self {
        self.minimum = Some(value);
        self
    }

    /// Constrains a string parameter to an enumerated set.
    #[must_use]
    pub const fn one_of(mut self, values: &'static [&'static str]) -> Self {
        self.one_of = values;
        self
    }

    /// Requires email shape on a string parameter.
    #[must_use]
    pub const fn email(mut self) -> Self {
        self.format = Some(ParamFormat::Email);
        self
    }

    /// Checks a present value against this spec.
    fn check(&self, value: &Value) -> Result<(), ToolError> {
        if !self.param_type.matches(value) {
            return Err(self.violation(format!("expected {}", self.param_type.as_str())));
        }
        if let (Some(min), Some(n)) = (self.minimum, value.as_u64()) {
            if n < min {
                return Err(self.violation(format!("must be at least {min}")));
            }
        }
        if !self.one_of.is_empty() {
            let s = value.as_str().unwrap_or_default();
            if !self.one_of.contains(&s) {
                return Err(self.violation(format!("must be one of {}", self.one_of.join(", "))));
            }
        }
        if self.format == Some(ParamFormat::Email) {
            let s = value.as_str().unwrap_or_default();
            if !looks_like_email(s) {
                return Err(self.violation("must be a valid email address".to_owned()));
            }
        }
        Ok(())
    }

    fn violation(&self, reason: String) -> ToolError {
        ToolError::Validation {
            parameter: self.name.to_owned(),
            reason,
        }
    }
}

/// Minimal email shape check: one `@` with non-empty sides.
fn looks_like_email(s: &str) -> bool {
    matches!(s.split_once('@'), Some((local, domain)) if !local.is_empty() && !domain.is_empty())
}

/// A named tool with its parameter schema.
#[derive(Debug, Clone)]
pub struct ToolDefinition {
    /// Unique tool name.
    pub name: &'static str,
    /// Human-readable description.
    pub description: &'static str,
    /// Parameters, in declaration (= validation) order.
    pub params: Vec<ParamSpec>,
}

impl ToolDefinition {
    /// Creates a definition from ordered parameter specs.
    #[must_use]
    pub const fn new(
        name: &'static str,
        description: &'static str,
        params: Vec<ParamSpec>,
    ) -> Self {
        Self {
            name,
            description,
            params,
        }
    }

    /// Renders the MCP `inputSchema` JSON-Schema object.
    #[must_use]
    pub fn input_schema(&self) -> Value {
        let mut properties = Map::new();
        let mut required = Vec::new();
        for spec in &self.params {
            let mut prop = Map::new();
            prop.insert("type".to_owned(), Value::from(spec.param_type.as_str()));
            prop.insert("description".to_owned(), Value::from(spec.description));
            if let Some(default) = &spec.default {
                prop.insert("default".to_owned(), default.clone());
            }
            if let Some(min) = spec.minimum {
                prop.insert("minimum".to_owned(), Value::from(min));
            }
            if !spec.one_of.is_empty() {
                prop.insert(
                    "enum".to_owned(),
                    Value::from(
                        spec.one_of
                            .iter()
                            .map(|v| Value::from(*v))
                            .collect::<Vec<_>>(),
                    ),
                );
            }
            if spec.format == Some(ParamFormat::Email) {
                prop.insert("format".to_owned(), Value::from("email"));
            }
            properties.insert(spec.name.to_owned(), Value::Object(prop));
            if spec.required {
                required.push(Value::from(spec.name));
            }
        }

        let mut schema = Map::new();
        schema.insert("type".to_owned(), Value::from("object"));
        schema.insert("properties".to_owned(), Value::Object(properties));
        if !required.is_empty() {
            schema.insert("required".to_owned(), Value::Array(required));
        }
        Value::Object(schema)
    }

    /// Validates arguments against this schema and applies defaults.
    ///
    /// Declared parameters are checked in declaration order; the first
    /// violation wins. Argument names outside the schema are rejected
    /// afterwards.
    ///
    /// # Errors
    ///
    /// Returns [`ToolError::Validation`] with a `<parameter>: <reason>`
    /// message on the first violation.
    pub fn validate(&self, arguments: &Map<String, Value>) -> Result<Map<String, Value>, ToolError> {
        let mut validated = Map::new();

        for spec in &self.params {
            match arguments.get(spec.name) {
                Some(value) => {
                    spec.check(value)?;
                    validated.insert(spec.name.to_owned(), value.clone());
                }
                None if spec.required => {
                    return Err(spec.violation("required parameter is missing".to_owned()));
                }
                None => {
                    if let Some(default) = &spec.default {
                        validated.insert(spec.name.to_owned(), default.clone());
                    }
                }
            }
        }

        for key in arguments.keys() {
            if !self.params.iter().any(|spec| spec.name == key) {
                return Err(ToolError::Validation {
                    parameter: key.clone(),
                    reason: "unknown parameter".to_owned(),
                });
            }
        }

        Ok(validated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_tool() -> ToolDefinition {
        ToolDefinition::new(
            "sample",
            "Sample tool",
            vec![
                ParamSpec::required("email", ParamType::String, "Customer email").email(),
                ParamSpec::required("amount", ParamType::Integer, "Amount in kobo").min(1),
                ParamSpec::optional("currency", ParamType::String, "Currency code")
                    .with_default("NGN"),
                ParamSpec::optional("interval", ParamType::String, "Billing interval")
                    .one_of(&["daily", "weekly"]),
            ],
        )
    }

    fn args(value: Value) -> Map<String, Value> {
        value.as_object().cloned().unwrap()
    }

    #[test]
    fn first_violation_follows_declaration_order() {
        // Both email and amount are missing; email is declared first.
        let err = sample_tool().validate(&Map::new()).unwrap_err();
        assert_eq!(err.to_string(), "email: required parameter is missing");
    }

    #[test]
    fn defaults_fill_omitted_optionals() {
        let validated = sample_tool()
            .validate(&args(serde_json::json!({"email": "a@b.com", "amount": 1})))
            .unwrap();
        assert_eq!(validated["currency"], "NGN");
        // No default declared for interval, so it stays absent.
        assert!(!validated.contains_key("interval"));
    }

    #[test]
    fn integer_minimum_is_enforced() {
        let err = sample_tool()
            .validate(&args(serde_json::json!({"email": "a@b.com", "amount": 0})))
            .unwrap_err();
        assert_eq!(err.to_string(), "amount: must be at least 1");

        let err = sample_tool()
            .validate(&args(serde_json::json!({"email": "a@b.com", "amount": -5})))
            .unwrap_err();
        assert_eq!(err.to_string(), "amount: expected integer");
    }

    #[test]
    fn enumerations_are_enforced() {
        let err = sample_tool()
            .validate(&args(serde_json::json!({
                "email": "a@b.com",
                "amount": 1,
                "interval": "biweekly",
            })))
            .unwrap_err();
        assert_eq!(err.to_string(), "interval: must be one of daily, weekly");
    }

    #[test]
    fn email_shape_is_enforced() {
        let err = sample_tool()
            .validate(&args(serde_json::json!({"email": "not-an-email", "amount": 1})))
            .unwrap_err();
        assert_eq!(err.to_string(), "email: must be a valid email address");
    }

    #[test]
    fn unknown_arguments_are_rejected() {
        let err = sample_tool()
            .validate(&args(serde_json::json!({
                "email": "a@b.com",
                "amount": 1,
                "surprise": true,
            })))
            .unwrap_err();
        assert_eq!(err.to_string(), "surprise: unknown parameter");
    }

    #[test]
    fn wrong_type_is_reported_per_parameter() {
        let err = sample_tool()
            .validate(&args(serde_json::json!({"email": 5, "amount": 1})))
            .unwrap_err();
        assert_eq!(err.to_string(), "email: expected string");
    }

    #[test]
    fn input_schema_lists_required_parameters() {
        let schema = sample_tool().input_schema();
        assert_eq!(schema["type"], "object");
        assert_eq!(schema["properties"]["amount"]["minimum"], 1);
        assert_eq!(schema["properties"]["currency"]["default"], "NGN");
        let required: Vec<_> = schema["required"]
            .as_array()
            .unwrap()
            .iter()
            .map(|v| v.as_str().unwrap())
            .collect();
        assert_eq!(required, vec!["email", "amount"]);
    }
}
