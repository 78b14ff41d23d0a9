//! Function definitions as declared to, and persisted by, the SQL host.

use std::fmt;

use arrow::datatypes::DataType;
use serde::{Deserialize, Serialize};

/// Name the classifier is registered under unless the caller picks another.
pub const DEFAULT_FUNCTION_NAME: &str = "customer_risk";

/// Handler id for the customer risk classifier.
pub const CUSTOMER_RISK_HANDLER: &str = "customer_risk";

/// SQL-level types a definition can declare.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SqlType {
    Integer,
    String,
}

impl SqlType {
    pub fn to_arrow(self) -> DataType {
        match self {
            Self::Integer => DataType::Int64,
            Self::String => DataType::Utf8,
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer => f.write_str("INTEGER"),
            Self::String => f.write_str("STRING"),
        }
    }
}

/// A registered function, as stored in a stage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunctionDefinition {
    pub name: String,
    /// Which built-in implementation backs this function.
    pub handler: String,
    pub input_types: Vec<SqlType>,
    pub return_type: SqlType,
    pub permanent: bool,
    /// Stage the definition lives in, e.g. `@~`. Unset for temporary functions.
    pub stage_location: Option<String>,
    /// ISO 8601 timestamp string.
    pub registered_at: String,
}

impl FunctionDefinition {
    /// Definition of the customer risk classifier under `name`.
    pub fn customer_risk(
        name: &str,
        permanent: bool,
        stage_location: Option<String>,
        registered_at: String,
    ) -> Self {
        Self {
            name: name.to_string(),
            handler: CUSTOMER_RISK_HANDLER.to_string(),
            input_types: vec![SqlType::Integer, SqlType::Integer],
            return_type: SqlType::String,
            permanent,
            stage_location,
            registered_at,
        }
    }

    /// SQL-style signature, e.g. `customer_risk(INTEGER, INTEGER) RETURNS STRING`.
    pub fn signature(&self) -> String {
        let args: Vec<String> = self.input_types.iter().map(|t| t.to_string()).collect();
        format!(
            "{}({}) RETURNS {}",
            self.name,
            args.join(", "),
            self.return_type
        )
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(s: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(s)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> FunctionDefinition {
        FunctionDefinition::customer_risk(
            DEFAULT_FUNCTION_NAME,
            true,
            Some("@~".to_string()),
            "2026-01-01T00:00:00+00:00".to_string(),
        )
    }

    #[test]
    fn customer_risk_declares_two_integers_returning_string() {
        let def = sample();
        assert_eq!(def.handler, CUSTOMER_RISK_HANDLER);
        assert_eq!(def.input_types, vec![SqlType::Integer, SqlType::Integer]);
        assert_eq!(def.return_type, SqlType::String);
    }

    #[test]
    fn signature_reads_like_sql() {
        assert_eq!(
            sample().signature(),
            "customer_risk(INTEGER, INTEGER) RETURNS STRING"
        );
    }

    #[test]
    fn json_uses_uppercase_type_names() {
        let json = sample().to_json().unwrap();
        assert!(json.contains("\"INTEGER\""));
        assert!(json.contains("\"STRING\""));
        assert_eq!(FunctionDefinition::from_json(&json).unwrap(), sample());
    }

    #[test]
    fn sql_types_map_to_arrow() {
        assert_eq!(SqlType::Integer.to_arrow(), DataType::Int64);
        assert_eq!(SqlType::String.to_arrow(), DataType::Utf8);
    }
}
