/// Arrow schema definitions for classifier inputs and outputs.
pub mod risk {
    use arrow::datatypes::{DataType, Field, Schema};

    pub const AGE: &str = "age";
    pub const SPEND: &str = "spend";
    pub const RISK_TIER: &str = "risk_tier";

    /// Schema for a batch of customers to classify. Both columns may hold nulls.
    pub fn customer_input_schema() -> Schema {
        Schema::new(vec![
            Field::new(AGE, DataType::Int64, true),
            Field::new(SPEND, DataType::Int64, true),
        ])
    }

    /// The classifier always yields a label, so the output column is non-null.
    pub fn risk_tier_field() -> Field {
        Field::new(RISK_TIER, DataType::Utf8, false)
    }
}
