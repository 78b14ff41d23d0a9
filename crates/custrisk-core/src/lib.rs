pub mod definition;
pub mod schema;
pub mod tier;

pub use definition::{CUSTOMER_RISK_HANDLER, DEFAULT_FUNCTION_NAME, FunctionDefinition, SqlType};
pub use schema::risk;
pub use tier::{ClassificationInput, ParseTierError, RiskTier, classify};
