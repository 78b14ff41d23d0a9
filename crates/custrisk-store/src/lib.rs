//! Registration host: DataFusion session, customer risk UDF, and the on-disk stage.

mod error;
pub use error::StoreError;

mod fusion;
pub use fusion::{Registration, RiskSession};

mod stage;
pub use stage::{DEFAULT_STAGE, Stage, normalize_name};

pub mod udf;
pub use udf::customer_risk_udf;
