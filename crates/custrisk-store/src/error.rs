use thiserror::Error;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("function already exists: {0} (register with replace to overwrite)")]
    FunctionExists(String),

    #[error("invalid function name: {0:?}")]
    InvalidName(String),

    #[error("invalid stage location: {0:?} (expected @~ or @<name>)")]
    InvalidStage(String),

    #[error("permanent registration needs a stage")]
    NoStage,

    #[error("stage mismatch: session is bound to {bound}, registration asked for {requested}")]
    StageMismatch { bound: String, requested: String },

    #[error("unknown handler {handler:?} for function {name}")]
    UnknownHandler { name: String, handler: String },

    #[error("definition of {name} does not match its handler: {signature}")]
    SignatureMismatch { name: String, signature: String },

    #[error("function not found in stage: {0}")]
    NotFound(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("datafusion error: {0}")]
    DataFusion(#[from] datafusion::error::DataFusionError),
}
