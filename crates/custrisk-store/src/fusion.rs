//! DataFusion session hosting custrisk functions.
//!
//! `RiskSession` wraps a `SessionContext` and registers the customer risk
//! classifier as a scalar UDF so it can be called from SQL. Sessions may be
//! bound to a [`Stage`]: permanent registrations are written there and every
//! staged definition is restored when a new session opens on it.

use std::collections::BTreeMap;

use arrow::record_batch::RecordBatch;
use chrono::Utc;
use custrisk_core::{DEFAULT_FUNCTION_NAME, FunctionDefinition};
use datafusion::execution::FunctionRegistry;
use datafusion::prelude::SessionContext;
use tracing::{debug, info};

use crate::StoreError;
use crate::stage::{DEFAULT_STAGE, Stage, normalize_name};
use crate::udf::udf_for;

/// Options for registering the customer risk classifier.
///
/// Input types are always `(INTEGER, INTEGER)` and the return type `STRING`.
#[derive(Debug, Clone)]
pub struct Registration {
    pub name: String,
    /// Persist the definition to the stage so later sessions see it.
    pub permanent: bool,
    pub stage_location: String,
    /// Overwrite an existing function of the same name.
    pub replace: bool,
}

impl Default for Registration {
    fn default() -> Self {
        Self {
            name: DEFAULT_FUNCTION_NAME.to_string(),
            permanent: false,
            stage_location: DEFAULT_STAGE.to_string(),
            replace: false,
        }
    }
}

impl Registration {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    pub fn permanent(mut self, permanent: bool) -> Self {
        self.permanent = permanent;
        self
    }

    pub fn stage_location(mut self, location: impl Into<String>) -> Self {
        self.stage_location = location.into();
        self
    }

    pub fn replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }
}

/// SQL session with custrisk functions registered.
pub struct RiskSession {
    ctx: SessionContext,
    stage: Option<Stage>,
    functions: BTreeMap<String, FunctionDefinition>,
}

impl Default for RiskSession {
    fn default() -> Self {
        Self::new()
    }
}

impl RiskSession {
    /// A session with no stage. Only temporary registrations are possible.
    pub fn new() -> Self {
        Self {
            ctx: SessionContext::new(),
            stage: None,
            functions: BTreeMap::new(),
        }
    }

    /// A session bound to `stage`, with every staged definition restored.
    pub fn with_stage(stage: Stage) -> Result<Self, StoreError> {
        let ctx = SessionContext::new();
        let mut functions = BTreeMap::new();
        for def in stage.list()? {
            ctx.register_udf(udf_for(&def)?);
            debug!(name = %def.name, "restored staged function");
            functions.insert(def.name.clone(), def);
        }
        info!(
            stage = %stage.location(),
            count = functions.len(),
            "DataFusion context ready"
        );
        Ok(Self {
            ctx,
            stage: Some(stage),
            functions,
        })
    }

    /// Register the customer risk classifier.
    ///
    /// Fails if the name is taken (a built-in, a function in the session, or
    /// one in the bound stage) and `replace` is off, or if a permanent
    /// registration cannot be staged.
    pub fn register(&mut self, reg: &Registration) -> Result<FunctionDefinition, StoreError> {
        let name = normalize_name(&reg.name)?;

        let staged = self.stage.as_ref().is_some_and(|s| s.contains(&name));
        let taken = staged || self.functions.contains_key(&name) || self.ctx.udf(&name).is_ok();
        if !reg.replace && taken {
            return Err(StoreError::FunctionExists(name));
        }

        let stage_location = if reg.permanent {
            let stage = self.stage.as_ref().ok_or(StoreError::NoStage)?;
            if stage.location() != reg.stage_location {
                return Err(StoreError::StageMismatch {
                    bound: stage.location().to_string(),
                    requested: reg.stage_location.clone(),
                });
            }
            Some(reg.stage_location.clone())
        } else {
            None
        };

        let def = FunctionDefinition::customer_risk(
            &name,
            reg.permanent,
            stage_location,
            Utc::now().to_rfc3339(),
        );
        let udf = udf_for(&def)?;

        if reg.permanent
            && let Some(stage) = &self.stage
        {
            stage.put(&def)?;
        } else if reg.replace
            && let Some(stage) = &self.stage
            && staged
        {
            // A temporary function replacing a staged one must not come back
            // in the next session.
            stage.remove(&name)?;
        }

        self.ctx.register_udf(udf);
        self.functions.insert(name.clone(), def.clone());
        info!(
            name = %name,
            permanent = reg.permanent,
            replace = reg.replace,
            "function registered"
        );
        Ok(def)
    }

    /// Execute a SQL query and collect all result batches.
    pub async fn query(&self, sql: &str) -> Result<Vec<RecordBatch>, StoreError> {
        let df = self.ctx.sql(sql).await?;
        let batches = df.collect().await?;
        Ok(batches)
    }

    /// Definitions registered in this session, sorted by name.
    pub fn functions(&self) -> impl Iterator<Item = &FunctionDefinition> {
        self.functions.values()
    }

    pub fn stage(&self) -> Option<&Stage> {
        self.stage.as_ref()
    }

    /// Access the underlying `SessionContext` for advanced use.
    pub fn context(&self) -> &SessionContext {
        &self.ctx
    }
}
