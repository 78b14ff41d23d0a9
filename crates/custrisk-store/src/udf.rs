//! DataFusion scalar UDFs backed by custrisk handlers.

use std::sync::Arc;

use arrow::array::{Array, ArrayRef, Int64Array, StringArray};
use arrow::compute::cast;
use arrow::datatypes::DataType;
use custrisk_core::{CUSTOMER_RISK_HANDLER, FunctionDefinition, classify, risk};
use datafusion::common::ScalarValue;
use datafusion::error::DataFusionError;
use datafusion::logical_expr::{ColumnarValue, ScalarUDF, Volatility, create_udf};

use crate::StoreError;

/// Build the customer risk classifier as a scalar UDF named `name`.
///
/// Parameters follow the customer input columns and the result follows the
/// risk tier field, i.e. `(Int64, Int64) -> Utf8`. Nulls classify as
/// `UNKNOWN`, so the function never yields SQL NULL.
pub fn customer_risk_udf(name: &str) -> ScalarUDF {
    let (input_types, return_type) = customer_risk_signature();
    create_udf(
        name,
        input_types,
        return_type,
        Volatility::Immutable,
        Arc::new(invoke_customer_risk),
    )
}

fn customer_risk_signature() -> (Vec<DataType>, DataType) {
    let inputs = risk::customer_input_schema()
        .fields()
        .iter()
        .map(|f| f.data_type().clone())
        .collect();
    (inputs, risk::risk_tier_field().data_type().clone())
}

/// Classify each row of the argument columns.
fn invoke_customer_risk(args: &[ColumnarValue]) -> datafusion::error::Result<ColumnarValue> {
    if args.len() != 2 {
        return Err(DataFusionError::Internal(format!(
            "customer_risk: expected 2 arguments, got {}",
            args.len()
        )));
    }
    let all_scalar = args
        .iter()
        .all(|arg| matches!(arg, ColumnarValue::Scalar(_)));

    let arrays = ColumnarValue::values_to_arrays(args)?;
    let age = as_int64(&arrays[0])?;
    let spend = as_int64(&arrays[1])?;
    let age = downcast_int64(&age)?;
    let spend = downcast_int64(&spend)?;

    let result: StringArray = age
        .iter()
        .zip(spend.iter())
        .map(|(a, s)| Some(classify(a, s).as_str()))
        .collect();

    if all_scalar {
        let value = ScalarValue::try_from_array(&result, 0)?;
        Ok(ColumnarValue::Scalar(value))
    } else {
        Ok(ColumnarValue::Array(Arc::new(result) as ArrayRef))
    }
}

/// Build the UDF a stored definition refers to.
///
/// The definition's declared types must match the handler's signature.
pub fn udf_for(def: &FunctionDefinition) -> Result<ScalarUDF, StoreError> {
    let (input_types, return_type) = match def.handler.as_str() {
        CUSTOMER_RISK_HANDLER => customer_risk_signature(),
        other => {
            return Err(StoreError::UnknownHandler {
                name: def.name.clone(),
                handler: other.to_string(),
            });
        }
    };

    let declared: Vec<DataType> = def.input_types.iter().map(|t| t.to_arrow()).collect();
    if declared != input_types || def.return_type.to_arrow() != return_type {
        return Err(StoreError::SignatureMismatch {
            name: def.name.clone(),
            signature: def.signature(),
        });
    }
    Ok(customer_risk_udf(&def.name))
}

// Narrower integer columns reach us already coerced by the planner; the cast
// covers anything that slipped through argument binding.
fn as_int64(array: &ArrayRef) -> datafusion::error::Result<ArrayRef> {
    if array.data_type() == &DataType::Int64 {
        return Ok(Arc::clone(array));
    }
    Ok(cast(array, &DataType::Int64)?)
}

fn downcast_int64(array: &ArrayRef) -> datafusion::error::Result<&Int64Array> {
    array
        .as_any()
        .downcast_ref::<Int64Array>()
        .ok_or_else(|| DataFusionError::Internal("customer_risk: expected Int64 array".into()))
}
