//! Field planning — struct descriptor → per-field token plan.

use serde::Serialize;
use thiserror::Error;

use crate::field::cardinality::{cardinality_of, Cardinality, UnsupportedType};
use crate::field::exported::is_exported;
use crate::field::presence::is_presence_flag;
use crate::field::zero::is_zero;
use crate::scalar::ScalarSupport;
use crate::types::{Kind, TypeDescriptor, Value};

/// Errors produced while planning a struct's fields.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanError {
    #[error("{ty} is not a struct")]
    NotAStruct { ty: String },

    #[error("{owner}.{field}: {source}")]
    Field {
        owner: String,
        field: String,
        #[source]
        source: UnsupportedType,
    },
}

/// How one exported field is populated from tokens.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FieldPlan {
    pub name: String,
    /// Rendered field type.
    #[serde(rename = "type")]
    pub ty: String,
    pub cardinality: Cardinality,
    pub presence_flag: bool,
}

/// Plan every exported field of the struct `ty`.
///
/// Unexported fields are skipped. The first field that cannot be parsed
/// aborts planning.
pub fn plan_fields(
    ty: &TypeDescriptor,
    scalars: &impl ScalarSupport,
) -> Result<Vec<FieldPlan>, PlanError> {
    let Kind::Struct(fields) = ty.kind() else {
        return Err(PlanError::NotAStruct { ty: ty.to_string() });
    };

    let mut plans = Vec::with_capacity(fields.len());
    for field in fields {
        if !is_exported(&field.name) {
            tracing::debug!("{}: skipping unexported field '{}'", ty, field.name);
            continue;
        }

        let cardinality = cardinality_of(&field.ty, scalars).map_err(|source| PlanError::Field {
            owner: ty.to_string(),
            field: field.name.clone(),
            source,
        })?;

        plans.push(FieldPlan {
            name: field.name.clone(),
            ty: field.ty.to_string(),
            cardinality,
            presence_flag: is_presence_flag(&field.ty),
        });
    }

    Ok(plans)
}

/// Names of planned fields still holding their zero value in `value`.
///
/// A planned field absent from the struct value counts as unset. A value
/// that is not a struct leaves every field unset.
pub fn unset_fields<'p>(plans: &'p [FieldPlan], value: &Value) -> Vec<&'p str> {
    let fields: &[(String, Value)] = match value {
        Value::Struct(fields) => fields,
        _ => &[],
    };

    plans
        .iter()
        .filter(|plan| {
            fields
                .iter()
                .find(|(name, _)| *name == plan.name)
                .map_or(true, |(_, v)| is_zero(v))
        })
        .map(|plan| plan.name.as_str())
        .collect()
}
