//! `minimum`, with its draft-04 sibling `exclusiveMinimum`: a boolean flag on
//! the same schema object, not a standalone keyword (see
//! [`crate::schemas::Draft::get_validator`]). `exclusiveMinimum: true` turns
//! the bound from `>=` into `>`.
use std::cmp::Ordering;

use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::{Number, Value},
};

pub struct MinimumValidator {
    limit: Number,
    exclusive: bool,
}

impl Validate for MinimumValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            let instance_value = instance.as_number().map_or(0.0, Number::as_f64);
            let limit = self.limit.as_f64();
            if self.exclusive {
                ValidationError::exclusive_minimum(instance_value, limit)
            } else {
                ValidationError::minimum(instance_value, limit)
            }
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        let Some(instance) = instance.as_number() else {
            return true;
        };
        match instance.compare(&self.limit) {
            Ordering::Less => false,
            Ordering::Equal => !self.exclusive,
            Ordering::Greater => true,
        }
    }
}

fn is_exclusive(parent: &Value) -> bool {
    matches!(
        parent.as_object().and_then(|object| object.get("exclusiveMinimum")),
        Some(Value::Bool(true))
    )
}

pub fn compile(
    _: &CompilationContext,
    parent: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema.as_number() {
        Some(limit) => Some(Ok(Box::new(MinimumValidator {
            limit: limit.clone(),
            exclusive: is_exclusive(parent),
        }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn inclusive_bound_accepts_equal_value() {
        let schema =
            Value::object_from(vec![("minimum", Value::Number(Number::from_i64(2)))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(Number::from_i64(2))));
        assert!(!compiled.is_valid(&Value::Number(Number::from_i64(1))));
    }

    #[test]
    fn exclusive_sibling_rejects_equal_value() {
        let schema = Value::object_from(vec![
            ("minimum", Value::Number(Number::from_i64(2))),
            ("exclusiveMinimum", Value::Bool(true)),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(!compiled.is_valid(&Value::Number(Number::from_i64(2))));
        assert!(compiled.is_valid(&Value::Number(Number::from_i64(3))));
    }

    #[test]
    fn high_precision_integers_compare_exactly() {
        let schema = Value::object_from(vec![(
            "minimum",
            Value::Number(Number::from_i64(1i64 << 54)),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(Number::from_i64((1i64 << 54) + 1))));
        assert!(!compiled.is_valid(&Value::Number(Number::from_i64((1i64 << 54) - 1))));
    }
}
