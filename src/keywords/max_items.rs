//! `maxItems`: rejects arrays longer than the given bound.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct MaxItemsValidator {
    limit: u64,
}

impl Validate for MaxItemsValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            ValidationError::max_items(instance.clone())
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::Array(items) => items.len() as u64 <= self.limit,
            _ => true,
        }
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema.as_u64() {
        Some(limit) => Some(Ok(Box::new(MaxItemsValidator { limit }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}
