//! `minProperties`: rejects objects with fewer properties than the given
//! bound.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct MinPropertiesValidator {
    limit: u64,
}

impl Validate for MinPropertiesValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            ValidationError::min_properties(instance.clone())
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::Object(object) => object.len() as u64 >= self.limit,
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
        Some(limit) => Some(Ok(Box::new(MinPropertiesValidator { limit }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}
