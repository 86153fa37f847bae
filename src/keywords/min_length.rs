//! `minLength`: rejects strings shorter than the given bound, counted in
//! Unicode scalar values rather than bytes.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct MinLengthValidator {
    limit: u64,
}

impl Validate for MinLengthValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match instance {
            Value::String(s) if (s.chars().count() as u64) < self.limit => {
                ValidationError::min_length(s.to_string())
            }
            _ => no_error(),
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::String(s) => s.chars().count() as u64 >= self.limit,
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
        Some(limit) => Some(Ok(Box::new(MinLengthValidator { limit }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}
