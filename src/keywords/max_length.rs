//! `maxLength`: rejects strings longer than the given bound, counted in
//! Unicode scalar values rather than bytes.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct MaxLengthValidator {
    limit: u64,
}

impl Validate for MaxLengthValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match instance {
            Value::String(s) if s.chars().count() as u64 > self.limit => {
                ValidationError::max_length(s.to_string())
            }
            _ => no_error(),
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::String(s) => s.chars().count() as u64 <= self.limit,
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
        Some(limit) => Some(Ok(Box::new(MaxLengthValidator { limit }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn rejects_long_string() {
        let schema = Value::object_from(vec![(
            "maxLength",
            Value::Number(crate::value::Number::from_i64(2)),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("ab")));
        assert!(!compiled.is_valid(&Value::string("abc")));
    }
}
