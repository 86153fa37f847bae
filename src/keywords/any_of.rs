//! `anyOf`: an instance must validate against at least one listed subschema.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct AnyOfValidator {
    schemas: Vec<Validators>,
}

impl Validate for AnyOfValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            ValidationError::any_of(instance.clone())
        }
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        self.schemas.iter().any(|validators| {
            validators.iter().all(|validator| validator.is_valid(schema, instance))
        })
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Array(items) => {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items.iter() {
                match compile_validators(item, context) {
                    Ok(validators) => schemas.push(validators),
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(Box::new(AnyOfValidator { schemas })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
