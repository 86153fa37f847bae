//! `not`: an instance is valid only if it fails the given subschema.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct NotValidator {
    original: Value,
    validators: Validators,
}

impl Validate for NotValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            ValidationError::not(instance.clone(), self.original.clone())
        }
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        !self.validators.iter().all(|validator| validator.is_valid(schema, instance))
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match compile_validators(subschema, context) {
        Ok(validators) => Some(Ok(Box::new(NotValidator {
            original: subschema.clone(),
            validators,
        }))),
        Err(e) => Some(Err(e)),
    }
}
