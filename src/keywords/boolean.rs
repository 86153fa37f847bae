//! The two boolean schemas: `true` accepts anything, `false` rejects
//! everything. Draft-04 schemas are otherwise always objects, but a nested
//! subschema (`items`, `additionalProperties`, ...) may be a bare boolean.
use crate::{
    compilation::JSONSchema,
    error::{no_error, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct TrueValidator;

impl TrueValidator {
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(TrueValidator))
    }
}

impl Validate for TrueValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, _: &'a Value) -> ErrorIterator<'a> {
        no_error()
    }

    fn is_valid(&self, _: &JSONSchema, _: &Value) -> bool {
        true
    }
}

pub struct FalseValidator;

impl FalseValidator {
    pub(crate) fn compile() -> CompilationResult {
        Ok(Box::new(FalseValidator))
    }
}

impl Validate for FalseValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        ValidationError::false_schema(instance.clone())
    }

    fn is_valid(&self, _: &JSONSchema, _: &Value) -> bool {
        false
    }
}

pub fn compile(value: bool) -> Option<CompilationResult> {
    if value {
        Some(TrueValidator::compile())
    } else {
        Some(FalseValidator::compile())
    }
}
