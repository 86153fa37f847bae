//! `multipleOf`: rejects numbers that are not an integer multiple of the
//! given divisor.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

const EPSILON: f64 = f64::EPSILON;

pub struct MultipleOfValidator {
    multiple_of: f64,
}

impl MultipleOfValidator {
    fn is_multiple(&self, instance_value: f64) -> bool {
        if instance_value.fract() == 0.0 && self.multiple_of.fract() == 0.0 {
            (instance_value % self.multiple_of) == 0.0
        } else {
            let remainder = (instance_value / self.multiple_of) % 1.0;
            remainder < EPSILON && remainder < (1.0 - EPSILON)
        }
    }
}

impl Validate for MultipleOfValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            let instance_value = instance.as_number().map_or(0.0, crate::value::Number::as_f64);
            ValidationError::multiple_of(instance_value, self.multiple_of)
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance.as_number() {
            Some(number) => self.is_multiple(number.as_f64()),
            None => true,
        }
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema.as_number() {
        Some(number) => Some(Ok(Box::new(MultipleOfValidator {
            multiple_of: number.as_f64(),
        }))),
        None => Some(Err(CompilationError::SchemaError)),
    }
}
