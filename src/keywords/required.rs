//! `required`: every listed property name must be present on an object
//! instance. Non-object instances trivially satisfy it.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};
use std::rc::Rc;

pub struct RequiredValidator {
    required: Vec<Rc<str>>,
}

impl Validate for RequiredValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if let Value::Object(object) = instance {
            for property in &self.required {
                if !object.contains_key(property) {
                    return ValidationError::required(property.to_string());
                }
            }
        }
        no_error()
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        if let Value::Object(object) = instance {
            self.required.iter().all(|property| object.contains_key(property))
        } else {
            true
        }
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Array(items) => {
            let mut required = Vec::with_capacity(items.len());
            for item in items.iter() {
                match item.as_str() {
                    Some(name) => required.push(Rc::from(name)),
                    None => return Some(Err(CompilationError::SchemaError)),
                }
            }
            Some(Ok(Box::new(RequiredValidator { required })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
