//! `uniqueItems`: rejects arrays containing two structurally equal elements.
//! Delegates to `Value`'s own `Hash`/`Eq` impls rather than re-deriving a
//! JSON-aware hash.
use std::collections::HashSet;

use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub fn is_unique(items: &[Value]) -> bool {
    let mut seen = HashSet::with_capacity(items.len());
    items.iter().all(move |item| seen.insert(item))
}

pub struct UniqueItemsValidator;

impl Validate for UniqueItemsValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match instance {
            Value::Array(items) if !is_unique(items.as_slice()) => {
                ValidationError::unique_items(instance.clone())
            }
            _ => no_error(),
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::Array(items) => is_unique(items.as_slice()),
            _ => true,
        }
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Bool(true) => Some(Ok(Box::new(UniqueItemsValidator))),
        _ => None,
    }
}
