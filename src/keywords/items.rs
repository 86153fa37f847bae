//! `items`: either one subschema applied to every array element, or a tuple
//! of subschemas applied positionally (see `additionalItems` for what
//! happens to elements past the tuple's length).
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, ErrorIterator},
    keywords::{boolean::TrueValidator, CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct ItemsArrayValidator {
    items: Vec<Validators>,
}

impl Validate for ItemsArrayValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Array(elements) = instance else {
            return no_error();
        };
        Box::new(
            elements
                .iter()
                .zip(self.items.iter())
                .flat_map(move |(item, validators)| {
                    validators
                        .iter()
                        .flat_map(move |validator| validator.validate(schema, item))
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Array(elements) = instance else {
            return true;
        };
        elements
            .iter()
            .zip(self.items.iter())
            .all(|(item, validators)| validators.iter().all(|validator| validator.is_valid(schema, item)))
    }
}

pub struct ItemsObjectValidator {
    validators: Validators,
}

impl Validate for ItemsObjectValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Array(elements) = instance else {
            return no_error();
        };
        Box::new(
            self.validators
                .iter()
                .flat_map(move |validator| {
                    elements.iter().flat_map(move |item| validator.validate(schema, item))
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Array(elements) = instance else {
            return true;
        };
        self.validators
            .iter()
            .all(|validator| elements.iter().all(|item| validator.is_valid(schema, item)))
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Array(items) => {
            let mut compiled = Vec::with_capacity(items.len());
            for item in items.iter() {
                match compile_validators(item, context) {
                    Ok(validators) => compiled.push(validators),
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(Box::new(ItemsArrayValidator { items: compiled })))
        }
        Value::Bool(true) => Some(TrueValidator::compile()),
        _ => match compile_validators(subschema, context) {
            Ok(validators) => Some(Ok(Box::new(ItemsObjectValidator { validators }))),
            Err(e) => Some(Err(e)),
        },
    }
}
