//! `additionalItems`: constrains array elements past the end of a tuple
//! `items` schema. Has no effect unless the sibling `items` is itself an
//! array (a single-subschema `items` already covers every element).
use crate::{
    compilation::{compile_validators, context::CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{boolean::TrueValidator, CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct AdditionalItemsObjectValidator {
    validators: Validators,
    items_count: usize,
}

impl Validate for AdditionalItemsObjectValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Array(elements) = instance else {
            return no_error();
        };
        Box::new(
            elements
                .iter()
                .skip(self.items_count)
                .flat_map(|item| {
                    self.validators
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
            .skip(self.items_count)
            .all(|item| self.validators.iter().all(|validator| validator.is_valid(schema, item)))
    }
}

pub struct AdditionalItemsFalseValidator {
    items_count: usize,
}

impl Validate for AdditionalItemsFalseValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Array(elements) = instance else {
            return no_error();
        };
        if elements.len() > self.items_count {
            let extra: Vec<Value> = elements.iter().skip(self.items_count).cloned().collect();
            ValidationError::additional_items(extra, self.items_count)
        } else {
            no_error()
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::Array(elements) => elements.len() <= self.items_count,
            _ => true,
        }
    }
}

pub fn compile(
    context: &CompilationContext,
    parent: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    let items_count = match parent.as_object().and_then(|object| object.get("items")) {
        Some(Value::Array(items)) => items.len(),
        _ => return None,
    };
    match subschema {
        Value::Bool(true) => Some(TrueValidator::compile()),
        Value::Bool(false) => Some(Ok(Box::new(AdditionalItemsFalseValidator { items_count }))),
        Value::Object(_) => match compile_validators(subschema, context) {
            Ok(validators) => Some(Ok(Box::new(AdditionalItemsObjectValidator {
                validators,
                items_count,
            }))),
            Err(e) => Some(Err(e)),
        },
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn extra_tuple_elements_rejected_when_false() {
        let schema = Value::object_from(vec![
            (
                "items",
                Value::array_from(vec![Value::object_from(vec![("type", Value::string("integer"))])]),
            ),
            ("additionalItems", Value::Bool(false)),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let ok = Value::array_from(vec![Value::Number(crate::value::Number::from_i64(1))]);
        let too_many = Value::array_from(vec![
            Value::Number(crate::value::Number::from_i64(1)),
            Value::Bool(true),
        ]);
        assert!(compiled.is_valid(&ok));
        assert!(!compiled.is_valid(&too_many));
    }
}
