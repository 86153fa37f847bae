//! `enum`: an instance is valid if it equals one of the listed values,
//! compared structurally via `Value`'s own `PartialEq`.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct EnumValidator {
    options: Value,
    items: Vec<Value>,
}

impl Validate for EnumValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid(schema, instance) {
            no_error()
        } else {
            ValidationError::enumeration(instance.clone(), self.options.clone())
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        self.items.iter().any(|item| item == instance)
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Array(items) => Some(Ok(Box::new(EnumValidator {
            options: subschema.clone(),
            items: items.as_slice().to_vec(),
        }))),
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;
    use crate::value::Number;

    #[test]
    fn accepts_listed_value() {
        let schema = Value::object_from(vec![(
            "enum",
            Value::array_from(vec![Value::string("a"), Value::string("b")]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("a")));
        assert!(!compiled.is_valid(&Value::string("c")));
    }

    #[test]
    fn compares_numbers_across_representation() {
        let schema = Value::object_from(vec![(
            "enum",
            Value::array_from(vec![Value::Number(Number::from_f64(3.0))]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(Number::from_i64(3))));
    }
}
