//! `type`: restricts an instance to one (or, as an array, several) of the
//! seven JSON Schema primitive types, with `integer` distinguished from
//! `number` per [`Value::primitive_type`]'s definition of "is this a whole
//! number".
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    primitive_type::PrimitiveType,
    validator::Validate,
    value::Value,
};
use std::convert::TryFrom;

pub struct SingleTypeValidator {
    kind: PrimitiveType,
}

impl Validate for SingleTypeValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.matches(instance) {
            no_error()
        } else {
            ValidationError::single_type_error(instance.clone(), self.kind)
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        self.matches(instance)
    }
}

impl SingleTypeValidator {
    fn matches(&self, instance: &Value) -> bool {
        instance.primitive_type() == Some(self.kind)
    }
}

pub struct MultipleTypesValidator {
    kinds: Vec<PrimitiveType>,
}

impl Validate for MultipleTypesValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        if self.is_valid_inner(instance) {
            no_error()
        } else {
            ValidationError::multiple_type_error(instance.clone(), self.kinds.clone())
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        self.is_valid_inner(instance)
    }
}

impl MultipleTypesValidator {
    fn is_valid_inner(&self, instance: &Value) -> bool {
        match instance.primitive_type() {
            Some(kind) => self.kinds.contains(&kind),
            None => false,
        }
    }
}

fn single(name: &str) -> Option<CompilationResult> {
    match PrimitiveType::try_from(name) {
        Ok(kind) => Some(Ok(Box::new(SingleTypeValidator { kind }))),
        Err(()) => Some(Err(CompilationError::SchemaError)),
    }
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::String(name) => single(name),
        Value::Array(items) => {
            let mut kinds = Vec::with_capacity(items.len());
            for item in items.iter() {
                match item.as_str().and_then(|s| PrimitiveType::try_from(s).ok()) {
                    Some(kind) => kinds.push(kind),
                    None => return Some(Err(CompilationError::SchemaError)),
                }
            }
            if kinds.len() == 1 {
                Some(Ok(Box::new(SingleTypeValidator { kind: kinds[0] })))
            } else {
                Some(Ok(Box::new(MultipleTypesValidator { kinds })))
            }
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;
    use crate::value::Number;
    use test_case::test_case;

    #[test_case("null", Value::Null => true)]
    #[test_case("null", Value::Bool(false) => false)]
    #[test_case("boolean", Value::Bool(true) => true)]
    #[test_case("boolean", Value::Null => false)]
    #[test_case("integer", Value::Number(Number::from_i64(1)) => true)]
    #[test_case("integer", Value::Number(Number::from_f64(1.5)) => false)]
    #[test_case("number", Value::Number(Number::from_f64(1.5)) => true)]
    #[test_case("string", Value::string("x") => true)]
    #[test_case("string", Value::Number(Number::from_i64(1)) => false)]
    #[test_case("array", Value::array_from(Vec::<Value>::new()) => true)]
    #[test_case("object", Value::object_from(Vec::<(String, Value)>::new()) => true)]
    #[test_case("object", Value::array_from(Vec::<Value>::new()) => false)]
    fn single_type_matches_expected_instances(name: &str, instance: Value) -> bool {
        let schema = Value::object_from(vec![("type", Value::string(name))]);
        JSONSchema::compile(&schema).unwrap().is_valid(&instance)
    }

    #[test]
    fn single_type_rejects_mismatch() {
        let schema = Value::object_from(vec![("type", Value::string("string"))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("ok")));
        assert!(!compiled.is_valid(&Value::Bool(true)));
    }

    #[test]
    fn integer_is_distinct_from_number() {
        let schema = Value::object_from(vec![("type", Value::string("integer"))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(crate::value::Number::from_i64(1))));
        assert!(!compiled.is_valid(&Value::Number(crate::value::Number::from_f64(1.5))));
    }

    #[test]
    fn multiple_types_accepts_any_listed() {
        let schema = Value::object_from(vec![(
            "type",
            Value::array_from(vec![Value::string("integer"), Value::string("null")]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Null));
        assert!(compiled.is_valid(&Value::Number(crate::value::Number::from_i64(1))));
        assert!(!compiled.is_valid(&Value::Bool(true)));
    }
}
