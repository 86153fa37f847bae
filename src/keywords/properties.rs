//! `properties`: validates each named property against its own subschema
//! when the instance has that property. Properties not listed here are
//! untouched (see `additionalProperties`/`patternProperties` for those).
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{CompilationError, ErrorIterator},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};
use std::rc::Rc;

pub struct PropertiesValidator {
    properties: Vec<(Rc<str>, Validators, Option<Value>)>,
}

impl Validate for PropertiesValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Object(object) = instance else {
            return crate::error::no_error();
        };
        Box::new(
            self.properties
                .iter()
                .filter_map(move |(name, validators, _)| {
                    object.get(name).map(move |value| (validators, value))
                })
                .flat_map(move |(validators, value)| {
                    validators
                        .iter()
                        .flat_map(move |validator| validator.validate(schema, value))
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Object(object) = instance else {
            return true;
        };
        self.properties.iter().all(|(name, validators, _)| match object.get(name) {
            Some(value) => validators.iter().all(|validator| validator.is_valid(schema, value)),
            None => true,
        })
    }

    /// For each named property: if the instance already has it, recurse into
    /// its subschema's own defaults; if it is absent and the subschema names
    /// a `default`, insert a copy of that default.
    fn apply_defaults(&self, schema: &JSONSchema, instance: &mut Value) {
        if !matches!(instance, Value::Object(_)) {
            return;
        }
        for (name, validators, default) in &self.properties {
            if let Some(existing) = instance.object_get_mut(name) {
                for validator in validators.iter() {
                    validator.apply_defaults(schema, existing);
                }
            } else if let Some(default) = default {
                let _ = instance.object_insert(Rc::clone(name), default.duplicate());
            }
        }
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Object(map) => {
            let mut properties = Vec::with_capacity(map.len());
            for (key, property_schema) in map.iter() {
                match compile_validators(property_schema, context) {
                    Ok(validators) => {
                        let default = property_schema.object_get("default").map(Value::duplicate);
                        properties.push((Rc::clone(key), validators, default));
                    }
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(Box::new(PropertiesValidator { properties })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn property_is_validated_against_its_subschema() {
        let schema = Value::object_from(vec![(
            "properties",
            Value::object_from(vec![("age", Value::object_from(vec![("type", Value::string("integer"))]))]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let good = Value::object_from(vec![("age", Value::Number(crate::value::Number::from_i64(10)))]);
        let bad = Value::object_from(vec![("age", Value::string("ten"))]);
        assert!(compiled.is_valid(&good));
        assert!(!compiled.is_valid(&bad));
    }

    #[test]
    fn missing_property_is_not_checked() {
        let schema = Value::object_from(vec![(
            "properties",
            Value::object_from(vec![("age", Value::object_from(vec![("type", Value::string("integer"))]))]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::object_from(Vec::<(String, Value)>::new())));
    }

    #[test]
    fn apply_defaults_fills_absent_properties_only() {
        let schema = Value::object_from(vec![(
            "properties",
            Value::object_from(vec![(
                "n",
                Value::object_from(vec![
                    ("type", Value::string("integer")),
                    ("default", Value::Number(crate::value::Number::from_i64(42))),
                ]),
            )]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();

        let mut absent = Value::object_from(Vec::<(String, Value)>::new());
        for validator in compiled.validators.iter() {
            validator.apply_defaults(&compiled, &mut absent);
        }
        assert_eq!(absent.object_get("n").and_then(Value::as_i64), Some(42));

        let mut present = Value::object_from(vec![("n", Value::Number(crate::value::Number::from_i64(7)))]);
        for validator in compiled.validators.iter() {
            validator.apply_defaults(&compiled, &mut present);
        }
        assert_eq!(present.object_get("n").and_then(Value::as_i64), Some(7));
    }
}
