//! `additionalProperties`: constrains properties not covered by `properties`
//! or `patternProperties` on the same schema object. A bare `true` (the
//! default) never compiles a validator at all.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};
use regex::Regex;
use std::rc::Rc;

enum Constraint {
    False,
    Validators(Validators),
}

pub struct AdditionalPropertiesValidator {
    constraint: Constraint,
    properties: Vec<Rc<str>>,
    patterns: Vec<Regex>,
}

impl AdditionalPropertiesValidator {
    fn is_additional(&self, property: &str) -> bool {
        !self.properties.iter().any(|name| name.as_ref() == property)
            && !self.patterns.iter().any(|re| re.is_match(property))
    }
}

impl Validate for AdditionalPropertiesValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Object(object) = instance else {
            return no_error();
        };
        match &self.constraint {
            Constraint::False => {
                for (key, _) in object.iter() {
                    if self.is_additional(key) {
                        return ValidationError::false_schema(Value::string(key.as_ref()));
                    }
                }
                no_error()
            }
            Constraint::Validators(validators) => Box::new(
                object
                    .iter()
                    .filter(move |(key, _)| self.is_additional(key))
                    .flat_map(move |(_, value)| {
                        validators
                            .iter()
                            .flat_map(move |validator| validator.validate(schema, value))
                    })
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
        }
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Object(object) = instance else {
            return true;
        };
        match &self.constraint {
            Constraint::False => object.iter().all(|(key, _)| !self.is_additional(key)),
            Constraint::Validators(validators) => object
                .iter()
                .filter(|(key, _)| self.is_additional(key))
                .all(|(_, value)| validators.iter().all(|validator| validator.is_valid(schema, value))),
        }
    }
}

fn property_names(parent: &Value, keyword: &str) -> Vec<Rc<str>> {
    match parent.as_object().and_then(|object| object.get(keyword)) {
        Some(Value::Object(map)) => map.keys().map(Rc::clone).collect(),
        _ => Vec::new(),
    }
}

fn pattern_regexes(parent: &Value) -> Result<Vec<Regex>, CompilationError> {
    match parent.as_object().and_then(|object| object.get("patternProperties")) {
        Some(Value::Object(map)) => map.keys().map(|pattern| Ok(Regex::new(pattern)?)).collect(),
        _ => Ok(Vec::new()),
    }
}

pub fn compile(
    context: &CompilationContext,
    parent: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    if let Value::Bool(true) = subschema {
        return None;
    }
    let patterns = match pattern_regexes(parent) {
        Ok(patterns) => patterns,
        Err(e) => return Some(Err(e)),
    };
    let properties = property_names(parent, "properties");
    let constraint = match subschema {
        Value::Bool(false) => Constraint::False,
        _ => match compile_validators(subschema, context) {
            Ok(validators) => Constraint::Validators(validators),
            Err(e) => return Some(Err(e)),
        },
    };
    Some(Ok(Box::new(AdditionalPropertiesValidator {
        constraint,
        properties,
        patterns,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn extra_property_rejected_when_false() {
        let schema = Value::object_from(vec![
            ("properties", Value::object_from(vec![("a", Value::Bool(true))])),
            ("additionalProperties", Value::Bool(false)),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::object_from(vec![("a", Value::Bool(true))])));
        assert!(!compiled.is_valid(&Value::object_from(vec![("b", Value::Bool(true))])));
    }

    #[test]
    fn pattern_property_is_not_additional() {
        let schema = Value::object_from(vec![
            ("patternProperties", Value::object_from(vec![("^x_", Value::Bool(true))])),
            ("additionalProperties", Value::Bool(false)),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::object_from(vec![("x_foo", Value::Bool(true))])));
        assert!(!compiled.is_valid(&Value::object_from(vec![("bar", Value::Bool(true))])));
    }

    #[test]
    fn additional_with_subschema_validates_type() {
        let schema = Value::object_from(vec![(
            "additionalProperties",
            Value::object_from(vec![("type", Value::string("integer"))]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::object_from(vec![("a", Value::Number(crate::value::Number::from_i64(1)))])));
        assert!(!compiled.is_valid(&Value::object_from(vec![("a", Value::string("x"))])));
    }
}
