//! `dependencies`: a property name maps either to an array of other property
//! names it requires (same semantics as `required`, scoped to this one
//! dependency), or to a subschema the whole instance must satisfy once the
//! triggering property is present.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{required, CompilationResult, Validators},
    validator::Validate,
    value::Value,
};
use std::rc::Rc;

pub struct DependenciesValidator {
    dependencies: Vec<(Rc<str>, Validators)>,
}

impl Validate for DependenciesValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Object(object) = instance else {
            return no_error();
        };
        Box::new(
            self.dependencies
                .iter()
                .filter(move |(property, _)| object.contains_key(property))
                .flat_map(move |(_, validators)| {
                    validators
                        .iter()
                        .flat_map(move |validator| validator.validate(schema, instance))
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Object(object) = instance else {
            return true;
        };
        self.dependencies
            .iter()
            .filter(|(property, _)| object.contains_key(property))
            .all(|(_, validators)| validators.iter().all(|validator| validator.is_valid(schema, instance)))
    }
}

pub fn compile(
    context: &CompilationContext,
    parent: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Object(map) => {
            let mut dependencies = Vec::with_capacity(map.len());
            for (key, value) in map.iter() {
                let validators = match value {
                    Value::Array(_) => match required::compile(context, parent, value) {
                        Some(Ok(validator)) => vec![validator],
                        Some(Err(e)) => return Some(Err(e)),
                        None => Vec::new(),
                    },
                    _ => match compile_validators(value, context) {
                        Ok(validators) => validators,
                        Err(e) => return Some(Err(e)),
                    },
                };
                dependencies.push((Rc::clone(key), validators));
            }
            Some(Ok(Box::new(DependenciesValidator { dependencies })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn array_dependency_requires_sibling_property() {
        let schema = Value::object_from(vec![(
            "dependencies",
            Value::object_from(vec![(
                "credit_card",
                Value::array_from(vec![Value::string("billing_address")]),
            )]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let missing = Value::object_from(vec![("credit_card", Value::Bool(true))]);
        let present = Value::object_from(vec![
            ("credit_card", Value::Bool(true)),
            ("billing_address", Value::string("x")),
        ]);
        assert!(!compiled.is_valid(&missing));
        assert!(compiled.is_valid(&present));
    }

    #[test]
    fn schema_dependency_validates_whole_instance() {
        let schema = Value::object_from(vec![(
            "dependencies",
            Value::object_from(vec![(
                "a",
                Value::object_from(vec![(
                    "properties",
                    Value::object_from(vec![("b", Value::object_from(vec![("type", Value::string("string"))]))]),
                )]),
            )]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let ok = Value::object_from(vec![("a", Value::Bool(true)), ("b", Value::string("x"))]);
        let bad = Value::object_from(vec![("a", Value::Bool(true)), ("b", Value::Bool(true))]);
        assert!(compiled.is_valid(&ok));
        assert!(!compiled.is_valid(&bad));
    }
}
