//! `allOf`: an instance must validate against every listed subschema.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{ErrorIterator, CompilationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct AllOfValidator {
    schemas: Vec<Validators>,
}

impl Validate for AllOfValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        Box::new(
            self.schemas
                .iter()
                .flat_map(move |validators| {
                    validators
                        .iter()
                        .flat_map(move |validator| validator.validate(schema, instance))
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        self.schemas.iter().all(|validators| {
            validators.iter().all(|validator| validator.is_valid(schema, instance))
        })
    }

    /// Forwards to every branch: `allOf` has no defaults of its own, but an
    /// instance satisfying it should still pick up defaults named by any of
    /// its branches' `properties`.
    fn apply_defaults(&self, schema: &JSONSchema, instance: &mut Value) {
        for validators in &self.schemas {
            for validator in validators.iter() {
                validator.apply_defaults(schema, instance);
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
        Value::Array(items) => {
            let mut schemas = Vec::with_capacity(items.len());
            for item in items.iter() {
                match compile_validators(item, context) {
                    Ok(validators) => schemas.push(validators),
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(Box::new(AllOfValidator { schemas })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn every_subschema_must_hold() {
        let schema = Value::object_from(vec![(
            "allOf",
            Value::array_from(vec![
                Value::object_from(vec![("type", Value::string("integer"))]),
                Value::object_from(vec![("minimum", Value::Number(crate::value::Number::from_i64(0)))]),
            ]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(crate::value::Number::from_i64(1))));
        assert!(!compiled.is_valid(&Value::Number(crate::value::Number::from_i64(-1))));
        assert!(!compiled.is_valid(&Value::string("x")));
    }
}
