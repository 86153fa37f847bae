//! `oneOf`: an instance must validate against exactly one listed subschema.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct OneOfValidator {
    schemas: Vec<Validators>,
}

impl OneOfValidator {
    fn valid_count(&self, schema: &JSONSchema, instance: &Value) -> usize {
        self.schemas
            .iter()
            .filter(|validators| {
                validators.iter().all(|validator| validator.is_valid(schema, instance))
            })
            .count()
    }
}

impl Validate for OneOfValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match self.valid_count(schema, instance) {
            1 => no_error(),
            0 => ValidationError::one_of_not_valid(instance.clone()),
            _ => ValidationError::one_of_multiple_valid(instance.clone()),
        }
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        self.valid_count(schema, instance) == 1
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
            Some(Ok(Box::new(OneOfValidator { schemas })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn exactly_one_match_is_valid() {
        let schema = Value::object_from(vec![(
            "oneOf",
            Value::array_from(vec![
                Value::object_from(vec![("type", Value::string("integer"))]),
                Value::object_from(vec![("minimum", Value::Number(crate::value::Number::from_i64(0)))]),
            ]),
        )]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("not matched by either")));
        assert!(!compiled.is_valid(&Value::Number(crate::value::Number::from_i64(1))));
        assert!(compiled.is_valid(&Value::Number(crate::value::Number::from_f64(1.5))));
    }
}
