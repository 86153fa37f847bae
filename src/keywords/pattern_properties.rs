//! `patternProperties`: validates every property whose name matches a
//! regular-expression key against that key's subschema. A property name can
//! match more than one pattern; each matching subschema applies.
use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};
use regex::Regex;

pub struct PatternPropertiesValidator {
    patterns: Vec<(Regex, Validators)>,
}

impl Validate for PatternPropertiesValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        let Value::Object(object) = instance else {
            return no_error();
        };
        Box::new(
            self.patterns
                .iter()
                .flat_map(|(re, validators)| {
                    object
                        .iter()
                        .filter(move |(key, _)| re.is_match(key))
                        .flat_map(move |(_, value)| {
                            validators
                                .iter()
                                .flat_map(move |validator| validator.validate(schema, value))
                        })
                })
                .collect::<Vec<_>>()
                .into_iter(),
        )
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        let Value::Object(object) = instance else {
            return true;
        };
        self.patterns.iter().all(|(re, validators)| {
            object
                .iter()
                .filter(|(key, _)| re.is_match(key))
                .all(|(_, value)| validators.iter().all(|validator| validator.is_valid(schema, value)))
        })
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::Object(map) => {
            let mut patterns = Vec::with_capacity(map.len());
            for (pattern, property_schema) in map.iter() {
                let regex = match Regex::new(pattern) {
                    Ok(regex) => regex,
                    Err(e) => return Some(Err(CompilationError::from(e))),
                };
                match compile_validators(property_schema, context) {
                    Ok(validators) => patterns.push((regex, validators)),
                    Err(e) => return Some(Err(e)),
                }
            }
            Some(Ok(Box::new(PatternPropertiesValidator { patterns })))
        }
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
