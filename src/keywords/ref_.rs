//! `$ref`: an instance validates against whatever subschema the reference
//! resolves to. The target is compiled lazily, on first use, and cached on
//! the owning [`JSONSchema`] — compiling it eagerly at schema-compile time
//! would recurse forever on a cyclic pair of references.
use std::rc::Rc;

use url::Url;

use crate::{
    compilation::{compile_validators, CompilationContext, JSONSchema},
    error::{error, CompilationError, ErrorIterator, ValidationError},
    keywords::{CompilationResult, Validators},
    validator::Validate,
    value::Value,
};

pub struct RefValidator {
    reference: Url,
}

impl RefValidator {
    /// Returns the target's validators, compiling and caching them on first
    /// call. A reference cycle resolves to an empty validator list: the
    /// cycle's second visit finds the placeholder this call inserts before
    /// recursing, rather than recompiling forever.
    fn ensure_validators<'a>(
        &self,
        schema: &'a JSONSchema,
    ) -> Result<Rc<Validators>, ValidationError> {
        let key = self.reference.to_string();
        if let Some(validators) = schema.ref_cache.borrow().get(&key) {
            return Ok(Rc::clone(validators));
        }
        schema
            .ref_cache
            .borrow_mut()
            .insert(key.clone(), Rc::new(Vec::new()));

        let resolved = schema.resolver().resolve(&self.reference)?;
        let context = CompilationContext::new(self.reference.clone(), Rc::clone(schema.compiled_options()));
        let validators =
            Rc::new(compile_validators(&resolved, &context).map_err(|_| ValidationError::schema())?);
        schema
            .ref_cache
            .borrow_mut()
            .insert(key, Rc::clone(&validators));
        Ok(validators)
    }
}

impl Validate for RefValidator {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match self.ensure_validators(schema) {
            Ok(validators) => Box::new(
                validators
                    .iter()
                    .flat_map(move |validator| validator.validate(schema, instance))
                    .collect::<Vec<_>>()
                    .into_iter(),
            ),
            Err(err) => error(err),
        }
    }

    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        match self.ensure_validators(schema) {
            Ok(validators) => validators
                .iter()
                .all(|validator| validator.is_valid(schema, instance)),
            Err(_) => false,
        }
    }
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    let Value::String(reference) = subschema else {
        return Some(Err(CompilationError::SchemaError));
    };
    match context.build_url(reference) {
        Ok(reference) => Some(Ok(Box::new(RefValidator { reference }))),
        Err(_) => Some(Err(CompilationError::SchemaError)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn resolves_sibling_definition() {
        let schema = Value::object_from(vec![
            (
                "definitions",
                Value::object_from(vec![("positive", Value::object_from(vec![(
                    "minimum",
                    Value::Number(Number::from_i64(0)),
                )]))]),
            ),
            (
                "$ref",
                Value::string("#/definitions/positive"),
            ),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Number(Number::from_i64(1))));
        assert!(!compiled.is_valid(&Value::Number(Number::from_i64(-1))));
    }

    #[test]
    fn self_reference_does_not_recurse_forever() {
        let schema = Value::object_from(vec![
            (
                "definitions",
                Value::object_from(vec![(
                    "node",
                    Value::object_from(vec![
                        ("type", Value::string("object")),
                        (
                            "properties",
                            Value::object_from(vec![(
                                "next",
                                Value::object_from(vec![(
                                    "$ref",
                                    Value::string("#/definitions/node"),
                                )]),
                            )]),
                        ),
                    ]),
                )]),
            ),
            ("$ref", Value::string("#/definitions/node")),
        ]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let instance = Value::object_from(vec![(
            "next",
            Value::object_from(vec![("next", Value::object_from(Vec::<(String, Value)>::new()))]),
        )]);
        assert!(compiled.is_valid(&instance));
        assert!(!compiled.is_valid(&Value::string("not an object")));
    }
}
