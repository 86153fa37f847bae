//! Schema compilation: turns a schema `Value` into a tree of keyword
//! validators that can be run against instances repeatedly without
//! re-walking the schema.
pub(crate) mod context;
pub mod options;

pub use context::CompilationContext;
pub use options::CompilationOptions;

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use url::Url;

use crate::error::{CompilationError, ErrorIterator};
use crate::keywords::{self, Validators};
use crate::resolver::Resolver;
use crate::value::Value;

pub const DEFAULT_ROOT_URL: &str = "json-schema:///";

lazy_static::lazy_static! {
    static ref DEFAULT_SCOPE: Url = Url::parse(DEFAULT_ROOT_URL).expect("is a valid URL");
}

/// A schema compiled into a validation tree.
pub struct JSONSchema<'a> {
    pub(crate) schema: &'a Value,
    pub(crate) validators: Validators,
    pub(crate) resolver: Resolver<'a>,
    pub(crate) options: Rc<CompilationOptions>,
    /// Lazily-compiled validator trees for `$ref` targets, keyed by resolved
    /// absolute URI. A `$ref` cannot eagerly compile its target at schema-
    /// compile time without risking infinite recursion on a cyclic reference
    /// pair (`A` refs `B`, `B` refs `A`); instead each `RefValidator` compiles
    /// its target the first time it is actually validated against and caches
    /// the result here, keyed by its own URI, *before* recursing into the
    /// target — so a cycle's second visit finds the (possibly still-empty)
    /// cache entry instead of looping.
    pub(crate) ref_cache: RefCell<HashMap<String, Rc<Validators>>>,
}

impl<'a> JSONSchema<'a> {
    /// Compiles `schema` with default options (draft auto-detected from
    /// `$schema`, falling back to draft-04).
    ///
    /// # Errors
    /// Returns [`CompilationError::SchemaError`] if the schema is malformed.
    pub fn compile(schema: &'a Value) -> Result<JSONSchema<'a>, CompilationError> {
        CompilationOptions::default().compile(schema)
    }

    /// Starts a builder for compiling with non-default options.
    #[must_use]
    pub fn options() -> CompilationOptions {
        CompilationOptions::default()
    }

    /// The root schema this was compiled from.
    #[must_use]
    pub fn schema(&self) -> &Value {
        self.schema
    }

    pub(crate) fn resolver(&self) -> &Resolver<'a> {
        &self.resolver
    }

    pub(crate) fn compiled_options(&self) -> &Rc<CompilationOptions> {
        &self.options
    }

    /// Validates `instance`, collecting every violation rather than stopping
    /// at the first.
    ///
    /// # Errors
    /// Returns an iterator over every [`crate::error::ValidationError`] found.
    pub fn validate(&'a self, instance: &'a Value) -> Result<(), ErrorIterator<'a>> {
        let mut errors = self
            .validators
            .iter()
            .flat_map(move |validator| validator.validate(self, instance))
            .peekable();
        if errors.peek().is_none() {
            Ok(())
        } else {
            Err(Box::new(errors))
        }
    }

    /// Like [`JSONSchema::validate`], but only reports whether `instance` is
    /// valid — faster when the set of errors is not needed.
    #[must_use]
    pub fn is_valid(&self, instance: &Value) -> bool {
        self.validators
            .iter()
            .all(|validator| validator.is_valid(self, instance))
    }

    /// Inserts `default` values named anywhere in the schema at the
    /// corresponding absent positions in `instance`, per §4.5. Only
    /// meaningful to call on an `instance` that has already passed
    /// [`JSONSchema::validate`] — this never runs keyword checks, only
    /// keyword-owned default insertion.
    pub fn apply_defaults(&self, instance: &mut Value) {
        for validator in self.validators.iter() {
            validator.apply_defaults(self, instance);
        }
    }
}

/// Compiles a schema object or boolean into its keyword validator tree.
pub(crate) fn compile_validators(
    schema: &Value,
    context: &CompilationContext,
) -> Result<Validators, CompilationError> {
    let context = context.push(schema);
    match schema {
        Value::Bool(value) => Ok(vec![
            keywords::boolean::compile(*value).expect("boolean schemas always compile")?
        ]),
        Value::Object(object) => {
            if let Some(reference) = object.get("$ref") {
                return Ok(vec![keywords::ref_::compile(&context, schema, reference)
                    .expect("$ref always compiles when present")?]);
            }
            let mut validators = Vec::with_capacity(object.len());
            for (keyword, subschema) in object.iter() {
                if let Some(compile_fn) = context.draft().get_validator(keyword) {
                    if let Some(validator) = compile_fn(&context, schema, subschema) {
                        validators.push(validator?);
                    }
                }
            }
            Ok(validators)
        }
        _ => Err(CompilationError::SchemaError),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_keyword() {
        let schema = Value::object_from(vec![("type", Value::string("string"))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let value1 = Value::string("AB");
        let value2 = Value::Number(crate::value::Number::from_i64(1));
        assert_eq!(compiled.validators.len(), 1);
        assert!(compiled.validate(&value1).is_ok());
        assert!(compiled.validate(&value2).is_err());
    }

    #[test]
    fn wrong_schema_type() {
        let schema = Value::array_from(vec![Value::Number(crate::value::Number::from_i64(1))]);
        assert!(JSONSchema::compile(&schema).is_err());
    }

    #[test]
    fn multiple_errors_collected() {
        let schema = Value::object_from(vec![
            ("minProperties", Value::Number(crate::value::Number::from_i64(2))),
            ("required", Value::array_from(vec![Value::string("a"), Value::string("b")])),
        ]);
        let value = Value::object_from(vec![("a", Value::Bool(true))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        let errors: Vec<_> = compiled.validate(&value).unwrap_err().collect();
        assert_eq!(errors.len(), 2);
    }

    #[test]
    fn false_schema_rejects_everything() {
        let schema = Value::Bool(false);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(!compiled.is_valid(&Value::Null));
    }

    #[test]
    fn true_schema_accepts_everything() {
        let schema = Value::Bool(true);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::Null));
    }
}
