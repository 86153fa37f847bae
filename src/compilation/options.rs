//! Full configuration to guide `JSONSchema` compilation: draft selection,
//! whether `format` is actually checked, whether `default` values are
//! injected while walking a schema, and custom format validators.
use std::cell::RefCell;
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;

use url::Url;

use super::context::CompilationContext;
use super::{compile_validators, JSONSchema, DEFAULT_SCOPE};
use crate::error::CompilationError;
use crate::resolver::{ExternalResolver, Resolver};
use crate::schemas::{self, Draft};
use crate::value::Value;

/// A custom `format` checker: returns whether `instance` satisfies the
/// format the caller registered it under.
pub type FormatCheck = fn(&str) -> bool;

#[derive(Clone)]
pub struct CompilationOptions {
    draft: Option<Draft>,
    validate_formats: bool,
    inject_defaults: bool,
    custom_formats: HashMap<String, FormatCheck>,
}

impl Default for CompilationOptions {
    fn default() -> Self {
        CompilationOptions {
            draft: None,
            validate_formats: true,
            inject_defaults: false,
            custom_formats: HashMap::new(),
        }
    }
}

impl CompilationOptions {
    pub(crate) fn draft(&self) -> Draft {
        self.draft.unwrap_or(Draft::Draft4)
    }

    pub(crate) fn validates_formats(&self) -> bool {
        self.validate_formats
    }

    pub(crate) fn injects_defaults(&self) -> bool {
        self.inject_defaults
    }

    pub(crate) fn custom_format(&self, name: &str) -> Option<FormatCheck> {
        self.custom_formats.get(name).copied()
    }

    fn set_draft_if_missing(&mut self, schema: &Value) {
        if self.draft.is_none() {
            self.draft = Some(schemas::draft_from_schema(schema));
        }
    }

    /// Ensures the schema is compiled against the given draft rather than
    /// whatever `$schema` (or lack of it) would otherwise select.
    #[must_use]
    pub fn with_draft(&mut self, draft: Draft) -> &mut Self {
        self.draft = Some(draft);
        self
    }

    /// Toggles whether `format` is actually checked. Unknown format names are
    /// always ignored regardless of this setting — this only controls
    /// whether *recognised* format names are enforced.
    #[must_use]
    pub fn validate_formats(&mut self, value: bool) -> &mut Self {
        self.validate_formats = value;
        self
    }

    /// Toggles whether `Value::array_push`/`object_insert`-style default
    /// injection runs while a schema with `default` is applied during a
    /// validating parse.
    #[must_use]
    pub fn inject_defaults(&mut self, value: bool) -> &mut Self {
        self.inject_defaults = value;
        self
    }

    /// Registers a checker for a `format` name this crate doesn't recognise
    /// natively.
    #[must_use]
    pub fn with_format(&mut self, name: impl Into<String>, check: FormatCheck) -> &mut Self {
        self.custom_formats.insert(name.into(), check);
        self
    }

    /// Compiles `schema` using the options accumulated so far.
    ///
    /// # Errors
    /// Returns [`CompilationError::SchemaError`] if the schema itself is
    /// malformed (not an object or boolean, an unresolvable `id`, ...).
    pub fn compile<'a>(&self, schema: &'a Value) -> Result<JSONSchema<'a>, CompilationError> {
        let mut options = self.clone();
        options.set_draft_if_missing(schema);
        let options = Rc::new(options);

        let scope = match schemas::id_of(options.draft(), schema) {
            Some(url) => Url::parse(url)?,
            None => DEFAULT_SCOPE.clone(),
        };
        let resolver = Resolver::new(options.draft(), &scope, schema);
        let context = CompilationContext::new(scope, Rc::clone(&options));

        let mut validators = compile_validators(schema, &context)?;
        validators.shrink_to_fit();

        Ok(JSONSchema {
            schema,
            validators,
            resolver,
            options,
            ref_cache: RefCell::new(HashMap::new()),
        })
    }

    /// As [`CompilationOptions::compile`], but resolves out-of-document
    /// `$ref`s through `external` instead of failing on them.
    pub fn compile_with_resolver<'a>(
        &self,
        schema: &'a Value,
        external: Box<dyn ExternalResolver + 'a>,
    ) -> Result<JSONSchema<'a>, CompilationError> {
        let mut options = self.clone();
        options.set_draft_if_missing(schema);
        let options = Rc::new(options);

        let scope = match schemas::id_of(options.draft(), schema) {
            Some(url) => Url::parse(url)?,
            None => DEFAULT_SCOPE.clone(),
        };
        let resolver = Resolver::new(options.draft(), &scope, schema).with_external(external);
        let context = CompilationContext::new(scope, Rc::clone(&options));

        let mut validators = compile_validators(schema, &context)?;
        validators.shrink_to_fit();

        Ok(JSONSchema {
            schema,
            validators,
            resolver,
            options,
            ref_cache: RefCell::new(HashMap::new()),
        })
    }
}

impl fmt::Debug for CompilationOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CompilationOptions")
            .field("draft", &self.draft)
            .field("validate_formats", &self.validate_formats)
            .field("inject_defaults", &self.inject_defaults)
            .field("custom_formats", &self.custom_formats.keys().collect::<Vec<_>>())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draft_detection_defaults_to_draft4() {
        let options = CompilationOptions::default();
        let compiled = options.compile(&Value::object_from(Vec::<(String, Value)>::new()));
        assert!(compiled.is_ok());
    }

    #[test]
    fn with_draft_overrides_schema_url() {
        let mut options = CompilationOptions::default();
        options.with_draft(Draft::Draft4);
        let schema = Value::object_from(vec![("type", Value::string("string"))]);
        assert!(options.compile(&schema).is_ok());
    }
}
