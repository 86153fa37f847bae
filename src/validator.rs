//! The common interface every compiled keyword validator implements.
use crate::compilation::JSONSchema;
use crate::error::ErrorIterator;
use crate::value::Value;

/// A compiled keyword validator.
///
/// A schema object compiles into a `Vec` of these, one per recognised
/// keyword (see [`crate::compilation::compile_validators`]); composite
/// keywords (`allOf`, `$ref`, ...) hold nested `Vec<Box<dyn Validate>>` of
/// their own. `validate` is the only required method — `is_valid` has a
/// default built on top of it, but validators for which a boolean check is
/// meaningfully cheaper than building an error (short-circuiting
/// combinators, mostly) override it directly.
pub trait Validate {
    fn validate<'a>(&self, schema: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a>;

    #[must_use]
    fn is_valid(&self, schema: &JSONSchema, instance: &Value) -> bool {
        self.validate(schema, instance).next().is_none()
    }

    /// Injects `default` values at positions this validator owns, per §4.5:
    /// "when a validator has a `default`, and the corresponding event is
    /// absent, the DOM builder is instructed to insert the default value".
    /// Only called when [`crate::compilation::CompilationOptions::inject_defaults`]
    /// is enabled, and only after `instance` has already passed validation —
    /// a default is never used to paper over a genuine violation.
    ///
    /// The default no-op is correct for every leaf keyword (`type`,
    /// `minimum`, ...); only keywords that own named child positions
    /// (`properties`) or forward validation unconditionally to other
    /// keyword trees (`allOf`) need to override it.
    fn apply_defaults(&self, _schema: &JSONSchema, _instance: &mut Value) {}
}
