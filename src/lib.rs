//! # jvalid
//!
//! A JSON document library built around three tightly coupled pieces: a
//! reference-counted value tree ([`value::Value`]), a SAX-style parsing
//! pipeline ([`sax`], [`dom`]) and a JSON Schema (draft-04) validator
//! ([`compilation`], [`keywords`]) that runs as part of that same pipeline
//! instead of as a second pass over an already-built tree.
//!
//! Supports:
//!   - JSON Schema draft-04 (the full reachable keyword set, `$ref` included);
//!   - A hand-rolled SAX lexer that preserves the original lexeme of every
//!     number and accepts `//`/`/* */` comments in schema documents only;
//!   - External `$ref` targets via a caller-supplied [`resolver::ExternalResolver`].
//!
//! ## Example
//!
//! ```rust
//! use jvalid::{dom, JSONSchema, Value};
//!
//! let schema = Value::object_from(vec![("maxLength", Value::Number(jvalid::value::Number::from_i64(5)))]);
//! let compiled = JSONSchema::compile(&schema).unwrap();
//! let instance = dom::parse_str(r#""foo""#).unwrap();
//! if let Err(errors) = compiled.validate(&instance) {
//!     for error in errors {
//!         println!("Validation error: {}", error);
//!     }
//! }
//! ```
#![warn(
    clippy::doc_markdown,
    clippy::redundant_closure,
    clippy::explicit_iter_loop,
    clippy::match_same_arms,
    clippy::needless_borrow,
    clippy::print_stdout,
    clippy::cast_possible_truncation,
    clippy::trivially_copy_pass_by_ref,
    clippy::needless_pass_by_value,
    missing_debug_implementations,
    trivial_casts,
    trivial_numeric_casts,
    unused_extern_crates,
    unused_import_braces,
    unused_qualifications,
    variant_size_differences
)]
mod checks;
mod compilation;
pub mod dom;
mod error;
pub mod generator;
mod helpers;
mod keywords;
mod primitive_type;
mod resolver;
mod schemas;
pub mod sax;
pub mod traversal;
mod validator;
pub mod value;

pub use compilation::{CompilationOptions, JSONSchema};
pub use error::{CompilationError, ErrorIterator, ValidationError};
pub use resolver::ExternalResolver;
pub use schemas::Draft;
pub use value::Value;

/// A shortcut for validating `instance` against `schema`, both already
/// parsed into the value tree. Draft version is detected from `$schema`,
/// falling back to draft-04.
///
/// ```rust
/// use jvalid::{dom, is_valid};
///
/// let schema = dom::parse_str(r#"{"maxLength": 5}"#).unwrap();
/// let instance = dom::parse_str(r#""foo""#).unwrap();
/// assert!(is_valid(&schema, &instance));
/// ```
///
/// # Panics
/// Panics if `schema` is not a valid schema.
#[must_use]
#[inline]
pub fn is_valid(schema: &Value, instance: &Value) -> bool {
    let compiled = JSONSchema::compile(schema).expect("Invalid schema");
    compiled.is_valid(instance)
}

#[cfg(test)]
mod tests_util {
    use super::JSONSchema;
    use crate::value::Value;

    pub fn is_not_valid(schema: Value, instance: Value) {
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(!compiled.is_valid(&instance), "{} should not be valid", instance);
        assert!(
            compiled.validate(&instance).is_err(),
            "{} should not be valid",
            instance
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_valid() {
        let schema = Value::object_from(vec![("minLength", Value::Number(value::Number::from_i64(5)))]);
        let valid = Value::string("foobar");
        let invalid = Value::string("foo");
        assert!(is_valid(&schema, &valid));
        assert!(!is_valid(&schema, &invalid));
    }
}
