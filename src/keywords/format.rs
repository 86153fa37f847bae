//! `format`: a string instance is checked against a named format, using
//! `crate::checks` for the built-in format names and falling back to a
//! custom checker registered through
//! [`crate::compilation::CompilationOptions::with_format`]. Unknown format
//! names (neither built-in nor custom) are always ignored.
use crate::{
    checks,
    compilation::{options::FormatCheck, CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};

pub struct FormatValidator {
    name: String,
    check: FormatCheck,
}

impl Validate for FormatValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match instance {
            Value::String(s) if !(self.check)(s) => {
                ValidationError::format(s.to_string(), self.name.clone())
            }
            _ => no_error(),
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::String(s) => (self.check)(s),
            _ => true,
        }
    }
}

fn builtin(name: &str) -> Option<FormatCheck> {
    let check: FormatCheck = match name {
        "date" => checks::date,
        "date-time" => checks::datetime,
        "email" | "idn-email" => checks::email,
        "hostname" | "idn-hostname" => checks::hostname,
        "ipv4" => checks::ipv4,
        "ipv6" => checks::ipv6,
        "iri" => checks::iri,
        "iri-reference" => checks::iri_reference,
        "json-pointer" => checks::json_pointer,
        "regex" => checks::regex,
        "relative-json-pointer" => checks::relative_json_pointer,
        "time" => checks::time,
        "uri" => checks::uri,
        "uri-reference" => checks::uri_reference,
        "uri-template" => checks::uri_template,
        _ => return None,
    };
    Some(check)
}

pub fn compile(
    context: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    let Value::String(name) = subschema else {
        return Some(Err(CompilationError::SchemaError));
    };
    if !context.options().validates_formats() {
        return None;
    }
    let check = context
        .options()
        .custom_format(name)
        .or_else(|| builtin(name))?;
    Some(Ok(Box::new(FormatValidator {
        name: name.to_string(),
        check,
    })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compilation::JSONSchema;

    #[test]
    fn unrecognized_format_is_ignored() {
        let schema = Value::object_from(vec![("format", Value::string("custom"))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("anything")));
    }

    #[test]
    fn ipv4_format_is_checked() {
        let schema = Value::object_from(vec![("format", Value::string("ipv4"))]);
        let compiled = JSONSchema::compile(&schema).unwrap();
        assert!(compiled.is_valid(&Value::string("127.0.0.1")));
        assert!(!compiled.is_valid(&Value::string("not-an-ip")));
    }

    #[test]
    fn disabling_format_validation_skips_the_check() {
        let schema = Value::object_from(vec![("format", Value::string("ipv4"))]);
        let compiled = JSONSchema::options()
            .validate_formats(false)
            .compile(&schema)
            .unwrap();
        assert!(compiled.is_valid(&Value::string("not-an-ip")));
    }

    #[test]
    fn custom_format_overrides_builtin() {
        let schema = Value::object_from(vec![("format", Value::string("even-length"))]);
        let compiled = JSONSchema::options()
            .with_format("even-length", |s| s.len() % 2 == 0)
            .compile(&schema)
            .unwrap();
        assert!(compiled.is_valid(&Value::string("ab")));
        assert!(!compiled.is_valid(&Value::string("abc")));
    }
}
