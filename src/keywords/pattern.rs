//! `pattern`: matches a string instance against an ECMA 262 regular
//! expression, translated to the nearest `regex` crate equivalent.
use crate::{
    compilation::{CompilationContext, JSONSchema},
    error::{no_error, CompilationError, ErrorIterator, ValidationError},
    keywords::CompilationResult,
    validator::Validate,
    value::Value,
};
use regex::{Captures, Regex};
use std::ops::Index;

lazy_static::lazy_static! {
    static ref CONTROL_GROUPS_RE: Regex = Regex::new(r"\\c[A-Za-z]").expect("is a valid regex");
}

pub struct PatternValidator {
    original: String,
    pattern: Regex,
}

impl Validate for PatternValidator {
    fn validate<'a>(&self, _: &'a JSONSchema, instance: &'a Value) -> ErrorIterator<'a> {
        match instance {
            Value::String(s) if !self.pattern.is_match(s) => {
                ValidationError::pattern(s.to_string(), self.original.clone())
            }
            _ => no_error(),
        }
    }

    fn is_valid(&self, _: &JSONSchema, instance: &Value) -> bool {
        match instance {
            Value::String(s) => self.pattern.is_match(s),
            _ => true,
        }
    }
}

// ECMA 262 has differences from the `regex` crate's own syntax.
fn convert_regex(pattern: &str) -> Result<Regex, regex::Error> {
    let new_pattern = CONTROL_GROUPS_RE.replace_all(pattern, replace_control_group);
    Regex::new(
        &new_pattern
            .replace(r"\d", "[0-9]")
            .replace(r"\D", "[^0-9]")
            .replace(r"\w", "[A-Za-z]")
            .replace(r"\W", "[^A-Za-z]")
            .replace(
                r"\s",
                "[ \t\n\r\u{000b}\u{000c}\u{2003}\u{feff}\u{2029}\u{00a0}]",
            )
            .replace(
                r"\S",
                "[^ \t\n\r\u{000b}\u{000c}\u{2003}\u{feff}\u{2029}\u{00a0}]",
            ),
    )
}

fn replace_control_group(captures: &Captures) -> String {
    // No overflow: the minimum value is 65 ('A').
    ((captures
        .index(0)
        .trim_start_matches(r"\c")
        .chars()
        .next()
        .expect("the regex rule guarantees [A-Za-z] follows")
        .to_ascii_uppercase() as u8
        - 64) as char)
        .to_string()
}

pub fn compile(
    _: &CompilationContext,
    _: &Value,
    subschema: &Value,
) -> Option<CompilationResult> {
    match subschema {
        Value::String(item) => match convert_regex(item) {
            Ok(pattern) => Some(Ok(Box::new(PatternValidator {
                original: item.to_string(),
                pattern,
            }))),
            Err(e) => Some(Err(CompilationError::from(e))),
        },
        _ => Some(Err(CompilationError::SchemaError)),
    }
}
