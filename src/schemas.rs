//! Draft selection and keyword dispatch.
//!
//! Only the draft-04 family is supported; the crate keeps a `Draft` enum
//! rather than a bare marker type so an additional draft can be added later
//! without reshaping every call site that matches on it.
use crate::compilation::context::CompilationContext;
use crate::keywords::{self, CompilationResult};
use crate::value::Value;

pub type CompileFunc = fn(&CompilationContext, &Value, &Value) -> Option<CompilationResult>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Draft {
    Draft4,
}

impl Draft {
    /// Looks up the keyword's compile function for this draft. `None` means
    /// "not a recognised keyword" (ignored by the schema parser), which is
    /// different from a keyword that is recognised but fails to compile.
    #[must_use]
    pub fn get_validator(self, keyword: &str) -> Option<CompileFunc> {
        match self {
            Draft::Draft4 => match keyword {
                "additionalItems" => Some(keywords::additional_items::compile),
                "additionalProperties" => Some(keywords::additional_properties::compile),
                "allOf" => Some(keywords::all_of::compile),
                "anyOf" => Some(keywords::any_of::compile),
                "dependencies" => Some(keywords::dependencies::compile),
                "enum" => Some(keywords::enum_::compile),
                "format" => Some(keywords::format::compile),
                "items" => Some(keywords::items::compile),
                "maxItems" => Some(keywords::max_items::compile),
                "maxLength" => Some(keywords::max_length::compile),
                "maxProperties" => Some(keywords::max_properties::compile),
                "maximum" => Some(keywords::maximum::compile),
                "minItems" => Some(keywords::min_items::compile),
                "minLength" => Some(keywords::min_length::compile),
                "minProperties" => Some(keywords::min_properties::compile),
                "minimum" => Some(keywords::minimum::compile),
                "multipleOf" => Some(keywords::multiple_of::compile),
                "not" => Some(keywords::not::compile),
                "oneOf" => Some(keywords::one_of::compile),
                "pattern" => Some(keywords::pattern::compile),
                "patternProperties" => Some(keywords::pattern_properties::compile),
                "properties" => Some(keywords::properties::compile),
                "required" => Some(keywords::required::compile),
                "type" => Some(keywords::type_::compile),
                "uniqueItems" => Some(keywords::unique_items::compile),
                "$ref" => Some(keywords::ref_::compile),
                // draft 4 folds exclusiveMinimum/Maximum into minimum/maximum
                // as boolean companions rather than standalone keywords.
                "exclusiveMaximum" | "exclusiveMinimum" => None,
                _ => None,
            },
        }
    }
}

const DRAFT4_URL: &str = "http://json-schema.org/draft-04/schema";

/// Derives the draft from a `$schema` URL. Unrecognised URLs default to
/// `Draft4` rather than erroring, since the draft-04 family is all this
/// crate understands.
#[must_use]
pub fn draft_from_url(url: &str) -> Draft {
    let _ = url.trim_end_matches('#');
    Draft::Draft4
}

#[must_use]
pub fn draft_from_schema(schema: &Value) -> Draft {
    schema
        .as_object()
        .and_then(|o| o.get("$schema"))
        .and_then(Value::as_str)
        .map_or(Draft::Draft4, draft_from_url)
}

/// The key under which a schema stores its own identifier. Draft 4 uses the
/// bare `id` keyword (later drafts moved to `$id`).
#[must_use]
pub fn id_of(draft: Draft, schema: &Value) -> Option<&str> {
    match draft {
        Draft::Draft4 => schema
            .as_object()
            .and_then(|o| o.get("id"))
            .and_then(Value::as_str),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_schema_url_falls_back_to_draft4() {
        assert_eq!(draft_from_url("http://example.com/whatever"), Draft::Draft4);
    }

    #[test]
    fn draft_from_schema_reads_dollar_schema() {
        let schema = Value::object_from(vec![("$schema", Value::string(DRAFT4_URL))]);
        assert_eq!(draft_from_schema(&schema), Draft::Draft4);
    }

    #[test]
    fn id_of_uses_bare_id_key() {
        let schema = Value::object_from(vec![("id", Value::string("http://example.com/s"))]);
        assert_eq!(id_of(Draft::Draft4, &schema), Some("http://example.com/s"));
    }
}
