//! Small shared utilities: numeric-aware equality (used by `enum`/`const`-style
//! comparisons that predate structural `Value` equality) and JSON Pointer
//! resolution (used by `$ref` and by the URI/scope resolver).
use crate::value::Value;

/// Resolves a JSON Pointer (RFC 6901) against `document`, unescaping `~1` to
/// `/` and `~0` to `~` in each token. An empty pointer resolves to the
/// document itself; any token that doesn't address an existing object key or
/// in-bounds array index fails the whole lookup.
#[must_use]
pub(crate) fn pointer<'a>(document: &'a Value, pointer: &str) -> Option<&'a Value> {
    if pointer.is_empty() {
        return Some(document);
    }
    if !pointer.starts_with('/') {
        return None;
    }
    let mut target = document;
    for token in pointer.split('/').skip(1) {
        let token = token.replace("~1", "/").replace("~0", "~");
        target = match target {
            Value::Object(map) => map.get(&token)?,
            Value::Array(items) => {
                let index = parse_index(&token)?;
                items.get(index)?
            }
            _ => return None,
        };
    }
    Some(target)
}

/// A valid array index per RFC 6901: either `0` or a decimal with no leading
/// zero (`01` and `+1` are not indices).
fn parse_index(token: &str) -> Option<usize> {
    if token == "0" {
        return Some(0);
    }
    if token.starts_with('0') || token.starts_with('+') {
        return None;
    }
    token.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn empty_pointer_is_the_document() {
        let doc = Value::object_from(vec![("a", Value::Bool(true))]);
        assert_eq!(pointer(&doc, ""), Some(&doc));
    }

    #[test]
    fn walks_nested_object_and_array() {
        let doc = Value::object_from(vec![(
            "definitions",
            Value::object_from(vec![(
                "list",
                Value::array_from(vec![Value::Number(Number::from_i64(1))]),
            )]),
        )]);
        assert_eq!(
            pointer(&doc, "/definitions/list/0").and_then(Value::as_i64),
            Some(1)
        );
    }

    #[test]
    fn unescapes_tilde_and_slash_in_keys() {
        let doc = Value::object_from(vec![("a/b~c", Value::Bool(true))]);
        assert_eq!(pointer(&doc, "/a~1b~0c"), Some(&Value::Bool(true)));
    }

    #[test]
    fn rejects_leading_zero_index() {
        let doc = Value::array_from(vec![Value::Null, Value::Null]);
        assert_eq!(pointer(&doc, "/01"), None);
    }
}
