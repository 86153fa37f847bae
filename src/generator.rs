//! Serializes a value tree back to JSON text, compact or pretty.
use std::fmt::Write as _;

use crate::traversal::{self, Visitor};
use crate::value::{write_escaped_string, Number, Value};

/// Output style.
#[derive(Debug, Clone)]
pub enum Style {
    /// No whitespace at all.
    Compact,
    /// `indent` is repeated once per nesting level; a newline follows every
    /// element and a space follows every `:`.
    Pretty { indent: String },
}

impl Style {
    #[must_use]
    pub fn pretty_with(indent: impl Into<String>) -> Self {
        Style::Pretty {
            indent: indent.into(),
        }
    }
}

impl Default for Style {
    fn default() -> Self {
        Style::Pretty {
            indent: "  ".to_string(),
        }
    }
}

/// Serializes `value` to a `String` using the given [`Style`], walking the
/// tree through [`traversal::walk`] rather than recursing by hand.
///
/// # Errors
/// Returns an error only if a backing `Display`/`Write` impl fails, which
/// does not happen for in-memory `String` buffers; the signature stays
/// fallible because the generator is specified as "flushed by a call that
/// returns the buffer and a status".
pub fn to_string(value: &Value, style: &Style) -> Result<String, std::fmt::Error> {
    let mut out = String::new();
    let mut generator = Generator::new(&mut out, style);
    traversal::walk(value, &mut generator);
    match generator.error.take() {
        Some(e) => Err(e),
        None => Ok(out),
    }
}

#[must_use]
pub fn to_compact_string(value: &Value) -> String {
    to_string(value, &Style::Compact).expect("writing to a String never fails")
}

/// How many entries have already been written into one open container, so
/// the next `Visitor` callback knows whether it needs a leading separator.
enum Frame {
    Array(usize),
    Object(usize),
}

/// Drives a [`traversal::walk`] over a value, emitting JSON text as the walk
/// visits it. Tracks the currently open container kind (so separators land
/// correctly) and the current indentation depth.
struct Generator<'a, W> {
    out: &'a mut W,
    style: &'a Style,
    depth: usize,
    stack: Vec<Frame>,
    error: Option<std::fmt::Error>,
}

impl<'a, W: Write_> Generator<'a, W> {
    fn new(out: &'a mut W, style: &'a Style) -> Self {
        Generator {
            out,
            style,
            depth: 0,
            stack: Vec::new(),
            error: None,
        }
    }

    fn newline_and_indent(&mut self, depth: usize) -> std::fmt::Result {
        if let Style::Pretty { indent } = self.style {
            self.out.write_char_('\n')?;
            for _ in 0..depth {
                self.out.write_str_(indent)?;
            }
        }
        Ok(())
    }

    fn colon(&mut self) -> std::fmt::Result {
        if matches!(self.style, Style::Pretty { .. }) {
            self.out.write_str_(": ")
        } else {
            self.out.write_char_(':')
        }
    }

    /// Separator and indentation for the next entry of the innermost
    /// container, when that container is an array. A no-op when the
    /// innermost container is an object (its separators run off
    /// `visit_key` instead) or when nothing is open yet.
    fn before_array_element(&mut self) -> std::fmt::Result {
        if let Some(Frame::Array(count)) = self.stack.last_mut() {
            let first = *count == 0;
            *count += 1;
            if !first {
                self.out.write_char_(',')?;
            }
            let depth = self.depth;
            self.newline_and_indent(depth)?;
        }
        Ok(())
    }

    fn before_object_key(&mut self) -> std::fmt::Result {
        if let Some(Frame::Object(count)) = self.stack.last_mut() {
            let first = *count == 0;
            *count += 1;
            if !first {
                self.out.write_char_(',')?;
            }
            let depth = self.depth;
            self.newline_and_indent(depth)?;
        }
        Ok(())
    }

    /// Runs `f`, stashing any formatting error and reporting failure back to
    /// the walk so it short-circuits instead of writing more half-finished
    /// output.
    fn ok(&mut self, f: impl FnOnce(&mut Self) -> std::fmt::Result) -> bool {
        match f(self) {
            Ok(()) => true,
            Err(e) => {
                self.error = Some(e);
                false
            }
        }
    }
}

impl<'a, W: Write_> Visitor for Generator<'a, W> {
    fn visit_null(&mut self) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.out.write_str_("null")
        })
    }

    fn visit_invalid(&mut self) -> bool {
        self.visit_null()
    }

    fn visit_bool(&mut self, value: bool) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.out.write_str_(if value { "true" } else { "false" })
        })
    }

    fn visit_number(&mut self, value: &Number) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.out.write_str_(&value.to_string())
        })
    }

    fn visit_string(&mut self, value: &str) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.out.write_escaped(value)
        })
    }

    fn enter_array(&mut self, _len: usize) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.stack.push(Frame::Array(0));
            g.depth += 1;
            g.out.write_char_('[')
        })
    }

    fn exit_array(&mut self) -> bool {
        self.ok(|g| {
            g.depth -= 1;
            let depth = g.depth;
            if let Some(Frame::Array(count)) = g.stack.pop() {
                if count > 0 {
                    g.newline_and_indent(depth)?;
                }
            }
            g.out.write_char_(']')
        })
    }

    fn enter_object(&mut self, _len: usize) -> bool {
        self.ok(|g| {
            g.before_array_element()?;
            g.stack.push(Frame::Object(0));
            g.depth += 1;
            g.out.write_char_('{')
        })
    }

    fn visit_key(&mut self, key: &str) -> bool {
        self.ok(|g| {
            g.before_object_key()?;
            g.out.write_escaped(key)?;
            g.colon()
        })
    }

    fn exit_object(&mut self) -> bool {
        self.ok(|g| {
            g.depth -= 1;
            let depth = g.depth;
            if let Some(Frame::Object(count)) = g.stack.pop() {
                if count > 0 {
                    g.newline_and_indent(depth)?;
                }
            }
            g.out.write_char_('}')
        })
    }
}

/// Thin seam over `std::fmt::Write` so the generator can emit escaped
/// strings through the same helper the `Value` `Display` impl uses.
trait Write_: std::fmt::Write {
    fn write_char_(&mut self, c: char) -> std::fmt::Result {
        self.write_char(c)
    }
    fn write_str_(&mut self, s: &str) -> std::fmt::Result {
        self.write_str(s)
    }
    fn write_escaped(&mut self, s: &str) -> std::fmt::Result {
        write_escaped_string(s, self)
    }
}
impl<W: std::fmt::Write> Write_ for W {}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    #[test]
    fn compact_round_trips_flat_object() {
        let value = Value::object_from(vec![
            ("a", Value::array_from(vec![Value::Number(Number::from_i64(1))])),
            ("b", Value::Bool(true)),
        ]);
        let text = to_compact_string(&value);
        assert_eq!(text, r#"{"a":[1],"b":true}"#);
    }

    #[test]
    fn pretty_indents_nested_containers() {
        let value = Value::object_from(vec![("a", Value::Number(Number::from_i64(1)))]);
        let text = to_string(&value, &Style::pretty_with("  ")).unwrap();
        assert_eq!(text, "{\n  \"a\": 1\n}");
    }

    #[test]
    fn empty_containers_have_no_interior_newline() {
        let value = Value::object_from(Vec::<(String, Value)>::new());
        let text = to_string(&value, &Style::default()).unwrap();
        assert_eq!(text, "{}");
    }

    #[test]
    fn escapes_control_characters_and_quotes() {
        let value = Value::string("a\"\n\\b");
        let text = to_compact_string(&value);
        assert_eq!(text, r#""a\"\n\\b""#);
    }

    #[test]
    fn walk_short_circuit_stops_the_generator_from_writing_more() {
        struct StopAfterOne {
            seen: usize,
        }
        impl Visitor for StopAfterOne {
            fn visit_number(&mut self, _value: &Number) -> bool {
                self.seen += 1;
                self.seen < 2
            }
        }
        let value = Value::array_from(vec![
            Value::Number(Number::from_i64(1)),
            Value::Number(Number::from_i64(2)),
        ]);
        let mut visitor = StopAfterOne { seen: 0 };
        assert!(!traversal::walk(&value, &mut visitor));
        assert_eq!(visitor.seen, 2);
    }
}
