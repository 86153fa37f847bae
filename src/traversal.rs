//! A uniform visitor over the value tree, shared by the generator and by any
//! tooling that needs to walk a `Value` without re-implementing recursion.
use crate::value::Value;

/// Per-kind callbacks for a depth-first walk of a `Value`.
///
/// Every method defaults to "continue" (`true`). Returning `false` from any
/// callback short-circuits the walk: no further callbacks fire, including the
/// matching `exit_*` for containers already entered.
pub trait Visitor {
    fn visit_null(&mut self) -> bool {
        true
    }
    fn visit_invalid(&mut self) -> bool {
        true
    }
    fn visit_bool(&mut self, _value: bool) -> bool {
        true
    }
    fn visit_number(&mut self, _value: &crate::value::Number) -> bool {
        true
    }
    fn visit_string(&mut self, _value: &str) -> bool {
        true
    }
    fn enter_array(&mut self, _len: usize) -> bool {
        true
    }
    fn exit_array(&mut self) -> bool {
        true
    }
    fn enter_object(&mut self, _len: usize) -> bool {
        true
    }
    /// Called before visiting the value for `key`.
    fn visit_key(&mut self, _key: &str) -> bool {
        true
    }
    fn exit_object(&mut self) -> bool {
        true
    }
}

/// Walks `value` depth-first, calling into `visitor`. Returns `false` if the
/// walk was short-circuited by a callback.
pub fn walk(value: &Value, visitor: &mut dyn Visitor) -> bool {
    match value {
        Value::Null => visitor.visit_null(),
        Value::Invalid => visitor.visit_invalid(),
        Value::Bool(b) => visitor.visit_bool(*b),
        Value::Number(n) => visitor.visit_number(n),
        Value::String(s) => visitor.visit_string(s),
        Value::Array(items) => {
            if !visitor.enter_array(items.len()) {
                return false;
            }
            for item in items.iter() {
                if !walk(item, visitor) {
                    return false;
                }
            }
            visitor.exit_array()
        }
        Value::Object(map) => {
            if !visitor.enter_object(map.len()) {
                return false;
            }
            for (key, val) in map.iter() {
                if !visitor.visit_key(key) {
                    return false;
                }
                if !walk(val, visitor) {
                    return false;
                }
            }
            visitor.exit_object()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Number;

    struct CountingVisitor {
        scalars: usize,
    }
    impl Visitor for CountingVisitor {
        fn visit_null(&mut self) -> bool {
            self.scalars += 1;
            true
        }
        fn visit_number(&mut self, _value: &Number) -> bool {
            self.scalars += 1;
            true
        }
    }

    #[test]
    fn counts_scalars_in_nested_array() {
        let value = Value::array_from(vec![
            Value::Number(Number::from_i64(1)),
            Value::Null,
            Value::array_from(vec![Value::Number(Number::from_i64(2))]),
        ]);
        let mut visitor = CountingVisitor { scalars: 0 };
        assert!(walk(&value, &mut visitor));
        assert_eq!(visitor.scalars, 3);
    }

    struct AbortOnSecond {
        seen: usize,
    }
    impl Visitor for AbortOnSecond {
        fn visit_number(&mut self, _value: &Number) -> bool {
            self.seen += 1;
            self.seen < 2
        }
    }

    #[test]
    fn short_circuits_on_false() {
        let value = Value::array_from(vec![
            Value::Number(Number::from_i64(1)),
            Value::Number(Number::from_i64(2)),
            Value::Number(Number::from_i64(3)),
        ]);
        let mut visitor = AbortOnSecond { seen: 0 };
        assert!(!walk(&value, &mut visitor));
        assert_eq!(visitor.seen, 2);
    }
}
