//! The reference-counted JSON value tree (the "DOM").
//!
//! A [`Value`] is cheap to clone (an `Rc` bump for containers, a `Copy` for
//! scalars) and safe to share across many parents because containers are
//! immutable once built: growing a container goes through [`Value::array_push`]
//! / [`Value::object_insert`], which clone-on-write via `Rc::make_mut` when the
//! container is shared, and reject the mutation outright if it would make the
//! tree cyclic.
pub(crate) mod array;
pub(crate) mod number;
pub(crate) mod object;

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::rc::Rc;

use array::ArrayData;
use object::ObjectData;

pub use number::Number;

lazy_static::lazy_static! {
    static ref EMPTY_STRING: Rc<str> = Rc::from("");
}

/// A node in the value tree.
///
/// `Null`, `Invalid` and `Bool` carry no heap allocation at all; `String`,
/// `Array` and `Object` are `Rc`-backed and therefore `O(1)` to clone.
#[derive(Debug, Clone)]
pub enum Value {
    /// JSON `null`.
    Null,
    /// Not a JSON value: the result of a failed parse, or of looking up a
    /// path that does not exist. Distinguished from `Null` so that "missing"
    /// and "present-and-null" are never confused.
    Invalid,
    Bool(bool),
    Number(Number),
    String(Rc<str>),
    Array(Rc<ArrayData>),
    Object(Rc<ObjectData>),
}

impl Default for Value {
    fn default() -> Self {
        Value::Null
    }
}

/// Returned by the mutators when growing a container would make the tree
/// cyclic (the value being inserted already (transitively) contains the
/// container it is being inserted into).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WouldCycle;

impl fmt::Display for WouldCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "operation would introduce a reference cycle")
    }
}
impl std::error::Error for WouldCycle {}

impl Value {
    #[must_use]
    pub fn string<S: Into<Rc<str>>>(value: S) -> Self {
        let value = value.into();
        if value.is_empty() {
            Value::String(Rc::clone(&EMPTY_STRING))
        } else {
            Value::String(value)
        }
    }

    #[must_use]
    pub fn array_from<I: IntoIterator<Item = Value>>(items: I) -> Self {
        Value::Array(Rc::new(ArrayData::from_vec(items.into_iter().collect())))
    }

    #[must_use]
    pub fn object_from<I, K>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, Value)>,
        K: Into<Rc<str>>,
    {
        Value::Object(Rc::new(ObjectData::from_pairs(
            pairs.into_iter().map(|(k, v)| (k.into(), v)),
        )))
    }

    #[must_use]
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    #[must_use]
    pub fn is_invalid(&self) -> bool {
        matches!(self, Value::Invalid)
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(v) => Some(*v),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::String(v) => Some(v.as_ref()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_u64(&self) -> Option<u64> {
        match self {
            Value::Number(n) => n.as_u64(),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Number(n) => Some(n.as_f64()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<&Number> {
        match self {
            Value::Number(n) => Some(n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_array(&self) -> Option<&[Value]> {
        match self {
            Value::Array(items) => Some(items.as_slice()),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_object(&self) -> Option<&ObjectData> {
        match self {
            Value::Object(map) => Some(map),
            _ => None,
        }
    }

    /// Shortcut for `self.as_object().and_then(|o| o.get(key))`.
    #[must_use]
    pub fn object_get(&self, key: &str) -> Option<&Value> {
        self.as_object().and_then(|object| object.get(key))
    }

    /// Shortcut for `self.as_array().and_then(|a| a.get(index))`.
    #[must_use]
    pub fn array_get(&self, index: usize) -> Option<&Value> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// A deep copy: unlike [`Clone`], which bumps a container's `Rc` and
    /// shares its backing storage, `duplicate` allocates fresh containers
    /// all the way down, so mutating the result never observably changes
    /// `self`.
    #[must_use]
    pub fn duplicate(&self) -> Value {
        match self {
            Value::Array(items) => Value::array_from(items.iter().map(Value::duplicate)),
            Value::Object(map) => {
                Value::object_from(map.iter().map(|(k, v)| (Rc::clone(k), v.duplicate())))
            }
            other => other.clone(),
        }
    }

    /// The JSON Schema primitive type name of this value, with `integer`
    /// distinguished from `number` per the `type` keyword's semantics.
    #[must_use]
    pub fn primitive_type(&self) -> Option<crate::primitive_type::PrimitiveType> {
        use crate::primitive_type::PrimitiveType;
        match self {
            Value::Null => Some(PrimitiveType::Null),
            Value::Invalid => None,
            Value::Bool(_) => Some(PrimitiveType::Boolean),
            Value::Number(n) if n.is_integer() => Some(PrimitiveType::Integer),
            Value::Number(_) => Some(PrimitiveType::Number),
            Value::String(_) => Some(PrimitiveType::String),
            Value::Array(_) => Some(PrimitiveType::Array),
            Value::Object(_) => Some(PrimitiveType::Object),
        }
    }

    /// Appends `item` to this array.
    ///
    /// # Errors
    /// Returns [`WouldCycle`] if `item` (transitively) already contains this
    /// array, and leaves the array unchanged.
    pub fn array_push(&mut self, item: Value) -> Result<(), WouldCycle> {
        let Value::Array(rc) = self else {
            return Ok(());
        };
        let self_ptr = Rc::as_ptr(rc).cast::<()>();
        if contains_ptr(&item, self_ptr) {
            return Err(WouldCycle);
        }
        Rc::make_mut(rc).push(item);
        Ok(())
    }

    /// Inserts or overwrites `key` in this object.
    ///
    /// # Errors
    /// Returns [`WouldCycle`] if `value` (transitively) already contains this
    /// object, and leaves the object unchanged.
    pub fn object_insert<K: Into<Rc<str>>>(&mut self, key: K, value: Value) -> Result<(), WouldCycle> {
        let Value::Object(rc) = self else {
            return Ok(());
        };
        let self_ptr = Rc::as_ptr(rc).cast::<()>();
        if contains_ptr(&value, self_ptr) {
            return Err(WouldCycle);
        }
        Rc::make_mut(rc).insert(key.into(), value);
        Ok(())
    }

    /// Removes `key` from this object, returning its value if present.
    pub fn object_remove(&mut self, key: &str) -> Option<Value> {
        match self {
            Value::Object(rc) => Rc::make_mut(rc).remove(key),
            _ => None,
        }
    }

    /// Mutable access to `key`'s value, for callers that need to update a
    /// nested value in place (e.g. default injection, see `validator`).
    pub(crate) fn object_get_mut(&mut self, key: &str) -> Option<&mut Value> {
        match self {
            Value::Object(rc) => Rc::make_mut(rc).get_mut(key),
            _ => None,
        }
    }

    /// Overwrites the element at `index`. No-op (returns `false`) if `index`
    /// is out of bounds or `self` is not an array.
    ///
    /// # Errors
    /// Returns [`WouldCycle`] if `item` (transitively) already contains this
    /// array.
    pub fn array_set(&mut self, index: usize, item: Value) -> Result<bool, WouldCycle> {
        let Value::Array(rc) = self else {
            return Ok(false);
        };
        let self_ptr = Rc::as_ptr(rc).cast::<()>();
        if contains_ptr(&item, self_ptr) {
            return Err(WouldCycle);
        }
        Ok(Rc::make_mut(rc).set(index, item))
    }

    /// Inserts `item` at `index`, shifting later elements up by one.
    /// `index` past the end appends instead of panicking.
    ///
    /// # Errors
    /// Returns [`WouldCycle`] if `item` (transitively) already contains this
    /// array, and leaves the array unchanged.
    pub fn array_insert(&mut self, index: usize, item: Value) -> Result<(), WouldCycle> {
        let Value::Array(rc) = self else {
            return Ok(());
        };
        let self_ptr = Rc::as_ptr(rc).cast::<()>();
        if contains_ptr(&item, self_ptr) {
            return Err(WouldCycle);
        }
        Rc::make_mut(rc).insert(index, item);
        Ok(())
    }

    /// Removes and returns the element at `index`, shifting later elements
    /// down by one. `None` if `index` is out of bounds or `self` is not an
    /// array.
    pub fn array_remove(&mut self, index: usize) -> Option<Value> {
        match self {
            Value::Array(rc) => Rc::make_mut(rc).remove(index),
            _ => None,
        }
    }

    /// Replaces `self[index..index + remove_count]` with `replacement`,
    /// returning the removed elements, per §4.1's splicing semantics. The
    /// array grows or shrinks depending on how the two lengths compare.
    ///
    /// # Errors
    /// Returns [`WouldCycle`] if any element of `replacement` (transitively)
    /// already contains this array, and leaves the array unchanged.
    pub fn array_splice(
        &mut self,
        index: usize,
        remove_count: usize,
        replacement: Vec<Value>,
    ) -> Result<Vec<Value>, WouldCycle> {
        let Value::Array(rc) = self else {
            return Ok(Vec::new());
        };
        let self_ptr = Rc::as_ptr(rc).cast::<()>();
        if replacement.iter().any(|item| contains_ptr(item, self_ptr)) {
            return Err(WouldCycle);
        }
        Ok(Rc::make_mut(rc).splice(index, remove_count, replacement))
    }
}

/// Whether `value` transitively contains a container whose `Rc` address is
/// `target` — the check that keeps the tree cycle-free.
fn contains_ptr(value: &Value, target: *const ()) -> bool {
    match value {
        Value::Array(rc) => {
            Rc::as_ptr(rc).cast::<()>() == target
                || rc.iter().any(|item| contains_ptr(item, target))
        }
        Value::Object(rc) => {
            Rc::as_ptr(rc).cast::<()>() == target
                || rc.values().any(|item| contains_ptr(item, target))
        }
        _ => false,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Invalid, Value::Invalid) => true,
            (Value::Bool(a), Value::Bool(b)) => a == b,
            (Value::Number(a), Value::Number(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Array(a), Value::Array(b)) => {
                Rc::ptr_eq(a, b)
                    || (a.len() == b.len() && a.iter().zip(b.iter()).all(|(x, y)| x == y))
            }
            (Value::Object(a), Value::Object(b)) => {
                Rc::ptr_eq(a, b)
                    || (a.len() == b.len()
                        && a.iter()
                            .all(|(k, v)| b.get(k).is_some_and(|other_v| v == other_v)))
            }
            _ => false,
        }
    }
}
impl Eq for Value {}

/// A stable total order over values, used so values can live in sorted
/// collections (e.g. a `uniqueItems` check implemented without hashing).
impl PartialOrd for Value {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

fn kind_rank(value: &Value) -> u8 {
    match value {
        Value::Invalid => 0,
        Value::Null => 1,
        Value::Bool(_) => 2,
        Value::Number(_) => 3,
        Value::String(_) => 4,
        Value::Array(_) => 5,
        Value::Object(_) => 6,
    }
}

impl Ord for Value {
    fn cmp(&self, other: &Self) -> Ordering {
        match (self, other) {
            (Value::Null, Value::Null) | (Value::Invalid, Value::Invalid) => Ordering::Equal,
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Number(a), Value::Number(b)) => a.compare(b),
            (Value::String(a), Value::String(b)) => a.cmp(b),
            (Value::Array(a), Value::Array(b)) => a
                .iter()
                .zip(b.iter())
                .map(|(x, y)| x.cmp(y))
                .find(|ord| *ord != Ordering::Equal)
                .unwrap_or_else(|| a.len().cmp(&b.len())),
            (Value::Object(a), Value::Object(b)) => {
                let mut ak: Vec<_> = a.keys().collect();
                let mut bk: Vec<_> = b.keys().collect();
                ak.sort();
                bk.sort();
                ak.cmp(&bk).then_with(|| {
                    ak.iter()
                        .map(|k| a.get(k).cmp(&b.get(k)))
                        .find(|ord| *ord != Ordering::Equal)
                        .unwrap_or(Ordering::Equal)
                })
            }
            (a, b) => kind_rank(a).cmp(&kind_rank(b)),
        }
    }
}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        kind_rank(self).hash(state);
        match self {
            Value::Null | Value::Invalid => {}
            Value::Bool(v) => v.hash(state),
            Value::Number(v) => v.hash(state),
            Value::String(v) => v.hash(state),
            Value::Array(v) => {
                for item in v.iter() {
                    item.hash(state);
                }
            }
            Value::Object(v) => {
                // Order-independent: XOR per-entry hashes so two objects with
                // the same key/value pairs in different insertion order hash
                // identically, matching their `PartialEq` semantics.
                let mut acc: u64 = 0;
                for (k, val) in v.iter() {
                    let mut entry_hasher = std::collections::hash_map::DefaultHasher::new();
                    k.hash(&mut entry_hasher);
                    val.hash(&mut entry_hasher);
                    acc ^= entry_hasher.finish();
                }
                acc.hash(state);
            }
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_compact(self, f)
    }
}

pub(crate) fn write_compact(value: &Value, f: &mut impl fmt::Write) -> fmt::Result {
    match value {
        Value::Null => write!(f, "null"),
        Value::Invalid => write!(f, "null"),
        Value::Bool(v) => write!(f, "{}", v),
        Value::Number(v) => write!(f, "{}", v),
        Value::String(v) => write_escaped_string(v, f),
        Value::Array(items) => {
            write!(f, "[")?;
            for (i, item) in items.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write_compact(item, f)?;
            }
            write!(f, "]")
        }
        Value::Object(map) => {
            write!(f, "{{")?;
            for (i, (key, val)) in map.iter().enumerate() {
                if i > 0 {
                    write!(f, ",")?;
                }
                write_escaped_string(key, f)?;
                write!(f, ":")?;
                write_compact(val, f)?;
            }
            write!(f, "}}")
        }
    }
}

pub(crate) fn write_escaped_string(s: &str, f: &mut impl fmt::Write) -> fmt::Result {
    write!(f, "\"")?;
    for c in s.chars() {
        match c {
            '"' => write!(f, "\\\"")?,
            '\\' => write!(f, "\\\\")?,
            '\n' => write!(f, "\\n")?,
            '\r' => write!(f, "\\r")?,
            '\t' => write!(f, "\\t")?,
            c if (c as u32) < 0x20 => write!(f, "\\u{:04x}", c as u32)?,
            c => write!(f, "{}", c)?,
        }
    }
    write!(f, "\"")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structural_equality_ignores_number_representation() {
        let a = Value::Number(Number::Int64(3));
        let b = Value::Number(Number::Double(3.0));
        assert_eq!(a, b);
    }

    #[test]
    fn object_equality_ignores_key_order() {
        let a = Value::object_from(vec![("a", Value::Bool(true)), ("b", Value::Null)]);
        let b = Value::object_from(vec![("b", Value::Null), ("a", Value::Bool(true))]);
        assert_eq!(a, b);
    }

    #[test]
    fn array_push_rejects_self_cycle() {
        let mut arr = Value::array_from(vec![Value::Null]);
        let clone = arr.clone();
        assert!(arr.array_push(clone).is_err());
    }

    #[test]
    fn array_push_allows_sharing_same_child_twice() {
        let shared = Value::array_from(vec![Value::Bool(true)]);
        let mut parent = Value::array_from(Vec::new());
        assert!(parent.array_push(shared.clone()).is_ok());
        assert!(parent.array_push(shared).is_ok());
        assert_eq!(parent.as_array().unwrap().len(), 2);
    }

    #[test]
    fn empty_string_is_shared_singleton() {
        let a = Value::string("");
        let b = Value::string(String::new());
        if let (Value::String(a), Value::String(b)) = (&a, &b) {
            assert!(Rc::ptr_eq(a, b));
        } else {
            panic!("expected strings");
        }
    }

    #[test]
    fn display_matches_compact_json() {
        let v = Value::object_from(vec![("a", Value::Number(Number::Int64(1)))]);
        assert_eq!(v.to_string(), r#"{"a":1}"#);
    }

    #[test]
    fn object_remove_drops_the_entry() {
        let mut obj = Value::object_from(vec![("a", Value::Bool(true)), ("b", Value::Null)]);
        let removed = obj.object_remove("a").unwrap();
        assert_eq!(removed, Value::Bool(true));
        assert_eq!(obj.object_get("a"), None);
        assert_eq!(obj.object_get("b"), Some(&Value::Null));
    }

    #[test]
    fn array_insert_and_remove_round_trip() {
        let mut arr = Value::array_from(vec![Value::Number(Number::Int64(1)), Value::Number(Number::Int64(3))]);
        arr.array_insert(1, Value::Number(Number::Int64(2))).unwrap();
        assert_eq!(arr.array_get(1).and_then(Value::as_i64), Some(2));
        let removed = arr.array_remove(0).unwrap();
        assert_eq!(removed.as_i64(), Some(1));
        assert_eq!(arr.as_array().unwrap().len(), 2);
    }

    #[test]
    fn array_insert_rejects_cycle() {
        let mut arr = Value::array_from(vec![Value::Null]);
        let clone = arr.clone();
        assert!(arr.array_insert(0, clone).is_err());
        assert_eq!(arr.as_array().unwrap().len(), 1);
    }

    #[test]
    fn array_splice_grows_and_shrinks() {
        let mut arr = Value::array_from(vec![
            Value::Number(Number::Int64(1)),
            Value::Number(Number::Int64(2)),
            Value::Number(Number::Int64(3)),
        ]);
        let removed = arr
            .array_splice(1, 1, vec![Value::Number(Number::Int64(20)), Value::Number(Number::Int64(21))])
            .unwrap();
        assert_eq!(removed.len(), 1);
        let values: Vec<i64> = arr.as_array().unwrap().iter().filter_map(Value::as_i64).collect();
        assert_eq!(values, vec![1, 20, 21, 3]);
    }

    #[test]
    fn duplicate_is_independent_of_the_original() {
        let original = Value::object_from(vec![("items", Value::array_from(vec![Value::Bool(true)]))]);
        let mut copy = original.duplicate();
        copy.object_get_mut("items").unwrap().array_push(Value::Null).unwrap();
        assert_eq!(original.object_get("items").unwrap().as_array().unwrap().len(), 1);
        assert_eq!(copy.object_get("items").unwrap().as_array().unwrap().len(), 2);
    }
}
