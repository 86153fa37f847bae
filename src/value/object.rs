//! Insertion-ordered object storage for `Value::Object`.
//!
//! Keys keep their insertion order (so a parse-then-serialize round trip
//! preserves the source layout) while lookups go through a djb2-hashed index
//! rather than a linear scan.
use std::collections::HashMap;
use std::hash::{BuildHasherDefault, Hasher};
use std::rc::Rc;

use super::Value;

/// `std::hash::Hash` implementation of the djb2 string-hash algorithm.
#[derive(Default)]
pub(crate) struct Djb2Hasher(u64);

impl Hasher for Djb2Hasher {
    fn write(&mut self, bytes: &[u8]) {
        let mut hash = if self.0 == 0 { 5381 } else { self.0 };
        for &byte in bytes {
            hash = hash.wrapping_mul(33).wrapping_add(u64::from(byte));
        }
        self.0 = hash;
    }

    fn finish(&self) -> u64 {
        self.0
    }
}

type Djb2BuildHasher = BuildHasherDefault<Djb2Hasher>;

#[derive(Debug, Clone, Default)]
pub(crate) struct ObjectData {
    entries: Vec<(Rc<str>, Value)>,
    index: HashMap<Rc<str>, usize, Djb2BuildHasher>,
}

impl ObjectData {
    pub(crate) fn new() -> Self {
        ObjectData {
            entries: Vec::new(),
            index: HashMap::default(),
        }
    }

    pub(crate) fn from_pairs<I>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (Rc<str>, Value)>,
    {
        let mut object = ObjectData::new();
        for (key, value) in pairs {
            object.insert(key, value);
        }
        object
    }

    pub(crate) fn len(&self) -> usize {
        self.entries.len()
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub(crate) fn get(&self, key: &str) -> Option<&Value> {
        self.index.get(key).map(|&i| &self.entries[i].1)
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        self.index.contains_key(key)
    }

    /// Inserts or overwrites `key`. Overwriting keeps the key's original
    /// insertion position rather than moving it to the end.
    pub(crate) fn insert(&mut self, key: Rc<str>, value: Value) {
        if let Some(&i) = self.index.get(key.as_ref()) {
            self.entries[i].1 = value;
        } else {
            let i = self.entries.len();
            self.index.insert(Rc::clone(&key), i);
            self.entries.push((key, value));
        }
    }

    pub(crate) fn get_mut(&mut self, key: &str) -> Option<&mut Value> {
        let i = *self.index.get(key)?;
        Some(&mut self.entries[i].1)
    }

    /// Removes `key`, returning its value. Every entry after the removed one
    /// shifts down a position, so the index's cached positions for those
    /// entries need updating too.
    pub(crate) fn remove(&mut self, key: &str) -> Option<Value> {
        let i = self.index.remove(key)?;
        let (_, value) = self.entries.remove(i);
        for position in self.index.values_mut() {
            if *position > i {
                *position -= 1;
            }
        }
        Some(value)
    }

    pub(crate) fn keys(&self) -> impl Iterator<Item = &Rc<str>> {
        self.entries.iter().map(|(k, _)| k)
    }

    pub(crate) fn values(&self) -> impl Iterator<Item = &Value> {
        self.entries.iter().map(|(_, v)| v)
    }

    pub(crate) fn iter(&self) -> impl Iterator<Item = (&Rc<str>, &Value)> {
        self.entries.iter().map(|(k, v)| (k, v))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::number::Number;

    #[test]
    fn preserves_insertion_order() {
        let mut obj = ObjectData::new();
        obj.insert(Rc::from("b"), Value::Number(Number::Int64(2)));
        obj.insert(Rc::from("a"), Value::Number(Number::Int64(1)));
        let keys: Vec<&str> = obj.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, vec!["b", "a"]);
    }

    #[test]
    fn overwrite_keeps_position() {
        let mut obj = ObjectData::new();
        obj.insert(Rc::from("a"), Value::Number(Number::Int64(1)));
        obj.insert(Rc::from("b"), Value::Number(Number::Int64(2)));
        obj.insert(Rc::from("a"), Value::Number(Number::Int64(3)));
        let keys: Vec<&str> = obj.keys().map(|k| k.as_ref()).collect();
        assert_eq!(keys, vec!["a", "b"]);
        assert_eq!(obj.get("a").unwrap().as_i64(), Some(3));
    }

    #[test]
    fn remove_shifts_later_indices() {
        let mut obj = ObjectData::new();
        obj.insert(Rc::from("a"), Value::Number(Number::Int64(1)));
        obj.insert(Rc::from("b"), Value::Number(Number::Int64(2)));
        obj.insert(Rc::from("c"), Value::Number(Number::Int64(3)));
        let removed = obj.remove("b").unwrap();
        assert_eq!(removed.as_i64(), Some(2));
        assert_eq!(obj.get("a").unwrap().as_i64(), Some(1));
        assert_eq!(obj.get("c").unwrap().as_i64(), Some(3));
        assert!(obj.get("b").is_none());
        assert_eq!(obj.len(), 2);
    }
}
