//! URI/`$ref` resolution.
//!
//! A [`Resolver`] is built once per compiled schema: it walks the schema
//! tree collecting every `id`-bearing subtree into a registry keyed by its
//! resolved absolute URI (`collect_schemas`), so a `$ref` pointing at a
//! sibling or ancestor scope within the same document resolves without any
//! external call. References to a URI outside the document fall back to an
//! [`ExternalResolver`] supplied by the caller — this crate never performs
//! I/O itself (see the non-goal on network fetching).
use std::borrow::Cow;
use std::collections::HashMap;

use url::Url;

use crate::error::ValidationError;
use crate::helpers;
use crate::schemas::{self, Draft};
use crate::value::Value;

/// Supplies the raw JSON text for a `$ref` target this crate cannot resolve
/// from the document it was given. The core never caches resolver results
/// across `Resolver` instances; a resolver implementation may cache
/// internally.
pub trait ExternalResolver {
    /// Returns the JSON text at `uri`, or an error message to surface as a
    /// [`crate::error::ValidationErrorKind::Resolution`].
    fn resolve(&self, uri: &str) -> Result<String, String>;
}

/// Registry of every `id`-bearing subschema reachable from the root,
/// indexed by its resolved absolute URI (fragment stripped).
pub struct Resolver<'a> {
    draft: Draft,
    scope: Url,
    root: &'a Value,
    store: HashMap<Url, Value>,
    external: Option<Box<dyn ExternalResolver + 'a>>,
}

impl<'a> Resolver<'a> {
    pub(crate) fn new(draft: Draft, scope: &Url, root: &'a Value) -> Self {
        let mut store = HashMap::new();
        collect_schemas(draft, scope, root, &mut store);
        Resolver {
            draft,
            scope: scope.clone(),
            root,
            store,
            external: None,
        }
    }

    #[must_use]
    pub(crate) fn with_external(mut self, external: Box<dyn ExternalResolver + 'a>) -> Self {
        self.external = Some(external);
        self
    }

    /// Resolves an absolute `$ref` URI (already joined against the
    /// compiling context's scope) to the `Value` it designates.
    pub(crate) fn resolve(&self, uri: &Url) -> Result<Value, ValidationError> {
        let mut base = uri.clone();
        base.set_fragment(None);

        let document: Cow<'_, Value> = if base == self.scope {
            Cow::Borrowed(self.root)
        } else if let Some(value) = self.store.get(&base) {
            Cow::Borrowed(value)
        } else {
            let external = self
                .external
                .as_ref()
                .ok_or_else(|| ValidationError::unknown_reference_scheme(base.to_string()))?;
            let text = external
                .resolve(base.as_str())
                .map_err(ValidationError::resolution)?;
            let value = crate::dom::parse_str(&text)
                .map_err(|e| ValidationError::resolution(e.to_string()))?;
            Cow::Owned(value)
        };

        let fragment = uri.fragment().unwrap_or("");
        if !fragment.is_empty() && !fragment.starts_with('/') {
            return Err(ValidationError::invalid_reference(uri.to_string()));
        }
        match helpers::pointer(&document, fragment) {
            Some(target) => Ok(target.clone()),
            None => Err(ValidationError::invalid_reference(uri.to_string())),
        }
    }
}

/// Walks `schema`, tracking the current scope the way schema compilation
/// does (an `id` keyword rebases the scope for its subtree), registering
/// every scope transition under its resolved, fragment-stripped URI.
fn collect_schemas(draft: Draft, scope: &Url, schema: &Value, store: &mut HashMap<Url, Value>) {
    let scope = match schemas::id_of(draft, schema) {
        Some(id) => match Url::options().base_url(Some(scope)).parse(id) {
            Ok(resolved) => {
                let mut key = resolved.clone();
                key.set_fragment(None);
                store.insert(key, schema.clone());
                resolved
            }
            Err(_) => scope.clone(),
        },
        None => scope.clone(),
    };
    match schema {
        Value::Object(map) => {
            for (key, value) in map.iter() {
                if key.as_ref() != "$ref" {
                    collect_schemas(draft, &scope, value, store);
                }
            }
        }
        Value::Array(items) => {
            for item in items.iter() {
                collect_schemas(draft, &scope, item, store);
            }
        }
        _ => {}
    }
}
