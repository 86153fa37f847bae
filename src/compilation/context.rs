//! Compilation-time state threaded through `compile_validators`: the
//! current URI scope and the options the whole compilation was started with.
use std::borrow::Cow;
use std::rc::Rc;

use url::Url;

use super::options::CompilationOptions;
use crate::schemas::{id_of, Draft};
use crate::value::Value;

/// Holds the current URI scope and a shared handle to the compilation
/// options. Cheap to derive a child context from: `push` only allocates a
/// new `Url` when the subschema actually carries an `id`.
#[derive(Debug)]
pub struct CompilationContext<'a> {
    pub(crate) scope: Cow<'a, Url>,
    pub(crate) options: Rc<CompilationOptions>,
}

impl<'a> CompilationContext<'a> {
    pub(crate) fn new(scope: Url, options: Rc<CompilationOptions>) -> Self {
        CompilationContext {
            scope: Cow::Owned(scope),
            options,
        }
    }

    pub(crate) fn draft(&self) -> Draft {
        self.options.draft()
    }

    #[must_use]
    pub fn options(&self) -> &CompilationOptions {
        &self.options
    }

    /// Pushes a new scope for `schema`'s subtree. Before push:
    ///   scope = `http://example.com/`
    ///   `build_url("#/definitions/foo")` -> `http://example.com/#/definitions/foo`
    /// After push, given `schema = {"id": "folder/", ...}`:
    ///   scope = `http://example.com/folder/`
    ///   `build_url("#/definitions/foo")` -> `http://example.com/folder/#/definitions/foo`
    pub(crate) fn push(&'a self, schema: &Value) -> Self {
        match id_of(self.draft(), schema) {
            Some(id) => {
                let scope = Url::options()
                    .base_url(Some(&self.scope))
                    .parse(id)
                    .unwrap_or_else(|_| (*self.scope).clone());
                CompilationContext {
                    scope: Cow::Owned(scope),
                    options: Rc::clone(&self.options),
                }
            }
            None => CompilationContext {
                scope: Cow::Borrowed(self.scope.as_ref()),
                options: Rc::clone(&self.options),
            },
        }
    }

    /// Builds a new URL from `reference` against the current scope. Used by
    /// `$ref` compilation to keep the resolved URI's full path.
    pub(crate) fn build_url(&self, reference: &str) -> Result<Url, url::ParseError> {
        Url::options().base_url(Some(&self.scope)).parse(reference)
    }
}
