//! One module per recognised schema keyword, each exposing a `compile`
//! function matching [`crate::schemas::CompileFunc`]: given the current
//! compilation context, the enclosing schema object (for keywords that read
//! a sibling, e.g. `additionalProperties` reading `properties`) and the
//! keyword's own value, it returns `None` when the keyword doesn't apply to
//! this schema shape and `Some(Err(..))` when it applies but is malformed.
pub mod additional_items;
pub mod additional_properties;
pub mod all_of;
pub mod any_of;
pub mod boolean;
pub mod dependencies;
pub mod enum_;
pub mod format;
pub mod items;
pub mod max_items;
pub mod max_length;
pub mod max_properties;
pub mod maximum;
pub mod min_items;
pub mod min_length;
pub mod min_properties;
pub mod minimum;
pub mod multiple_of;
pub mod not;
pub mod one_of;
pub mod pattern;
pub mod pattern_properties;
pub mod properties;
pub mod ref_;
pub mod required;
pub mod type_;
pub mod unique_items;

use crate::{error, validator::Validate};

pub type CompilationResult = Result<BoxedValidator, error::CompilationError>;
pub type BoxedValidator = Box<dyn Validate>;
pub type Validators = Vec<BoxedValidator>;
