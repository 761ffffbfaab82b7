//! Protocol defaults of the datastar data line fields.
//!
//! The client assumes the default value of a field when it is absent,
//! so encoders omit every field which equals its default.
//! [`default_value`] is the one place where these defaults are defined.

use super::{DatalineField, ElementPatchMode};
use std::{fmt, time::Duration};

/// Default duration for retrying SSE on connection reset.
pub const DEFAULT_SSE_RETRY_DURATION: Duration = Duration::from_millis(1000);

/// Default [`ElementPatchMode`] used by the client.
pub static DEFAULT_ELEMENT_PATCH_MODE: ElementPatchMode = ElementPatchMode::Outer;

/// Default for [`DatalineField::UseViewTransition`].
pub const DEFAULT_ELEMENTS_USE_VIEW_TRANSITION: bool = false;

/// Default for [`DatalineField::OnlyIfMissing`].
pub const DEFAULT_PATCH_SIGNALS_ONLY_IF_MISSING: bool = false;

/// Default for the auto removal of scripts executed via datastar.
pub const DEFAULT_EXECUTE_SCRIPT_AUTO_REMOVE: bool = true;

/// A borrowed value of a datastar data line field.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DatalineValue<'a> {
    Mode(&'a ElementPatchMode),
    Bool(bool),
    Str(&'a str),
}

impl fmt::Display for DatalineValue<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Mode(mode) => f.write_str(mode.as_str()),
            Self::Bool(b) => write!(f, "{b}"),
            Self::Str(s) => f.write_str(s),
        }
    }
}

/// Return the registered default of a field,
/// `None` for fields without a default (selectors and content).
#[must_use]
pub fn default_value(field: DatalineField) -> Option<DatalineValue<'static>> {
    match field {
        DatalineField::Mode => Some(DatalineValue::Mode(&DEFAULT_ELEMENT_PATCH_MODE)),
        DatalineField::UseViewTransition => {
            Some(DatalineValue::Bool(DEFAULT_ELEMENTS_USE_VIEW_TRANSITION))
        }
        DatalineField::OnlyIfMissing => {
            Some(DatalineValue::Bool(DEFAULT_PATCH_SIGNALS_ONLY_IF_MISSING))
        }
        DatalineField::Selector | DatalineField::Elements | DatalineField::Signals => None,
    }
}

/// Returns `true` if the field has a registered default and
/// the given value is (structurally) equal to it.
#[must_use]
pub fn is_default(field: DatalineField, value: DatalineValue<'_>) -> bool {
    default_value(field).is_some_and(|default| default == value)
}
