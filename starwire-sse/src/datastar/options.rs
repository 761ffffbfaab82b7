use super::{ElementPatchMode, defaults};
use indexmap::IndexMap;
use smol_str::SmolStr;
use starwire_utils::macros::generate_set_and_with;
use std::{fmt, time::Duration};

/// Options of the SSE envelope shared by all datastar events.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventOptions {
    /// Identifier of the event, echoed by the client as `Last-Event-ID`.
    pub event_id: Option<SmolStr>,
    /// Reconnection delay hint for the client.
    ///
    /// Falls back to [`defaults::DEFAULT_SSE_RETRY_DURATION`]
    /// when absent or zero.
    pub retry_duration: Option<Duration>,
}

impl EventOptions {
    /// Create new [`EventOptions`] without id and with the default retry duration.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            event_id: None,
            retry_duration: None,
        }
    }

    generate_set_and_with! {
        /// Set the event identifier.
        pub fn event_id(mut self, event_id: Option<SmolStr>) -> Self {
            self.event_id = event_id;
            self
        }
    }

    generate_set_and_with! {
        /// Set the reconnection delay hint.
        pub fn retry_duration(mut self, retry_duration: Option<Duration>) -> Self {
            self.retry_duration = retry_duration;
            self
        }
    }

    pub(super) fn effective_retry(&self) -> Duration {
        self.retry_duration
            .filter(|retry| !retry.is_zero())
            .unwrap_or(defaults::DEFAULT_SSE_RETRY_DURATION)
    }
}

/// Options of a `datastar-patch-elements` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PatchElementsOptions {
    /// The mode in which elements are patched into the DOM.
    ///
    /// If not provided the Datastar client side will default to [`ElementPatchMode::Outer`].
    pub mode: ElementPatchMode,
    /// The CSS selector used to patch the elements.
    ///
    /// Required to remove elements when no elements with ids are given.
    pub selector: Option<SmolStr>,
    /// Whether to use view transitions.
    ///
    /// If not provided the Datastar client side will default to `false`.
    pub use_view_transition: bool,
    /// SSE envelope options.
    pub event: EventOptions,
}

impl Default for PatchElementsOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl PatchElementsOptions {
    /// Create new [`PatchElementsOptions`] with all fields at their default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            mode: ElementPatchMode::Outer,
            selector: None,
            use_view_transition: defaults::DEFAULT_ELEMENTS_USE_VIEW_TRANSITION,
            event: EventOptions::new(),
        }
    }

    generate_set_and_with! {
        /// Set the mode in which elements are patched into the DOM.
        pub fn mode(mut self, mode: ElementPatchMode) -> Self {
            self.mode = mode;
            self
        }
    }

    generate_set_and_with! {
        /// Set the CSS selector used to patch the elements.
        pub fn selector(mut self, selector: Option<SmolStr>) -> Self {
            self.selector = selector;
            self
        }
    }

    generate_set_and_with! {
        /// Set whether to use view transitions.
        pub const fn use_view_transition(mut self, use_view_transition: bool) -> Self {
            self.use_view_transition = use_view_transition;
            self
        }
    }

    generate_set_and_with! {
        /// Set the SSE envelope options.
        pub fn event(mut self, event: EventOptions) -> Self {
            self.event = event;
            self
        }
    }
}

/// Options of a `datastar-patch-signals` event.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PatchSignalsOptions {
    /// Only patch the signals which do not exist yet client side.
    ///
    /// If not provided the Datastar client side will default to `false`.
    pub only_if_missing: bool,
    /// SSE envelope options.
    pub event: EventOptions,
}

impl PatchSignalsOptions {
    /// Create new [`PatchSignalsOptions`] with all fields at their default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            only_if_missing: defaults::DEFAULT_PATCH_SIGNALS_ONLY_IF_MISSING,
            event: EventOptions::new(),
        }
    }

    generate_set_and_with! {
        /// Set whether to only patch signals which are missing client side.
        pub const fn only_if_missing(mut self, only_if_missing: bool) -> Self {
            self.only_if_missing = only_if_missing;
            self
        }
    }

    generate_set_and_with! {
        /// Set the SSE envelope options.
        pub fn event(mut self, event: EventOptions) -> Self {
            self.event = event;
            self
        }
    }
}

/// Attributes rendered on the `<script>` tag of an executed script.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScriptAttributes {
    /// `name="value"` pairs, rendered in insertion order.
    Named(IndexMap<SmolStr, String>),
    /// Raw attribute tokens, rendered as is.
    Positional(Vec<String>),
}

impl fmt::Display for ScriptAttributes {
    /// Writes the attributes as they appear inside the tag,
    /// each one preceded by a single space.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Named(attributes) => {
                for (name, value) in attributes {
                    write!(f, " {name}=\"{value}\"")?;
                }
                Ok(())
            }
            Self::Positional(tokens) => {
                if tokens.is_empty() {
                    return Ok(());
                }
                write!(f, " {}", tokens.join(" "))
            }
        }
    }
}

impl<K, V> FromIterator<(K, V)> for ScriptAttributes
where
    K: Into<SmolStr>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self::Named(
            iter.into_iter()
                .map(|(name, value)| (name.into(), value.into()))
                .collect(),
        )
    }
}

/// Options of a script executed via a `datastar-patch-elements` event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecuteScriptOptions {
    /// Remove the script element from the DOM once it has run.
    pub auto_remove: bool,
    /// Extra attributes of the `<script>` tag.
    pub attributes: Option<ScriptAttributes>,
    /// SSE envelope options.
    pub event: EventOptions,
}

impl Default for ExecuteScriptOptions {
    fn default() -> Self {
        Self::new()
    }
}

impl ExecuteScriptOptions {
    /// Create new [`ExecuteScriptOptions`] with all fields at their default.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            auto_remove: defaults::DEFAULT_EXECUTE_SCRIPT_AUTO_REMOVE,
            attributes: None,
            event: EventOptions::new(),
        }
    }

    generate_set_and_with! {
        /// Set whether the script removes itself after it ran.
        pub const fn auto_remove(mut self, auto_remove: bool) -> Self {
            self.auto_remove = auto_remove;
            self
        }
    }

    generate_set_and_with! {
        /// Set the extra attributes of the `<script>` tag.
        pub fn attributes(mut self, attributes: Option<ScriptAttributes>) -> Self {
            self.attributes = attributes;
            self
        }
    }

    generate_set_and_with! {
        /// Set the SSE envelope options.
        pub fn event(mut self, event: EventOptions) -> Self {
            self.event = event;
            self
        }
    }
}
