use std::fmt;

starwire_utils::macros::enums::enum_builder! {
    #[derive(Default)]
    /// The mode in which elements are patched into the DOM.
    ///
    /// Parsing is exact: values which are not spelled as in the protocol
    /// (including case or surrounding whitespace) end up as
    /// [`ElementPatchMode::Unknown`] and are refused when encoding an event.
    ///
    /// Protocol reference: <https://github.com/starfederation/datastar/blob/main/sdk/ADR.md#elementpatchmode>
    @String exact
    pub enum ElementPatchMode {
        #[default]
        /// Morph entire element, preserving state
        Outer => "outer",

        /// Morph inner HTML only, preserving state
        Inner => "inner",

        /// Replace entire element, reset state
        Replace => "replace",

        /// Insert at beginning inside target
        Prepend => "prepend",

        /// Insert at end inside target
        Append => "append",

        /// Insert before target element
        Before => "before",

        /// Insert after target element
        After => "after",

        /// Remove target element from DOM
        Remove => "remove",
    }
}

starwire_utils::macros::enums::enum_builder! {
    /// The type protocol on top of SSE which allows for core
    /// pushed based communication between the server and the client.
    ///
    /// Protocol reference: <https://github.com/starfederation/datastar/blob/main/sdk/ADR.md#eventtype>
    @String
    pub enum EventType {
        /// Patches HTML elements into the DOM
        PatchElements => "datastar-patch-elements",
        /// Patches signals into the signal store
        PatchSignals => "datastar-patch-signals",
    }
}

/// The field tag prefixing a datastar data line (`<field> <value>`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatalineField {
    /// CSS selector of the target element(s).
    Selector,
    /// [`ElementPatchMode`] used to patch the elements.
    Mode,
    /// HTML elements to patch.
    Elements,
    /// Whether to use the view transition API.
    UseViewTransition,
    /// JSON object of signals to patch.
    Signals,
    /// Only patch signals which are missing client side.
    OnlyIfMissing,
}

impl DatalineField {
    /// All fields, in the order they are written for their event type.
    pub const ALL: [Self; 6] = [
        Self::Mode,
        Self::Selector,
        Self::UseViewTransition,
        Self::Elements,
        Self::OnlyIfMissing,
        Self::Signals,
    ];

    /// The wire name of this field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Selector => "selector",
            Self::Mode => "mode",
            Self::Elements => "elements",
            Self::UseViewTransition => "useViewTransition",
            Self::Signals => "signals",
            Self::OnlyIfMissing => "onlyIfMissing",
        }
    }

    /// Parse a wire name (case-insensitive) into a [`DatalineField`].
    #[must_use]
    pub fn parse(s: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|field| field.as_str().eq_ignore_ascii_case(s))
    }

    /// The [`EventType`] this field belongs to.
    #[must_use]
    pub const fn event_type(self) -> EventType {
        match self {
            Self::Selector | Self::Mode | Self::Elements | Self::UseViewTransition => {
                EventType::PatchElements
            }
            Self::Signals | Self::OnlyIfMissing => EventType::PatchSignals,
        }
    }
}

impl fmt::Display for DatalineField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
