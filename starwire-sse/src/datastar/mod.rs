//! [🚀 Datastar] event encoding.
//!
//! Datastar is a small js library which patches HTML elements and
//! reactive state ("signals") into a page, driven by events pushed
//! over SSE. This module builds those events on the server side:
//! each operation validates its input and returns a [`DatastarEvent`],
//! an ordered list of `<field> <value>` data lines together with the
//! event type, an optional id and a retry interval.
//!
//! Fields equal to their protocol default are never written,
//! see [`defaults`] for the registered defaults.
//!
//! ```
//! use starwire_sse::datastar::{PatchElementsOptions, ElementPatchMode, patch_elements};
//!
//! let event = patch_elements(
//!     "<li id=\"todo-1\">buy milk</li>",
//!     &PatchElementsOptions::new()
//!         .with_mode(ElementPatchMode::Append)
//!         .with_selector("#todos".into()),
//! )?;
//!
//! let bytes = event.try_into_sse_event()?.serialize()?;
//! assert_eq!(
//!     bytes,
//!     "event: datastar-patch-elements\nretry: 1000\n\
//!      data: mode append\n\
//!      data: selector #todos\n\
//!      data: elements <li id=\"todo-1\">buy milk</li>\n\n",
//! );
//! # Ok::<_, starwire_error::BoxError>(())
//! ```
//!
//! [🚀 Datastar]: https://data-star.dev/

mod enums;
pub use enums::{DatalineField, ElementPatchMode, EventType};

pub mod defaults;

mod error;
pub use error::{DatastarError, DatastarErrorKind};

mod event;
pub use event::{DataLines, DatastarEvent};

mod options;
pub use options::{
    EventOptions, ExecuteScriptOptions, PatchElementsOptions, PatchSignalsOptions,
    ScriptAttributes,
};

mod template;
pub use template::TemplateRenderer;

mod patch_elements;
pub use patch_elements::{patch_elements, patch_elements_template, remove_elements};

mod patch_signals;
pub use patch_signals::{patch_signals, remove_signals};

mod execute_script;
pub use execute_script::execute_script;
