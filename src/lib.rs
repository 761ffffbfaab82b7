//! 🚀 starwire encodes the [Datastar] server push protocol for the 🦀 Rust language.
//!
//! Datastar patches HTML elements and reactive state ("signals") into a running
//! web page, driven by events the server pushes over Server-Sent Events (SSE).
//! starwire turns already rendered HTML or already serialized JSON into those
//! events, validates them, and streams them as a `text/event-stream` response body.
//!
//! | module | contents |
//! |-|-|
//! | [`datastar`] | [`patch_elements`](datastar::patch_elements) ⸱ [`patch_signals`](datastar::patch_signals) ⸱ [`execute_script`](datastar::execute_script) ⸱ [`remove_elements`](datastar::remove_elements) ⸱ [`remove_signals`](datastar::remove_signals) |
//! | [`sse`] | [`Event`](sse::Event) serialization ⸱ [`Sse`](sse::server::Sse) response ⸱ [keep-alive](sse::server::KeepAlive) |
//! | `template` | handlebars `TemplateRegistry` (feature `template`) |
//! | [`error`] | [`OpaqueError`](error::OpaqueError) ⸱ [`ErrorContext`](error::ErrorContext) |
//!
//! ```
//! use starwire::datastar::{PatchSignalsOptions, patch_signals};
//!
//! let event = patch_signals(r#"{"count":1}"#, &PatchSignalsOptions::new().with_only_if_missing(true))?;
//! let lines: Vec<_> = event.data().iter().collect();
//! assert_eq!(lines, ["onlyIfMissing true", r#"signals {"count":1}"#]);
//! # Ok::<_, starwire::error::BoxError>(())
//! ```
//!
//! [Datastar]: https://data-star.dev/

#![cfg_attr(docsrs, feature(doc_cfg))]
#![forbid(unsafe_code)]

pub mod error {
    //! Error utilities, re-exported from `starwire-error`.

    pub use ::starwire_error::*;
}

pub mod utils {
    //! Utilities in service of starwire, re-exported from `starwire-utils`.

    pub use ::starwire_utils::*;
}

pub mod sse {
    //! Server-Sent Events, re-exported from `starwire-sse`.

    pub use ::starwire_sse::{Event, EventBuildError, EventDataWrite, server};
}

pub use ::starwire_sse::datastar;

#[cfg(feature = "template")]
#[cfg_attr(docsrs, doc(cfg(feature = "template")))]
pub mod template {
    //! Handlebars templates, re-exported from `starwire-template`.

    pub use ::starwire_template::*;
}
