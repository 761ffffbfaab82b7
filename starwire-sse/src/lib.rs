//! SSE support for starwire.
//!
//! The generic Server-Sent Events part ([`Event`], [`EventDataWrite`])
//! serializes events into the `text/event-stream` wire format,
//! while the [`server`] module turns a stream of such events into
//! an [`http_body::Body`] and a ready-to-send [`http::Response`].
//!
//! The [`datastar`] module builds the event data of the
//! [🚀 Datastar](https://data-star.dev/) protocol on top of it.

#![cfg_attr(docsrs, feature(doc_cfg))]

mod event;
mod event_data;

#[doc(inline)]
pub use {
    event::{Event, EventBuildError},
    event_data::EventDataWrite,
};

pub mod datastar;
pub mod server;
