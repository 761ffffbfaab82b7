//! utilities crate for starwire
//!
//! `starwire-utils` contains the macros and small helpers
//! shared by the other starwire crates. It is not meant to be
//! used directly, the `starwire` crate re-exports what is useful.

#![cfg_attr(docsrs, feature(doc_cfg))]

#[doc(hidden)]
#[macro_use]
pub mod macros;

pub mod str;
