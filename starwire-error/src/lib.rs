//! Error utilities for starwire.
//!
//! Protocol level failures are modelled as typed errors in the crates
//! that raise them. This crate provides the glue used around them:
//! a boxed error alias, an [`OpaqueError`] to erase error types
//! and the [`ErrorContext`] extension trait to attach a human readable
//! context to a failure on its way up.
//!
//! ```
//! use starwire_error::{ErrorContext, OpaqueError};
//!
//! fn parse_retry(s: &str) -> Result<u64, OpaqueError> {
//!     s.parse::<u64>().context("parse retry duration in milliseconds")
//! }
//!
//! let err = parse_retry("soon").unwrap_err();
//! assert!(err.to_string().starts_with("parse retry duration in milliseconds"));
//! ```

#![cfg_attr(docsrs, feature(doc_cfg))]

/// Alias for a type-erased error type.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

mod ext;
#[doc(inline)]
pub use ext::{ErrorContext, OpaqueError};
