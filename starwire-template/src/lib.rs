//! Handlebars templates for starwire.
//!
//! A [`TemplateRegistry`] compiles every template file matched by a glob
//! pattern once, and renders them by key. The key of a template is its path
//! relative to the pattern's root directory without extension, so with the
//! pattern `views/**/*.hbs` the file `views/todos/item.hbs` is rendered as
//! `todos/item`.
//!
//! The registry implements [`TemplateRenderer`], which makes it usable with
//! [`patch_elements_template`] to patch rendered templates into the DOM.
//!
//! [`TemplateRenderer`]: starwire_sse::datastar::TemplateRenderer
//! [`patch_elements_template`]: starwire_sse::datastar::patch_elements_template

#![cfg_attr(docsrs, feature(doc_cfg))]

mod config;
mod registry;

#[doc(inline)]
pub use {config::TemplateConfig, registry::TemplateRegistry};
