use serde::Serialize;
use starwire_error::BoxError;
use std::sync::Arc;

/// Renders a named template with a context into an HTML fragment.
///
/// Used by [`patch_elements_template`] to produce the elements of a
/// `datastar-patch-elements` event. How templates are looked up and which
/// template language they use is up to the implementation.
///
/// [`patch_elements_template`]: super::patch_elements_template
pub trait TemplateRenderer {
    /// Render the template identified by `key` with the given context.
    fn render<C>(&self, key: &str, context: &C) -> Result<String, BoxError>
    where
        C: Serialize + ?Sized;
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for &R {
    #[inline]
    fn render<C>(&self, key: &str, context: &C) -> Result<String, BoxError>
    where
        C: Serialize + ?Sized,
    {
        (**self).render(key, context)
    }
}

impl<R: TemplateRenderer + ?Sized> TemplateRenderer for Arc<R> {
    #[inline]
    fn render<C>(&self, key: &str, context: &C) -> Result<String, BoxError>
    where
        C: Serialize + ?Sized,
    {
        (**self).render(key, context)
    }
}
