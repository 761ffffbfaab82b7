use std::fmt;

use crate::BoxError;

mod opaque;
pub use opaque::OpaqueError;

mod context;
use context::ContextError;

/// Extends the `Result` and `Option` types with methods for adding context to errors.
pub trait ErrorContext: private::SealedErrorContext {
    /// The resulting contexct type after adding context to the contained error.
    type Context;

    /// Add a static context to the contained error.
    fn context<M>(self, context: M) -> Self::Context
    where
        M: fmt::Display + Send + Sync + 'static;

    /// Lazily add a context to the contained error, if it exists.
    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> ErrorContext for Result<T, E>
where
    E: Into<BoxError>,
{
    type Context = Result<T, OpaqueError>;

    fn context<M>(self, context: M) -> Self::Context
    where
        M: fmt::Display + Send + Sync + 'static,
    {
        self.map_err(|error| {
            OpaqueError::from_box_error(ContextError {
                context: Box::new(context),
                source: error.into(),
            })
        })
    }

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.map_err(|error| {
            OpaqueError::from_box_error(ContextError {
                context: Box::new(context()),
                source: error.into(),
            })
        })
    }
}

impl<T> ErrorContext for Option<T> {
    type Context = Result<T, OpaqueError>;

    fn context<M>(self, context: M) -> Self::Context
    where
        M: fmt::Display + Send + Sync + 'static,
    {
        self.ok_or_else(|| OpaqueError::from_display(context))
    }

    fn with_context<C, F>(self, context: F) -> Self::Context
    where
        C: fmt::Display + Send + Sync + 'static,
        F: FnOnce() -> C,
    {
        self.ok_or_else(|| OpaqueError::from_display(context()))
    }
}

mod private {
    pub trait SealedErrorContext {}

    impl<T, E> SealedErrorContext for Result<T, E> where E: Into<crate::BoxError> {}
    impl<T> SealedErrorContext for Option<T> {}
}
