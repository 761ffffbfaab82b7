use std::fmt;

use crate::BoxError;

pub(super) struct ContextError {
    pub(super) context: Box<dyn fmt::Display + Send + Sync>,
    pub(super) source: BoxError,
}

impl fmt::Debug for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContextError")
            .field("context", &self.context.to_string())
            .field("source", &self.source)
            .finish()
    }
}

impl fmt::Display for ContextError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.context, self.source)
    }
}

impl std::error::Error for ContextError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(self.source.as_ref())
    }
}
