use starwire_error::{ErrorContext, OpaqueError};
use std::borrow::Cow;

/// Data which can be written as the `data` field(s) of an [`Event`].
///
/// Newlines written by the implementation are split by the
/// [`Event`] serializer into multiple `data: ` fields.
///
/// [`Event`]: super::Event
pub trait EventDataWrite {
    /// Write the data to the given writer.
    fn write_data(&self, w: &mut impl std::io::Write) -> Result<(), OpaqueError>;
}

impl EventDataWrite for String {
    #[inline]
    fn write_data(&self, w: &mut impl std::io::Write) -> Result<(), OpaqueError> {
        self.as_str().write_data(w)
    }
}

impl EventDataWrite for &str {
    fn write_data(&self, w: &mut impl std::io::Write) -> Result<(), OpaqueError> {
        w.write_all(self.as_bytes()).context("write str data")
    }
}

impl EventDataWrite for Cow<'_, str> {
    #[inline]
    fn write_data(&self, w: &mut impl std::io::Write) -> Result<(), OpaqueError> {
        let data: &str = self;
        data.write_data(w)
    }
}
