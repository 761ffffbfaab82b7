use super::{DatalineField, EventType, defaults};
use crate::{Event, EventBuildError, EventDataWrite};
use smol_str::SmolStr;
use starwire_error::{ErrorContext, OpaqueError};
use std::time::Duration;

/// The ordered `<field> <value>` lines of a datastar event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct DataLines(Vec<String>);

impl DataLines {
    /// Return the lines as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[String] {
        &self.0
    }

    /// Returns `true` if there are no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of lines.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate over the lines.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Parse the lines back into `(field, value)` pairs.
    ///
    /// Each line is split on its first space,
    /// lines with an unknown field are skipped.
    pub fn fields(&self) -> impl Iterator<Item = (DatalineField, &str)> {
        self.iter().filter_map(|line| {
            let (keyword, value) = line.split_once(' ').unwrap_or((line, ""));
            let field = DatalineField::parse(keyword);
            if field.is_none() {
                tracing::debug!("ignore data line with unknown field: {keyword}");
            }
            field.map(|field| (field, value))
        })
    }
}

impl<'a> IntoIterator for &'a DataLines {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl EventDataWrite for DataLines {
    fn write_data(&self, w: &mut impl std::io::Write) -> Result<(), OpaqueError> {
        let mut sep: &[u8] = b"";
        for line in &self.0 {
            w.write_all(sep).context("DataLines: write separator")?;
            w.write_all(line.as_bytes())
                .context("DataLines: write line")?;
            sep = b"\n";
        }
        Ok(())
    }
}

/// Builds the data lines of an event, eliding fields at their default.
#[derive(Debug, Default)]
pub(super) struct DataLinesBuilder(Vec<String>);

impl DataLinesBuilder {
    pub(super) fn new() -> Self {
        Self::default()
    }

    /// Push `<field> <value>` unless the value is the registered default.
    ///
    /// Multi-line values become one line per source line.
    pub(super) fn option(&mut self, field: DatalineField, value: defaults::DatalineValue<'_>) {
        if defaults::is_default(field, value) {
            tracing::trace!("elide {field} line at its default value: {value}");
            return;
        }
        match value {
            defaults::DatalineValue::Str(s) => self.content(field, s),
            value => self.0.push(format!("{field} {value}")),
        }
    }

    /// Push one `<field> <segment>` line per line of `value`,
    /// split on the same line breaks as the SSE transport.
    pub(super) fn content(&mut self, field: DatalineField, value: &str) {
        self.0.extend(
            starwire_utils::str::split_lines(value).map(|segment| format!("{field} {segment}")),
        );
    }

    pub(super) fn build(self) -> DataLines {
        DataLines(self.0)
    }
}

/// A datastar event, ready to be handed to the SSE transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatastarEvent {
    event_type: EventType,
    id: Option<SmolStr>,
    data: DataLines,
    retry: Duration,
}

impl DatastarEvent {
    pub(super) fn new(
        event_type: EventType,
        id: Option<SmolStr>,
        data: DataLines,
        retry: Duration,
    ) -> Self {
        Self {
            event_type,
            id,
            data,
            retry,
        }
    }

    /// The [`EventType`] of this event.
    #[must_use]
    pub fn event_type(&self) -> &EventType {
        &self.event_type
    }

    /// The identifier of this event, if any.
    #[must_use]
    pub fn id(&self) -> Option<&str> {
        self.id.as_deref()
    }

    /// The data lines of this event.
    #[must_use]
    pub fn data(&self) -> &DataLines {
        &self.data
    }

    /// The reconnection delay hint of this event.
    #[must_use]
    pub fn retry(&self) -> Duration {
        self.retry
    }

    /// Parse the data lines back into `(field, value)` pairs.
    pub fn fields(&self) -> impl Iterator<Item = (DatalineField, &str)> {
        self.data.fields()
    }

    /// Consume `self` as an SSE [`Event`].
    ///
    /// Fails if the event id contains a line break or a NUL character.
    pub fn try_into_sse_event(self) -> Result<Event<DataLines>, EventBuildError> {
        let event = Event::new()
            .try_with_event(self.event_type.as_smol_str())?
            .with_retry(self.retry)
            .with_data(self.data);
        match self.id {
            Some(id) => event.try_with_id(id),
            None => Ok(event),
        }
    }
}

impl TryFrom<DatastarEvent> for Event<DataLines> {
    type Error = EventBuildError;

    fn try_from(value: DatastarEvent) -> Result<Self, Self::Error> {
        value.try_into_sse_event()
    }
}
