use super::{DatalineField, ElementPatchMode};
use smol_str::SmolStr;
use starwire_error::BoxError;
use std::fmt;

/// Error returned when a datastar event cannot be encoded.
///
/// All of these are validation failures of the given input,
/// retrying the same call will fail the same way.
#[derive(Debug)]
pub struct DatastarError {
    kind: DatastarErrorKind,
    detail: Option<&'static str>,
    source: Option<BoxError>,
}

/// The kind of [`DatastarError`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DatastarErrorKind {
    /// The element patch mode is not one of the known modes.
    InvalidMode(SmolStr),
    /// A required field is empty or absent.
    MissingRequiredField(DatalineField),
    /// Neither a selector nor elements were given to remove elements.
    MissingTarget,
    /// The template renderer failed to render the template with this key.
    TemplateNotFound(SmolStr),
}

impl DatastarError {
    pub(super) fn invalid_mode(mode: &ElementPatchMode) -> Self {
        Self {
            kind: DatastarErrorKind::InvalidMode(mode.as_smol_str()),
            detail: None,
            source: None,
        }
    }

    pub(super) const fn missing_required_field(field: DatalineField) -> Self {
        Self {
            kind: DatastarErrorKind::MissingRequiredField(field),
            detail: None,
            source: None,
        }
    }

    pub(super) const fn missing_elements_for_remove_without_selector() -> Self {
        Self {
            kind: DatastarErrorKind::MissingRequiredField(DatalineField::Elements),
            detail: Some(
                "for remove mode without selector, elements parameter with IDs is required",
            ),
            source: None,
        }
    }

    pub(super) const fn missing_target() -> Self {
        Self {
            kind: DatastarErrorKind::MissingTarget,
            detail: None,
            source: None,
        }
    }

    pub(super) fn template_not_found(key: &str, source: BoxError) -> Self {
        Self {
            kind: DatastarErrorKind::TemplateNotFound(key.into()),
            detail: None,
            source: Some(source),
        }
    }

    /// Return the [`DatastarErrorKind`] of this error.
    #[must_use]
    pub fn kind(&self) -> &DatastarErrorKind {
        &self.kind
    }
}

impl fmt::Display for DatastarError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if let Some(detail) = self.detail {
            return f.write_str(detail);
        }
        match &self.kind {
            DatastarErrorKind::InvalidMode(mode) => {
                write!(f, "invalid ElementPatchMode: {mode:?}; valid modes are: ")?;
                let mut sep = "";
                for mode in ElementPatchMode::KNOWN {
                    write!(f, "{sep}{mode}")?;
                    sep = ", ";
                }
                Ok(())
            }
            DatastarErrorKind::MissingRequiredField(field) => {
                write!(f, "{field} is required and cannot be empty")
            }
            DatastarErrorKind::MissingTarget => f.write_str(
                "either selector or elements (with IDs) must be provided to remove elements",
            ),
            DatastarErrorKind::TemplateNotFound(key) => match &self.source {
                Some(source) => write!(f, "template {key:?} not found: {source}"),
                None => write!(f, "template {key:?} not found"),
            },
        }
    }
}

impl std::error::Error for DatastarError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_ref()
            .map(|source| source.as_ref() as &(dyn std::error::Error + 'static))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let err = DatastarError::invalid_mode(&ElementPatchMode::from("morph"));
        assert_eq!(
            err.to_string(),
            r#"invalid ElementPatchMode: "morph"; valid modes are: outer, inner, replace, prepend, append, before, after, remove"#
        );

        let err = DatastarError::missing_required_field(DatalineField::Signals);
        assert_eq!(err.to_string(), "signals is required and cannot be empty");

        let err = DatastarError::missing_elements_for_remove_without_selector();
        assert_eq!(
            err.kind(),
            &DatastarErrorKind::MissingRequiredField(DatalineField::Elements)
        );
        assert!(err.to_string().starts_with("for remove mode without selector"));
    }

    #[test]
    fn test_template_not_found_source() {
        let err = DatastarError::template_not_found("todo/list", "no such template".into());
        assert_eq!(
            err.kind(),
            &DatastarErrorKind::TemplateNotFound("todo/list".into())
        );
        assert_eq!(
            err.to_string(),
            r#"template "todo/list" not found: no such template"#
        );
        assert!(std::error::Error::source(&err).is_some());
    }
}
