use serde::Deserialize;
use starwire_utils::macros::generate_set_and_with;
use std::path::{Component, Path, PathBuf};

/// Configuration of a [`TemplateRegistry`].
///
/// ```
/// use starwire_template::TemplateConfig;
///
/// let config: TemplateConfig = serde_json::from_str(r#"{
///     "base_view_dir": "views/**/*.hbs"
/// }"#).unwrap();
/// assert_eq!(config.root(), std::path::Path::new("views"));
/// assert!(!config.strict_mode);
/// ```
///
/// [`TemplateRegistry`]: crate::TemplateRegistry
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TemplateConfig {
    /// Glob pattern matching the template files, e.g. `views/**/*.hbs`.
    ///
    /// Relative patterns are resolved against the current working directory.
    pub base_view_dir: String,
    /// Fail rendering when the template accesses a missing context field.
    #[serde(default)]
    pub strict_mode: bool,
}

impl TemplateConfig {
    /// Create a new [`TemplateConfig`] for the given glob pattern.
    pub fn new(base_view_dir: impl Into<String>) -> Self {
        Self {
            base_view_dir: base_view_dir.into(),
            strict_mode: false,
        }
    }

    generate_set_and_with! {
        /// Set whether rendering fails on missing context fields.
        pub const fn strict_mode(mut self, strict_mode: bool) -> Self {
            self.strict_mode = strict_mode;
            self
        }
    }

    /// The directory template keys are relative to:
    /// the leading components of the pattern without glob characters.
    #[must_use]
    pub fn root(&self) -> PathBuf {
        Path::new(&self.base_view_dir)
            .components()
            .take_while(|component| match component {
                Component::Normal(s) => !s.to_string_lossy().contains(['*', '?', '[', '{']),
                _ => true,
            })
            .collect()
    }

    /// The template key of a file matched by the pattern:
    /// its path relative to [`Self::root`], without extension,
    /// using `/` as separator.
    #[must_use]
    pub fn template_key(&self, path: &Path) -> Option<String> {
        let relative = path.strip_prefix(self.root()).ok()?.with_extension("");
        let mut key = String::new();
        for component in relative.components() {
            if let Component::Normal(s) = component {
                if !key.is_empty() {
                    key.push('/');
                }
                key.push_str(s.to_str()?);
            }
        }
        (!key.is_empty()).then_some(key)
    }
}
