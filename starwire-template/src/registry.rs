use crate::TemplateConfig;
use handlebars::Handlebars;
use serde::Serialize;
use starwire_error::{BoxError, ErrorContext, OpaqueError};
use starwire_sse::datastar::TemplateRenderer;
use starwire_utils::macros::generate_set_and_with;
use std::fmt;

/// Compiled handlebars templates, keyed by their path relative
/// to the root of the configured pattern, without extension.
///
/// The registry is immutable once loaded and can be shared
/// between requests (e.g. behind an [`Arc`](std::sync::Arc)).
pub struct TemplateRegistry {
    handlebars: Handlebars<'static>,
    config: TemplateConfig,
}

impl TemplateRegistry {
    /// Create an empty [`TemplateRegistry`], without loading any file.
    #[must_use]
    pub fn new(config: TemplateConfig) -> Self {
        let mut handlebars = Handlebars::new();
        handlebars.set_strict_mode(config.strict_mode);
        Self { handlebars, config }
    }

    /// Load and compile all templates matched by the configured pattern.
    ///
    /// Matched directories are skipped. Fails on the first file
    /// which cannot be read or compiled.
    pub fn load(config: TemplateConfig) -> Result<Self, OpaqueError> {
        let mut registry = Self::new(config);

        let paths = glob::glob(&registry.config.base_view_dir).with_context(|| {
            format!("invalid template pattern: {}", registry.config.base_view_dir)
        })?;
        for entry in paths {
            let path = entry.context("read matched template path")?;
            if !path.is_file() {
                tracing::trace!("skip matched template path which is not a file: {path:?}");
                continue;
            }
            let key = registry
                .config
                .template_key(&path)
                .with_context(|| format!("derive template key of {}", path.display()))?;
            let source = std::fs::read_to_string(&path)
                .with_context(|| format!("read template file {}", path.display()))?;
            registry.try_set_template(&key, source)?;
            tracing::debug!("loaded template {key:?} from {path:?}");
        }

        tracing::debug!(
            "loaded {} template(s) from {}",
            registry.handlebars.get_templates().len(),
            registry.config.base_view_dir,
        );
        Ok(registry)
    }

    generate_set_and_with! {
        /// Compile and register a template under the given key,
        /// replacing a previous template with the same key.
        pub fn template(mut self, key: &str, source: impl AsRef<str>) -> Result<Self, OpaqueError> {
            self.handlebars
                .register_template_string(key, source)
                .with_context(|| format!("compile template {key:?}"))?;
            Ok(self)
        }
    }

    /// Returns `true` if a template is registered under the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.handlebars.has_template(key)
    }

    /// Iterate over the keys of all registered templates.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.handlebars.get_templates().keys().map(String::as_str)
    }

    /// The configuration this registry was created with.
    #[must_use]
    pub fn config(&self) -> &TemplateConfig {
        &self.config
    }
}

impl fmt::Debug for TemplateRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TemplateRegistry")
            .field("config", &self.config)
            .field("templates", &self.handlebars.get_templates().len())
            .finish()
    }
}

impl TemplateRenderer for TemplateRegistry {
    fn render<C>(&self, key: &str, context: &C) -> Result<String, BoxError>
    where
        C: Serialize + ?Sized,
    {
        if !self.contains(key) {
            return Err(OpaqueError::from_display(format!(
                "template {key:?} not found in path: {}",
                self.config.base_view_dir
            ))
            .into_boxed());
        }
        Ok(self.handlebars.render(key, &context)?)
    }
}
