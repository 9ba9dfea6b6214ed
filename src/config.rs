//! Import settings
//!
//! Settings can be built in code with the `with_*` builders or loaded from a
//! TOML file:
//!
//! ```toml
//! require_marked_for_export = true
//! spacer_policy = "last_wins"
//! spacing_policy = "min"
//!
//! [text]
//! char_width_ratio = 0.55
//! ```

use std::path::Path;

use serde::Deserialize;

use crate::error::ConfigError;

/// What to do when a scroll container has more than one `spacer` child
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacerPolicy {
    /// Fail the artboard with a layout error
    #[default]
    Reject,
    /// Use the last spacer in child order
    LastWins,
}

/// How to combine an outer and an inner repeat-grid spacing when a
/// multi-item list is flattened
#[derive(Debug, Clone, Copy, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SpacingPolicy {
    #[default]
    Min,
    Outer,
    Inner,
    /// Caller-supplied tie-break, receives `(outer, inner)`
    #[serde(skip)]
    Custom(fn(f64, f64) -> f64),
}

impl SpacingPolicy {
    pub fn merge(&self, outer: f64, inner: f64) -> f64 {
        match self {
            SpacingPolicy::Min => outer.min(inner),
            SpacingPolicy::Outer => outer,
            SpacingPolicy::Inner => inner,
            SpacingPolicy::Custom(f) => f(outer, inner),
        }
    }
}

/// Metrics used to estimate the box of auto-sized text
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(default)]
pub struct TextMetrics {
    /// Average glyph advance as a fraction of the font size
    pub char_width_ratio: f64,
    /// Line height as a fraction of the font size
    pub line_height_ratio: f64,
    /// Font size used when a text node has none
    pub default_font_size: f64,
}

impl Default for TextMetrics {
    fn default() -> Self {
        Self {
            char_width_ratio: 0.6,
            line_height_ratio: 1.2,
            default_font_size: 12.0,
        }
    }
}

/// Configuration for one import run
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// Skip artboards that are not marked for export
    pub require_marked_for_export: bool,
    pub spacer_policy: SpacerPolicy,
    pub spacing_policy: SpacingPolicy,
    pub text: TextMetrics,
    /// Recorded as the source of every output document
    pub source_tag: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            require_marked_for_export: false,
            spacer_policy: SpacerPolicy::default(),
            spacing_policy: SpacingPolicy::default(),
            text: TextMetrics::default(),
            source_tag: "xd-layout".to_string(),
        }
    }
}

impl ImportConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(content)?)
    }

    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    pub fn with_require_marked_for_export(mut self, required: bool) -> Self {
        self.require_marked_for_export = required;
        self
    }

    pub fn with_spacer_policy(mut self, policy: SpacerPolicy) -> Self {
        self.spacer_policy = policy;
        self
    }

    pub fn with_spacing_policy(mut self, policy: SpacingPolicy) -> Self {
        self.spacing_policy = policy;
        self
    }

    pub fn with_text_metrics(mut self, metrics: TextMetrics) -> Self {
        self.text = metrics;
        self
    }

    pub fn with_source_tag(mut self, tag: impl Into<String>) -> Self {
        self.source_tag = tag.into();
        self
    }
}
