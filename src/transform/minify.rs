//! Final minification

use crate::core::config::StageOptions;
use crate::transform::{
    css::CssPass, parse_options, BindContext, StageContext, StyleTransform, TransformError,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// How hard `minification` works
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MinifyPreset {
    /// Structural minify plus compact printing
    #[default]
    Default,
    /// Whitespace removal only
    Lite,
    /// Same passes as `default`
    Advanced,
}

/// Options accepted by `minification`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct MinifyOptions {
    #[serde(default)]
    pub preset: MinifyPreset,
}

#[derive(Debug, Clone, Default)]
pub struct Minification {
    preset: MinifyPreset,
}

impl Minification {
    pub fn new(preset: MinifyPreset) -> Self {
        Self { preset }
    }

    pub fn preset(&self) -> MinifyPreset {
        self.preset
    }

    pub fn bind(
        options: &StageOptions,
        _ctx: &BindContext<'_>,
    ) -> Result<Arc<dyn StyleTransform>, String> {
        let options: MinifyOptions = parse_options(options)?;
        Ok(Arc::new(Self::new(options.preset)))
    }
}

impl StyleTransform for Minification {
    fn transform(&self, css: &str, _ctx: &StageContext<'_>) -> Result<String, TransformError> {
        let minify = match self.preset {
            MinifyPreset::Default | MinifyPreset::Advanced => true,
            MinifyPreset::Lite => false,
        };

        CssPass {
            minify,
            compact: true,
            ..Default::default()
        }
        .run(css)
    }
}
