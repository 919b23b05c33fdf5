//! Utility class generation from theme tokens

use crate::content::ContentSource;
use crate::core::{config::StageOptions, theme::ThemeTokens};
use crate::transform::{parse_options, BindContext, StageContext, StyleTransform, TransformError};
use regex::{Captures, Regex};
use serde::Deserialize;
use std::collections::BTreeSet;
use std::sync::Arc;
use tracing::debug;

/// `@tailwind` layers the generator understands
const KNOWN_LAYERS: &[&str] = &["base", "components", "utilities", "screens", "variants"];

/// `@tailwind <layer>;`, with group 1 the layer. Comments and strings
/// match as a whole with no group 1, so directives inside them are skipped.
const DIRECTIVE: &str = r#"/\*[\s\S]*?(?:\*/|\z)|"(?:\\[\s\S]|[^"\\\n])*"|'(?:\\[\s\S]|[^'\\\n])*'|@tailwind\s+([A-Za-z-]+)\s*;?"#;

/// Options accepted by `utility-generation`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct UtilityOptions {
    /// Globs of rendered output to scan for used classes
    pub content: Vec<String>,

    /// Overrides the pipeline-level theme
    #[serde(default)]
    pub theme: Option<ThemeTokens>,

    /// Classes generated whether or not content references them
    #[serde(default)]
    pub safelist: Vec<String>,

    /// Token regex for scanned files
    #[serde(default)]
    pub extractor: Option<String>,
}

/// Expands `@tailwind utilities` into the theme utilities content uses
///
/// Other `@tailwind` layers are dropped; without a `utilities` directive
/// the generated rules are appended. An empty content list means only
/// safelisted utilities are generated.
#[derive(Debug, Clone)]
pub struct UtilityGeneration {
    theme: ThemeTokens,
    safelist: BTreeSet<String>,
    content: ContentSource,
    directive: Regex,
}

impl UtilityGeneration {
    pub fn new(theme: ThemeTokens, content: ContentSource) -> Result<Self, String> {
        let directive = Regex::new(DIRECTIVE).map_err(|e| e.to_string())?;
        Ok(Self {
            theme,
            safelist: BTreeSet::new(),
            content,
            directive,
        })
    }

    pub fn with_safelist<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.safelist.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn bind(
        options: &StageOptions,
        ctx: &BindContext<'_>,
    ) -> Result<Arc<dyn StyleTransform>, String> {
        let options: UtilityOptions = parse_options(options)?;
        let theme = options
            .theme
            .or_else(|| ctx.theme.cloned())
            .unwrap_or_default();
        let content = ContentSource::new(options.content, options.extractor.as_deref())?;

        let stage = Self::new(theme, content)?.with_safelist(options.safelist);
        Ok(Arc::new(stage))
    }

    /// The rules for every utility that is used or safelisted
    fn generate(&self, ctx: &StageContext<'_>) -> String {
        self.theme
            .utilities()
            .into_iter()
            .filter(|u| self.safelist.contains(&u.class_name) || ctx.is_used(&u.class_name))
            .map(|u| u.to_rule())
            .collect()
    }
}

impl StyleTransform for UtilityGeneration {
    fn content(&self) -> Option<&ContentSource> {
        Some(&self.content)
    }

    fn transform(&self, css: &str, ctx: &StageContext<'_>) -> Result<String, TransformError> {
        for layer in self.directive.captures_iter(css).filter_map(|caps| caps.get(1)) {
            let layer = layer.as_str();
            if !KNOWN_LAYERS.contains(&layer) {
                return Err(TransformError::Other(format!(
                    "unknown @tailwind directive '{}'",
                    layer
                )));
            }
        }

        let generated = self.generate(ctx);
        debug!(
            "Stage {} generated {} bytes of utilities",
            ctx.index,
            generated.len()
        );

        let mut expanded = false;
        let output = self
            .directive
            .replace_all(css, |caps: &Captures<'_>| match caps.get(1) {
                None => caps[0].to_string(),
                Some(layer) if layer.as_str() == "utilities" && !expanded => {
                    expanded = true;
                    generated.clone()
                }
                Some(_) => String::new(),
            })
            .into_owned();

        if expanded || generated.is_empty() {
            Ok(output)
        } else {
            let mut output = output;
            if !output.is_empty() && !output.ends_with('\n') {
                output.push('\n');
            }
            output.push_str(&generated);
            Ok(output)
        }
    }
}
