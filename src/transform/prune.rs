//! Removal of rules whose classes nothing references

use crate::content::ContentSource;
use crate::core::config::StageOptions;
use crate::transform::{
    css::{self, CssPass},
    parse_options, BindContext, StageContext, StyleTransform, TransformError,
};
use lightningcss::stylesheet::StyleSheet;
use serde::Deserialize;
use std::collections::{BTreeSet, HashSet};
use std::sync::Arc;
use tracing::debug;

/// Options accepted by `rule-pruning`
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PruneOptions {
    pub content: Vec<String>,

    /// Class names never removed
    #[serde(default, alias = "whitelist")]
    pub allow_list: Vec<String>,

    #[serde(default)]
    pub extractor: Option<String>,
}

/// Drops rules whose class selectors are unused and not allow-listed
///
/// Rules without class selectors are always kept. A rule with a selector
/// list goes only when every selector in it references an unused class.
/// `@keyframes` blocks are never removed, so a class sharing its name with
/// one is kept as well.
#[derive(Debug, Clone)]
pub struct RulePruning {
    content: ContentSource,
    allow_list: BTreeSet<String>,
}

impl RulePruning {
    pub fn new(content: ContentSource) -> Self {
        Self {
            content,
            allow_list: BTreeSet::new(),
        }
    }

    pub fn with_allow_list<I, S>(mut self, classes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list.extend(classes.into_iter().map(Into::into));
        self
    }

    pub fn bind(
        options: &StageOptions,
        _ctx: &BindContext<'_>,
    ) -> Result<Arc<dyn StyleTransform>, String> {
        let options: PruneOptions = parse_options(options)?;
        let content = ContentSource::new(options.content, options.extractor.as_deref())?;
        Ok(Arc::new(Self::new(content).with_allow_list(options.allow_list)))
    }

    /// Defined classes that would be removed for this context
    pub fn unused(
        &self,
        css: &str,
        ctx: &StageContext<'_>,
    ) -> Result<HashSet<String>, TransformError> {
        Ok(self.unused_in(&css::parse(css)?, ctx))
    }

    // lightningcss drops keyframes named in `unused_symbols` too
    fn unused_in(
        &self,
        stylesheet: &StyleSheet<'_>,
        ctx: &StageContext<'_>,
    ) -> HashSet<String> {
        let keyframes = css::keyframes_names(stylesheet);
        css::defined_classes(stylesheet)
            .into_iter()
            .filter(|class| {
                !ctx.is_used(class) && !self.allow_list.contains(class) && !keyframes.contains(class)
            })
            .collect()
    }
}

impl StyleTransform for RulePruning {
    fn content(&self) -> Option<&ContentSource> {
        Some(&self.content)
    }

    fn transform(&self, css: &str, ctx: &StageContext<'_>) -> Result<String, TransformError> {
        let stylesheet = css::parse(css)?;
        let unused = self.unused_in(&stylesheet, ctx);
        debug!("Stage {} pruning {} unused classes", ctx.index, unused.len());

        CssPass {
            minify: true,
            unused_symbols: unused,
            ..Default::default()
        }
        .finish(stylesheet)
    }
}
