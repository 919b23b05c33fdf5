//! Vendor prefixing for configured browser targets

use crate::core::config::StageOptions;
use crate::transform::{
    css::{resolve_browsers, CssPass, DEFAULT_TARGETS},
    parse_options, BindContext, StageContext, StyleTransform, TransformError,
};
use lightningcss::targets::Browsers;
use serde::Deserialize;
use std::sync::Arc;

/// Browserslist queries, as one string or a list
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum TargetQueries {
    List(Vec<String>),
    String(String),
}

impl TargetQueries {
    pub fn queries(&self) -> Vec<&str> {
        match self {
            TargetQueries::List(list) => list.iter().map(String::as_str).collect(),
            TargetQueries::String(query) => vec![query.as_str()],
        }
    }
}

impl Default for TargetQueries {
    fn default() -> Self {
        TargetQueries::String(DEFAULT_TARGETS.to_string())
    }
}

/// Options accepted by `vendor-prefixing`
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct PrefixOptions {
    /// e.g. `"> 0.5%, not dead"` or `["safari 10", "ios 10"]`
    #[serde(default)]
    pub targets: TargetQueries,
}

#[derive(Debug, Clone)]
pub struct VendorPrefixing {
    browsers: Option<Browsers>,
}

impl VendorPrefixing {
    /// `None` prints declarations as written, with no prefixes
    pub fn new(browsers: Option<Browsers>) -> Self {
        Self { browsers }
    }

    pub fn for_targets(targets: &TargetQueries) -> Result<Self, String> {
        Ok(Self::new(resolve_browsers(&targets.queries())?))
    }

    pub fn bind(
        options: &StageOptions,
        _ctx: &BindContext<'_>,
    ) -> Result<Arc<dyn StyleTransform>, String> {
        let options: PrefixOptions = parse_options(options)?;
        Ok(Arc::new(Self::for_targets(&options.targets)?))
    }

    pub fn browsers(&self) -> Option<&Browsers> {
        self.browsers.as_ref()
    }
}

impl StyleTransform for VendorPrefixing {
    fn transform(&self, css: &str, _ctx: &StageContext<'_>) -> Result<String, TransformError> {
        CssPass {
            minify: true,
            browsers: self.browsers.clone(),
            ..Default::default()
        }
        .run(css)
    }
}
