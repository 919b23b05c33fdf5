//! Transformer registry - maps stage kind tags to factories

use crate::core::{config::StageOptions, theme::ThemeTokens};
use crate::transform::{
    Minification, RulePruning, StyleTransform, UtilityGeneration, VendorPrefixing, MINIFICATION,
    RULE_PRUNING, UTILITY_GENERATION, VENDOR_PREFIXING,
};
use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde_yaml::Value;
use std::sync::Arc;

/// Pipeline-wide data available while binding a stage
#[derive(Debug, Clone, Copy, Default)]
pub struct BindContext<'a> {
    /// Top-level theme from the pipeline config
    pub theme: Option<&'a ThemeTokens>,
}

/// Builds a bound transformer from raw stage options
///
/// Returns a human-readable reason when the options are invalid.
pub type TransformerFactory = Arc<
    dyn Fn(&StageOptions, &BindContext<'_>) -> Result<Arc<dyn StyleTransform>, String>
        + Send
        + Sync,
>;

/// Registered transformer capabilities
#[derive(Clone, Default)]
pub struct TransformerRegistry {
    factories: IndexMap<String, TransformerFactory>,
}

impl TransformerRegistry {
    /// An empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with the four built-in stage kinds
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(UTILITY_GENERATION, UtilityGeneration::bind);
        registry.register(VENDOR_PREFIXING, VendorPrefixing::bind);
        registry.register(RULE_PRUNING, RulePruning::bind);
        registry.register(MINIFICATION, Minification::bind);
        registry
    }

    /// Register (or replace) a stage kind
    pub fn register<F>(&mut self, kind: impl Into<String>, factory: F)
    where
        F: Fn(&StageOptions, &BindContext<'_>) -> Result<Arc<dyn StyleTransform>, String>
            + Send
            + Sync
            + 'static,
    {
        self.factories.insert(kind.into(), Arc::new(factory));
    }

    pub fn contains(&self, kind: &str) -> bool {
        self.factories.contains_key(kind)
    }

    /// Registered kinds in registration order
    pub fn kinds(&self) -> impl Iterator<Item = &str> {
        self.factories.keys().map(String::as_str)
    }

    /// Bind a stage, or `None` if the kind is not registered
    pub fn bind(
        &self,
        kind: &str,
        options: &StageOptions,
        ctx: &BindContext<'_>,
    ) -> Option<Result<Arc<dyn StyleTransform>, String>> {
        self.factories.get(kind).map(|factory| factory(options, ctx))
    }
}

impl std::fmt::Debug for TransformerRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransformerRegistry")
            .field("kinds", &self.factories.keys().collect::<Vec<_>>())
            .finish()
    }
}

/// Deserialize raw stage options into a typed option struct
pub fn parse_options<T: DeserializeOwned>(options: &StageOptions) -> Result<T, String> {
    let mapping: serde_yaml::Mapping = options
        .iter()
        .map(|(key, value)| (Value::String(key.clone()), value.clone()))
        .collect();
    serde_yaml::from_value(Value::Mapping(mapping)).map_err(|e| e.to_string())
}
