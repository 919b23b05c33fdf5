//! Pipeline configuration from YAML

use crate::core::{theme::ThemeTokens, Pipeline};
use crate::core::error::BuildError;
use crate::transform::TransformerRegistry;
use anyhow::{Context, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_yaml::Value;
use std::path::{Path, PathBuf};

/// Per-stage options, in declaration order
pub type StageOptions = IndexMap<String, Value>;

/// Top-level pipeline configuration loaded from YAML
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PipelineConfig {
    /// Pipeline name
    pub name: String,

    /// Optional description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Theme used by utility-generation stages that don't carry their own
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub theme: Option<ThemeTokens>,

    /// Stages, run in exactly this order
    pub stages: Vec<StageSpec>,

    /// Directory content globs are resolved against (not serialized)
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

/// Stage configuration as defined in YAML
///
/// The `kind` tag picks the transformer; every other key is handed to
/// that transformer as an option.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageSpec {
    /// Registered transformer kind, e.g. `rule-pruning`
    pub kind: String,

    /// Human-readable stage name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Transformer-specific options
    #[serde(flatten)]
    pub options: StageOptions,
}

impl StageSpec {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            name: None,
            options: StageOptions::new(),
        }
    }

    /// Set an option; strings, numbers, bools and lists of them all convert
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Display label: the name if given, otherwise the kind
    pub fn label(&self) -> &str {
        self.name.as_deref().unwrap_or(&self.kind)
    }
}

impl PipelineConfig {
    /// Load pipeline configuration from a YAML file
    ///
    /// Content globs are resolved against the file's directory.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        let mut config = Self::from_yaml(&content)
            .with_context(|| format!("Invalid pipeline config {}", path.display()))?;
        config.base_dir = Some(
            path.parent()
                .filter(|p| !p.as_os_str().is_empty())
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from(".")),
        );
        Ok(config)
    }

    /// Parse pipeline configuration from YAML string
    pub fn from_yaml(yaml: &str) -> Result<Self> {
        let config: PipelineConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Validate the shape of the configuration
    ///
    /// Stage kinds and options are checked later, when the pipeline is
    /// composed against a registry.
    pub fn validate(&self) -> Result<()> {
        let mut seen_names = std::collections::HashSet::new();
        for (index, stage) in self.stages.iter().enumerate() {
            if stage.kind.trim().is_empty() {
                anyhow::bail!("Stage {} has an empty kind", index);
            }
            if let Some(name) = &stage.name {
                if !seen_names.insert(name) {
                    anyhow::bail!("Duplicate stage name: {}", name);
                }
            }
        }
        Ok(())
    }

    /// Base directory for content globs
    pub fn base_dir(&self) -> &Path {
        self.base_dir.as_deref().unwrap_or_else(|| Path::new("."))
    }

    pub fn with_base_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.base_dir = Some(dir.into());
        self
    }

    /// Compose against the built-in transformers
    pub fn to_pipeline(&self) -> Result<Pipeline, BuildError> {
        Pipeline::compose(self, &TransformerRegistry::builtin())
    }
}
