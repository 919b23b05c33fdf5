//! Pipeline composition - binding stage specs to transformers

use crate::core::{config::PipelineConfig, error::BuildError};
use crate::transform::{BindContext, StyleTransform, TransformerRegistry};
use std::path::PathBuf;
use std::sync::Arc;
use tracing::debug;

/// A stage whose options have been validated against its transformer
#[derive(Debug, Clone)]
pub struct BoundStage {
    /// Position in the pipeline, starting at 0
    pub index: usize,

    /// Kind tag the stage was declared with
    pub kind: String,

    /// Display name: the configured name, or the kind
    pub label: String,

    pub transform: Arc<dyn StyleTransform>,
}

/// An immutable, ordered list of bound stages
///
/// Stage order is declaration order and never changes after
/// composition.
#[derive(Debug, Clone)]
pub struct Pipeline {
    /// Pipeline name
    pub name: String,

    /// Directory content globs are resolved against
    pub base_dir: PathBuf,

    stages: Vec<BoundStage>,
}

impl Pipeline {
    /// Compose a pipeline from configuration
    pub fn compose(
        config: &PipelineConfig,
        registry: &TransformerRegistry,
    ) -> Result<Self, BuildError> {
        Composer::new(registry).compose(config)
    }

    pub fn stages(&self) -> &[BoundStage] {
        &self.stages
    }

    pub fn stage(&self, index: usize) -> Option<&BoundStage> {
        self.stages.get(index)
    }

    pub fn len(&self) -> usize {
        self.stages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stages.is_empty()
    }

    /// Stage kinds in execution order
    pub fn kinds(&self) -> Vec<&str> {
        self.stages.iter().map(|s| s.kind.as_str()).collect()
    }
}

/// Turns a [`PipelineConfig`] into a [`Pipeline`]
///
/// Composition performs no I/O. It fails on the first stage whose kind
/// is not registered or whose options its transformer rejects.
#[derive(Debug, Clone, Copy)]
pub struct Composer<'r> {
    registry: &'r TransformerRegistry,
}

impl<'r> Composer<'r> {
    pub fn new(registry: &'r TransformerRegistry) -> Self {
        Self { registry }
    }

    pub fn compose(&self, config: &PipelineConfig) -> Result<Pipeline, BuildError> {
        if config.stages.is_empty() {
            return Err(BuildError::EmptyPipeline);
        }

        let ctx = BindContext {
            theme: config.theme.as_ref(),
        };

        let mut stages = Vec::with_capacity(config.stages.len());
        for (index, spec) in config.stages.iter().enumerate() {
            let transform = match self.registry.bind(&spec.kind, &spec.options, &ctx) {
                None => {
                    return Err(BuildError::UnknownStageKind {
                        index,
                        kind: spec.kind.clone(),
                    })
                }
                Some(Err(reason)) => {
                    return Err(BuildError::InvalidStageOptions {
                        index,
                        kind: spec.kind.clone(),
                        reason,
                    })
                }
                Some(Ok(transform)) => transform,
            };

            debug!("Bound stage {} as {}", index, spec.kind);
            stages.push(BoundStage {
                index,
                kind: spec.kind.clone(),
                label: spec.label().to_string(),
                transform,
            });
        }

        Ok(Pipeline {
            name: config.name.clone(),
            base_dir: config.base_dir().to_path_buf(),
            stages,
        })
    }
}
