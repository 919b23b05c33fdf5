//! stylepipe - composable CSS build pipelines

pub mod cli;
pub mod content;
pub mod core;
pub mod execution;
pub mod transform;

// Re-export commonly used types
pub use crate::content::{ContentScan, ContentScanner, ContentSource};
pub use crate::core::{BuildError, BuildState, ContentWarning, ExecutionStatus, Pipeline, PipelineConfig, StageSpec, StageState, ThemeTokens};
pub use crate::execution::{ExecutionEngine, ExecutionEvent};
pub use crate::transform::{StageContext, StyleTransform, TransformError, TransformerRegistry};
