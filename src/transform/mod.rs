//! Style transformers - the stages a pipeline is composed of

pub mod css;
pub mod minify;
pub mod prefix;
pub mod prune;
pub mod registry;
pub mod utility;

pub use minify::{Minification, MinifyPreset};
pub use prefix::VendorPrefixing;
pub use prune::RulePruning;
pub use registry::{parse_options, BindContext, TransformerFactory, TransformerRegistry};
pub use utility::UtilityGeneration;

use crate::content::{ContentScan, ContentSource};
use thiserror::Error;

/// Kind tags of the built-in transformers
pub const UTILITY_GENERATION: &str = "utility-generation";
pub const VENDOR_PREFIXING: &str = "vendor-prefixing";
pub const RULE_PRUNING: &str = "rule-pruning";
pub const MINIFICATION: &str = "minification";

/// Error types for transformer operations
#[derive(Debug, Error)]
pub enum TransformError {
    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Minify error: {0}")]
    Minify(String),

    #[error("Print error: {0}")]
    Print(String),

    #[error("{0}")]
    Other(String),
}

/// What a stage sees besides its input text
#[derive(Debug, Clone, Copy, Default)]
pub struct StageContext<'a> {
    /// Position of the stage in the pipeline
    pub index: usize,

    /// Scan of the stage's content globs, if it declared any
    pub content: Option<&'a ContentScan>,
}

impl<'a> StageContext<'a> {
    pub fn new(index: usize) -> Self {
        Self {
            index,
            content: None,
        }
    }

    pub fn with_content(mut self, content: &'a ContentScan) -> Self {
        self.content = Some(content);
        self
    }

    /// Whether scanned content references the class
    pub fn is_used(&self, class_name: &str) -> bool {
        self.content.is_some_and(|scan| scan.contains(class_name))
    }
}

/// A pure text-to-text stage
///
/// Implementations hold their validated options and must not perform
/// I/O; content is scanned by the engine and handed in via
/// [`StageContext`].
pub trait StyleTransform: std::fmt::Debug + Send + Sync {
    /// Content the engine must scan before this stage runs
    fn content(&self) -> Option<&ContentSource> {
        None
    }

    /// Transform the previous stage's output
    fn transform(&self, css: &str, ctx: &StageContext<'_>) -> Result<String, TransformError>;
}
