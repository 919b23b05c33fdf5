//! Build error taxonomy

use crate::transform::TransformError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that abort a build
///
/// Every variant is fatal: the engine stops at the first one and no
/// output text is produced.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("Pipeline has no stages")]
    EmptyPipeline,

    #[error("Stage {index}: unknown stage kind '{kind}'")]
    UnknownStageKind { index: usize, kind: String },

    #[error("Stage {index} ({kind}): invalid options: {reason}")]
    InvalidStageOptions {
        index: usize,
        kind: String,
        reason: String,
    },

    #[error("Stage {index}: failed to read content matched by '{pattern}': {source}")]
    ContentScan {
        index: usize,
        pattern: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Stage {index} ({kind}) failed: {source}")]
    StageTransform {
        index: usize,
        kind: String,
        #[source]
        source: TransformError,
    },
}

impl BuildError {
    /// Index of the stage the error is attributed to, if any
    pub fn stage_index(&self) -> Option<usize> {
        match self {
            BuildError::UnknownStageKind { index, .. }
            | BuildError::InvalidStageOptions { index, .. }
            | BuildError::ContentScan { index, .. }
            | BuildError::StageTransform { index, .. } => Some(*index),
            BuildError::EmptyPipeline => None,
        }
    }
}

/// Non-fatal findings surfaced to the invoking tool
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ContentWarning {
    /// A content glob matched zero files; the stage will treat none of
    /// its classes as used
    NoContentMatched { stage_index: usize, pattern: String },
}

impl std::fmt::Display for ContentWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ContentWarning::NoContentMatched {
                stage_index,
                pattern,
            } => write!(
                f,
                "Stage {}: content pattern '{}' matched no files, every unlisted class will be treated as unused",
                stage_index, pattern
            ),
        }
    }
}
