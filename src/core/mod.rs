//! Core domain models for style pipelines
//!
//! Configuration, theme tokens, the composed pipeline and the state
//! recorded while it runs.

pub mod config;
pub mod error;
pub mod pipeline;
pub mod state;
pub mod theme;

pub use config::{PipelineConfig, StageOptions, StageSpec};
pub use error::{BuildError, ContentWarning};
pub use pipeline::*;
pub use state::*;
pub use theme::ThemeTokens;
