//! Test utility functions for stylepipe

use std::path::Path;
use std::sync::{Arc, Mutex};
use stylepipe::core::config::{PipelineConfig, StageOptions};
use stylepipe::core::{BuildError, BuildState, ExecutionStatus, Pipeline, StageState};
use stylepipe::execution::{ExecutionEngine, ExecutionEvent};
use stylepipe::transform::{StageContext, StyleTransform, TransformError, TransformerRegistry};
use tempfile::TempDir;

/// Appends `/*tag*/` and records that it ran
#[derive(Debug)]
pub struct Recorder {
    tag: String,
    log: Arc<Mutex<Vec<String>>>,
}

impl StyleTransform for Recorder {
    fn transform(&self, css: &str, _ctx: &StageContext<'_>) -> Result<String, TransformError> {
        self.log.lock().unwrap().push(self.tag.clone());
        Ok(format!("{}/*{}*/", css, self.tag))
    }
}

/// Always fails
#[derive(Debug)]
pub struct Failing;

impl StyleTransform for Failing {
    fn transform(&self, _css: &str, _ctx: &StageContext<'_>) -> Result<String, TransformError> {
        Err(TransformError::Other("boom".to_string()))
    }
}

/// Built-in kinds plus `record` (option `tag`) and `fail`
pub fn recording_registry(log: Arc<Mutex<Vec<String>>>) -> TransformerRegistry {
    let mut registry = TransformerRegistry::builtin();
    registry.register("record", move |options: &StageOptions, _ctx| {
        let tag = options
            .get("tag")
            .and_then(|v| v.as_str())
            .ok_or_else(|| "missing tag".to_string())?;
        Ok(Arc::new(Recorder {
            tag: tag.to_string(),
            log: log.clone(),
        }) as Arc<dyn StyleTransform>)
    });
    registry.register("fail", |_options, _ctx| {
        Ok(Arc::new(Failing) as Arc<dyn StyleTransform>)
    });
    registry
}

/// A site directory with rendered output files
pub fn site(files: &[(&str, &str)]) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    for (path, content) in files {
        write(dir.path(), path, content);
    }
    dir
}

pub fn write(dir: &Path, path: &str, content: &str) {
    let full = dir.join(path);
    if let Some(parent) = full.parent() {
        std::fs::create_dir_all(parent).unwrap();
    }
    std::fs::write(full, content).unwrap();
}

/// Parse a YAML config rooted at `base_dir`
pub fn load(yaml: &str, base_dir: &Path) -> PipelineConfig {
    PipelineConfig::from_yaml(yaml).unwrap().with_base_dir(base_dir)
}

/// Outcome of one build
pub struct BuildRun {
    pub state: BuildState,
    pub result: Result<String, BuildError>,
    pub events: Vec<ExecutionEvent>,
}

impl BuildRun {
    pub fn output(&self) -> &str {
        match &self.result {
            Ok(css) => css,
            Err(e) => panic!("build failed: {}", e),
        }
    }
}

/// Run a composed pipeline, capturing every event
pub async fn run_build(pipeline: &Pipeline, source: &str) -> BuildRun {
    let events = Arc::new(Mutex::new(Vec::new()));
    let sink = events.clone();

    let mut engine = ExecutionEngine::new();
    engine.add_event_handler(move |event| sink.lock().unwrap().push(event));

    let mut state = BuildState::new(pipeline);
    let result = engine.execute(pipeline, source, &mut state).await;
    let events = events.lock().unwrap().clone();

    BuildRun {
        state,
        result,
        events,
    }
}

/// Assert the build completed and every stage ran
pub fn assert_build_completed(run: &BuildRun) {
    assert!(run.result.is_ok(), "build failed: {:?}", run.result.as_ref().err());
    assert_eq!(run.state.status, ExecutionStatus::Completed);
    for record in &run.state.stages {
        assert!(
            matches!(record.state, StageState::Completed { .. }),
            "stage {} is {:?}",
            record.index,
            record.state
        );
    }
}

/// Indices of StageStarted events, in emission order
pub fn started_stages(events: &[ExecutionEvent]) -> Vec<usize> {
    events
        .iter()
        .filter_map(|e| match e {
            ExecutionEvent::StageStarted { index, .. } => Some(*index),
            _ => None,
        })
        .collect()
}
