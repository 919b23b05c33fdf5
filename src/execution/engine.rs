//! Build engine - scans content, then runs every stage in order

use crate::{
    content::{ContentScan, ContentScanner},
    core::{BuildError, BuildState, ContentWarning, ExecutionStatus, Pipeline, StageState},
    transform::StageContext,
};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::{debug, error, info, warn};
use uuid::Uuid;

/// Events that can occur during a build
#[derive(Debug, Clone)]
pub enum ExecutionEvent {
    PipelineStarted {
        execution_id: Uuid,
        pipeline_name: String,
        stages: usize,
    },
    ContentScanned {
        stage_index: usize,
        files: usize,
        classes: usize,
    },
    Warning(ContentWarning),
    StageStarted {
        index: usize,
        label: String,
    },
    StageCompleted {
        index: usize,
        bytes_in: usize,
        bytes_out: usize,
        duration: Duration,
    },
    StageFailed {
        index: usize,
        error: String,
    },
    PipelineCompleted {
        execution_id: Uuid,
        status: ExecutionStatus,
    },
}

/// Type for event handlers
pub type EventHandler = Arc<dyn Fn(ExecutionEvent) + Send + Sync>;

/// Runs a composed pipeline over a style sheet
#[derive(Default)]
pub struct ExecutionEngine {
    event_handlers: Vec<EventHandler>,
}

impl ExecutionEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an event handler
    pub fn add_event_handler<F>(&mut self, handler: F)
    where
        F: Fn(ExecutionEvent) + Send + Sync + 'static,
    {
        self.event_handlers.push(Arc::new(handler));
    }

    fn emit_event(&self, event: ExecutionEvent) {
        for handler in &self.event_handlers {
            handler(event.clone());
        }
    }

    /// Run `pipeline` over `source`
    ///
    /// All content is scanned before the first stage runs. The first
    /// failure stops the build; stages after it are marked skipped and
    /// no output is returned.
    pub async fn execute(
        &self,
        pipeline: &Pipeline,
        source: &str,
        state: &mut BuildState,
    ) -> Result<String, BuildError> {
        let execution_id = state.execution_id;
        info!("Starting build: {} ({})", pipeline.name, execution_id);
        self.emit_event(ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name: pipeline.name.clone(),
            stages: pipeline.len(),
        });
        state.start();

        let scans = match self.scan_content(pipeline, state).await {
            Ok(scans) => scans,
            Err(e) => {
                error!("{}", e);
                state.skip_from(0, "content scan failed");
                self.finish(state, ExecutionStatus::Failed);
                return Err(e);
            }
        };

        let mut css = source.to_string();
        for stage in pipeline.stages() {
            let started_at = Utc::now();
            let timer = Instant::now();
            info!("Running stage {} ({})", stage.index, stage.label);
            state.set_stage(stage.index, StageState::Running { started_at });
            self.emit_event(ExecutionEvent::StageStarted {
                index: stage.index,
                label: stage.label.clone(),
            });

            let mut ctx = StageContext::new(stage.index);
            if let Some(scan) = scans.get(stage.index).and_then(|s| s.as_deref()) {
                ctx = ctx.with_content(scan);
            }

            match stage.transform.transform(&css, &ctx) {
                Ok(output) => {
                    let duration = timer.elapsed();
                    debug!(
                        "Stage {} ({}) {} -> {} bytes in {:?}",
                        stage.index,
                        stage.kind,
                        css.len(),
                        output.len(),
                        duration
                    );
                    state.set_stage(
                        stage.index,
                        StageState::Completed {
                            bytes_in: css.len(),
                            bytes_out: output.len(),
                            started_at,
                            completed_at: Utc::now(),
                        },
                    );
                    self.emit_event(ExecutionEvent::StageCompleted {
                        index: stage.index,
                        bytes_in: css.len(),
                        bytes_out: output.len(),
                        duration,
                    });
                    css = output;
                }
                Err(source) => {
                    error!("Stage {} ({}) failed: {}", stage.index, stage.kind, source);
                    state.set_stage(
                        stage.index,
                        StageState::Failed {
                            error: source.to_string(),
                            started_at,
                            failed_at: Utc::now(),
                        },
                    );
                    self.emit_event(ExecutionEvent::StageFailed {
                        index: stage.index,
                        error: source.to_string(),
                    });
                    state.skip_from(
                        stage.index + 1,
                        &format!("stage {} failed", stage.index),
                    );
                    self.finish(state, ExecutionStatus::Failed);
                    return Err(BuildError::StageTransform {
                        index: stage.index,
                        kind: stage.kind.clone(),
                        source,
                    });
                }
            }
        }

        self.finish(state, ExecutionStatus::Completed);
        Ok(css)
    }

    /// Scan each stage's content, reusing scans with identical sources
    async fn scan_content(
        &self,
        pipeline: &Pipeline,
        state: &mut BuildState,
    ) -> Result<Vec<Option<Arc<ContentScan>>>, BuildError> {
        let scanner = ContentScanner::new(pipeline.base_dir.clone());
        let mut cache: HashMap<(Vec<String>, String), Arc<ContentScan>> = HashMap::new();
        let mut scans = Vec::with_capacity(pipeline.len());

        for stage in pipeline.stages() {
            let Some(source) = stage.transform.content() else {
                scans.push(None);
                continue;
            };

            let key = source.cache_key();
            let scan = match cache.get(&key) {
                Some(scan) => scan.clone(),
                None => {
                    let scan = scanner.scan(source).await.map_err(|e| BuildError::ContentScan {
                        index: stage.index,
                        pattern: e.pattern,
                        source: e.source,
                    })?;
                    let scan = Arc::new(scan);
                    cache.insert(key, scan.clone());
                    scan
                }
            };

            self.emit_event(ExecutionEvent::ContentScanned {
                stage_index: stage.index,
                files: scan.files.len(),
                classes: scan.classes.len(),
            });

            for pattern in &scan.unmatched {
                let warning = ContentWarning::NoContentMatched {
                    stage_index: stage.index,
                    pattern: pattern.clone(),
                };
                warn!("{}", warning);
                state.warnings.push(warning.clone());
                self.emit_event(ExecutionEvent::Warning(warning));
            }

            scans.push(Some(scan));
        }

        Ok(scans)
    }

    fn finish(&self, state: &mut BuildState, status: ExecutionStatus) {
        match status {
            ExecutionStatus::Completed => state.complete(),
            _ => state.fail(),
        }
        info!("Build finished: {} - {:?}", state.pipeline_name, status);
        self.emit_event(ExecutionEvent::PipelineCompleted {
            execution_id: state.execution_id,
            status,
        });
    }
}
