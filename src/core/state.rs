//! Build state models

use crate::core::{error::ContentWarning, pipeline::Pipeline};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Overall build status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExecutionStatus {
    /// Build has not started
    Pending,
    /// Build is scanning content or running stages
    Running,
    /// Every stage completed
    Completed,
    /// A scan or stage failed
    Failed,
}

/// State of a single stage
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum StageState {
    Pending,
    Running {
        started_at: DateTime<Utc>,
    },
    Completed {
        bytes_in: usize,
        bytes_out: usize,
        started_at: DateTime<Utc>,
        completed_at: DateTime<Utc>,
    },
    Failed {
        error: String,
        started_at: DateTime<Utc>,
        failed_at: DateTime<Utc>,
    },
    /// Not run because an earlier stage or scan failed
    Skipped {
        reason: String,
    },
}

impl StageState {
    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            StageState::Completed { .. } | StageState::Failed { .. } | StageState::Skipped { .. }
        )
    }
}

/// A stage's entry in the build state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRecord {
    pub index: usize,
    pub kind: String,
    pub label: String,
    pub state: StageState,
}

/// Everything recorded about one build
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuildState {
    /// Unique execution ID
    pub execution_id: Uuid,

    pub pipeline_name: String,

    pub status: ExecutionStatus,

    pub started_at: Option<DateTime<Utc>>,

    /// When the build completed or failed
    pub completed_at: Option<DateTime<Utc>>,

    /// One record per stage, in pipeline order
    pub stages: Vec<StageRecord>,

    /// Advisory findings; never fail the build
    pub warnings: Vec<ContentWarning>,
}

impl BuildState {
    /// Fresh state with every stage pending
    pub fn new(pipeline: &Pipeline) -> Self {
        Self {
            execution_id: Uuid::new_v4(),
            pipeline_name: pipeline.name.clone(),
            status: ExecutionStatus::Pending,
            started_at: None,
            completed_at: None,
            stages: pipeline
                .stages()
                .iter()
                .map(|s| StageRecord {
                    index: s.index,
                    kind: s.kind.clone(),
                    label: s.label.clone(),
                    state: StageState::Pending,
                })
                .collect(),
            warnings: Vec::new(),
        }
    }

    pub fn start(&mut self) {
        self.status = ExecutionStatus::Running;
        self.started_at = Some(Utc::now());
    }

    pub fn complete(&mut self) {
        self.status = ExecutionStatus::Completed;
        self.completed_at = Some(Utc::now());
    }

    pub fn fail(&mut self) {
        self.status = ExecutionStatus::Failed;
        self.completed_at = Some(Utc::now());
    }

    pub fn stage(&self, index: usize) -> Option<&StageRecord> {
        self.stages.get(index)
    }

    pub(crate) fn set_stage(&mut self, index: usize, state: StageState) {
        if let Some(record) = self.stages.get_mut(index) {
            record.state = state;
        }
    }

    /// Mark every stage from `from` on that hasn't run as skipped
    pub(crate) fn skip_from(&mut self, from: usize, reason: &str) {
        for record in self.stages.iter_mut().skip(from) {
            if !record.state.is_terminal() {
                record.state = StageState::Skipped {
                    reason: reason.to_string(),
                };
            }
        }
    }

    pub fn completed_stages(&self) -> usize {
        self.stages
            .iter()
            .filter(|r| matches!(r.state, StageState::Completed { .. }))
            .count()
    }

    /// Calculate progress percentage (0.0 to 1.0)
    pub fn progress(&self) -> f64 {
        if self.stages.is_empty() {
            return 0.0;
        }
        let done = self.stages.iter().filter(|r| r.state.is_terminal()).count();
        done as f64 / self.stages.len() as f64
    }
}
