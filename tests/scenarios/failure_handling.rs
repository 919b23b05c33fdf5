//! Test: Failure Handling - composition and stage errors abort the build

use crate::helpers::*;
use std::sync::{Arc, Mutex};
use stylepipe::core::{BuildError, ContentWarning, ExecutionStatus, Pipeline, StageState};

#[tokio::test]
async fn test_unknown_stage_fails_before_any_stage_runs() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = recording_registry(log.clone());
    let config = load(
        r#"
name: "typo"
stages:
  - kind: record
    tag: first
  - kind: vendor-prefixer
"#,
        std::path::Path::new("."),
    );

    let err = Pipeline::compose(&config, &registry).unwrap_err();
    match err {
        BuildError::UnknownStageKind { index, kind } => {
            assert_eq!(index, 1);
            assert_eq!(kind, "vendor-prefixer");
        }
        other => panic!("unexpected error: {}", other),
    }
    assert!(log.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_failing_stage_aborts_and_skips_rest() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = recording_registry(log.clone());
    let config = load(
        r#"
name: "abort"
stages:
  - kind: record
    tag: before
  - kind: fail
  - kind: record
    tag: after
  - kind: minification
"#,
        std::path::Path::new("."),
    );
    let pipeline = Pipeline::compose(&config, &registry).unwrap();

    let run = run_build(&pipeline, ".a { color: red }").await;

    let err = run.result.as_ref().unwrap_err();
    assert_eq!(err.stage_index(), Some(1));
    assert!(matches!(err, BuildError::StageTransform { .. }));
    assert_eq!(*log.lock().unwrap(), vec!["before".to_string()]);

    assert_eq!(run.state.status, ExecutionStatus::Failed);
    assert!(matches!(run.state.stages[0].state, StageState::Completed { .. }));
    assert!(matches!(run.state.stages[1].state, StageState::Failed { .. }));
    assert!(matches!(run.state.stages[2].state, StageState::Skipped { .. }));
    assert!(matches!(run.state.stages[3].state, StageState::Skipped { .. }));
    assert_eq!(started_stages(&run.events), vec![0, 1]);
}

#[tokio::test]
async fn test_invalid_browser_query_fails_composition() {
    let config = load(
        r#"
name: "bad targets"
stages:
  - kind: minification
  - kind: vendor-prefixing
    targets: ["netscape 4"]
"#,
        std::path::Path::new("."),
    );

    match config.to_pipeline().unwrap_err() {
        BuildError::InvalidStageOptions { index, kind, .. } => {
            assert_eq!(index, 1);
            assert_eq!(kind, "vendor-prefixing");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
async fn test_invalid_css_fails_in_stage() {
    let pipeline = load(
        r#"
name: "broken sheet"
stages:
  - kind: vendor-prefixing
  - kind: minification
"#,
        std::path::Path::new("."),
    )
    .to_pipeline()
    .unwrap();

    let run = run_build(&pipeline, ".a..b { color: red }").await;
    assert_eq!(run.result.as_ref().unwrap_err().stage_index(), Some(0));
    assert!(matches!(run.state.stages[1].state, StageState::Skipped { .. }));
}

#[tokio::test]
async fn test_glob_matching_nothing_only_warns() {
    let dir = site(&[]);
    let pipeline = load(
        r#"
name: "empty site"
stages:
  - kind: rule-pruning
    content: ["out/**/*.html"]
    allow-list: ["keep"]
"#,
        dir.path(),
    )
    .to_pipeline()
    .unwrap();

    let run = run_build(&pipeline, ".keep { color: red } .drop { color: blue }").await;
    assert_build_completed(&run);
    assert!(run.output().contains(".keep"));
    assert!(!run.output().contains(".drop"));
    assert_eq!(
        run.state.warnings,
        vec![ContentWarning::NoContentMatched {
            stage_index: 0,
            pattern: "out/**/*.html".to_string()
        }]
    );
}
