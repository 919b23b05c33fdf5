//! Test: Stage Order - stages run exactly once, in declaration order

use crate::helpers::*;
use std::sync::{Arc, Mutex};
use stylepipe::core::config::{PipelineConfig, StageSpec};
use stylepipe::core::Pipeline;

#[tokio::test]
async fn test_n_stages_run_in_declared_order() {
    for n in 1..=6 {
        let log = Arc::new(Mutex::new(Vec::new()));
        let registry = recording_registry(log.clone());

        let tags: Vec<String> = (0..n).map(|i| format!("s{}", i)).collect();
        let config = PipelineConfig {
            name: format!("order-{}", n),
            description: None,
            theme: None,
            stages: tags
                .iter()
                .map(|tag| StageSpec::new("record").with_option("tag", tag.as_str()))
                .collect(),
            base_dir: None,
        };
        let pipeline = Pipeline::compose(&config, &registry).unwrap();

        let run = run_build(&pipeline, "").await;
        assert_build_completed(&run);

        assert_eq!(*log.lock().unwrap(), tags);
        assert_eq!(started_stages(&run.events), (0..n).collect::<Vec<_>>());

        let expected: String = tags.iter().map(|t| format!("/*{}*/", t)).collect();
        assert_eq!(run.output(), expected);
    }
}

#[tokio::test]
async fn test_each_stage_consumes_previous_output() {
    let log = Arc::new(Mutex::new(Vec::new()));
    let registry = recording_registry(log);
    let config = PipelineConfig::from_yaml(
        r#"
name: "chain"
stages:
  - kind: record
    tag: first
  - kind: minification
    preset: lite
  - kind: record
    tag: last
"#,
    )
    .unwrap();
    let pipeline = Pipeline::compose(&config, &registry).unwrap();

    let run = run_build(&pipeline, ".a {\n  color: red;\n}\n").await;
    assert_build_completed(&run);

    // The lite preset drops the comment the first recorder appended
    assert_eq!(run.output(), ".a{color:red}/*last*/");
}
