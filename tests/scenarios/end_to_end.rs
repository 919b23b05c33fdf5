//! Test: End to End - a docs-site pipeline from directives to minified CSS

use crate::helpers::*;
use stylepipe::execution::ExecutionEvent;

const YAML: &str = r#"
name: "docs theme"
description: "Theme styles for the generated docs"
theme:
  fontFamily:
    sans: ["Arial", "sans-serif"]
    mono: ["Menlo", "monospace"]
  listStyleType:
    disc: disc
stages:
  - kind: utility-generation
    content: ["out/*.html"]
  - kind: vendor-prefixing
  - kind: rule-pruning
    content: ["out/*.html"]
  - kind: minification
    preset: default
"#;

const SHEET: &str = r#"
@tailwind base;
@tailwind components;
@tailwind utilities;
"#;

#[tokio::test]
async fn test_docs_pipeline() {
    let dir = site(&[(
        "out/index.html",
        r#"<!doctype html><html><body class="font-sans"><p>Docs</p></body></html>"#,
    )]);
    let pipeline = load(YAML, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, SHEET).await;
    assert_build_completed(&run);
    let out = run.output();

    assert!(out.contains(".font-sans{font-family:Arial,sans-serif}"));
    assert!(!out.contains("font-mono"));
    assert!(!out.contains("list-disc"));
    assert!(!out.contains("@tailwind"));
    assert!(!out.contains('\n'));
}

#[tokio::test]
async fn test_shared_content_scanned_once_per_source() {
    let dir = site(&[("out/index.html", r#"<body class="font-mono"></body>"#)]);
    let pipeline = load(YAML, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, SHEET).await;
    assert_build_completed(&run);

    let scanned: Vec<(usize, usize)> = run
        .events
        .iter()
        .filter_map(|e| match e {
            ExecutionEvent::ContentScanned {
                stage_index, files, ..
            } => Some((*stage_index, *files)),
            _ => None,
        })
        .collect();
    assert_eq!(scanned, vec![(0, 1), (2, 1)]);

    // Content scanning happens before the first stage starts
    let first_start = run
        .events
        .iter()
        .position(|e| matches!(e, ExecutionEvent::StageStarted { .. }))
        .unwrap();
    let last_scan = run
        .events
        .iter()
        .rposition(|e| matches!(e, ExecutionEvent::ContentScanned { .. }))
        .unwrap();
    assert!(last_scan < first_start);

    assert!(run.output().contains(".font-mono{font-family:Menlo,monospace}"));
}

const PREFIX_YAML: &str = r#"
name: "prefixed"
theme:
  fontFamily:
    sans: ["Arial", "sans-serif"]
stages:
  - kind: utility-generation
    content: ["out/*.html"]
  - kind: vendor-prefixing
    targets: "safari 10"
  - kind: minification
"#;

#[tokio::test]
async fn test_generate_prefix_minify() {
    let dir = site(&[(
        "out/index.html",
        r#"<button class="select-none font-sans">Copy</button>"#,
    )]);
    let pipeline = load(PREFIX_YAML, dir.path()).to_pipeline().unwrap();
    assert_eq!(
        pipeline.kinds(),
        vec!["utility-generation", "vendor-prefixing", "minification"]
    );

    let sheet = ".select-none { user-select: none; }\n@tailwind utilities;\n";
    let run = run_build(&pipeline, sheet).await;
    assert_build_completed(&run);
    let out = run.output();

    assert!(out.contains("-webkit-user-select:none"));
    assert!(out.contains("user-select:none"));
    assert!(out.contains(".font-sans{font-family:Arial,sans-serif}"));
    assert!(!out.contains("@tailwind"));
    assert!(!out.contains('\n'));
}
