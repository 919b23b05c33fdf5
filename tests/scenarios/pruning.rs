//! Test: Rule Pruning - unused rules go, allow-listed rules stay

use crate::helpers::*;

const SHEET: &str = r#"
html { font-size: 16px; }
.font-sans { font-family: Arial, sans-serif; }
.font-mono { font-family: Menlo, monospace; }
.list-disc { list-style-type: disc; }
.highlighted { background: yellow; }
.card, .panel { padding: 1rem; }
.modal, .overlay { position: fixed; }
"#;

const YAML: &str = r#"
name: "prune"
stages:
  - kind: rule-pruning
    content: ["out/**/*.html"]
    whitelist: ["highlighted"]
"#;

fn fixture() -> tempfile::TempDir {
    site(&[
        ("out/index.html", r#"<body class="font-sans"><div class="card">x</div></body>"#),
        ("out/docs/list.html", r#"<ul class="list-disc"><li>a</li></ul>"#),
    ])
}

#[tokio::test]
async fn test_unused_rules_removed() {
    let dir = fixture();
    let pipeline = load(YAML, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, SHEET).await;
    assert_build_completed(&run);
    let out = run.output();

    assert!(out.contains("html"));
    assert!(out.contains(".font-sans"));
    assert!(out.contains(".list-disc"));
    assert!(out.contains(".highlighted"));
    assert!(out.contains(".card"));
    assert!(!out.contains(".font-mono"));
    assert!(!out.contains(".modal"));
    assert!(run.state.warnings.is_empty());
}

#[tokio::test]
async fn test_pruning_twice_equals_once() {
    let dir = fixture();
    let pipeline = load(YAML, dir.path()).to_pipeline().unwrap();

    let once = run_build(&pipeline, SHEET).await;
    let twice = run_build(&pipeline, once.output()).await;
    assert_eq!(once.output(), twice.output());

    let doubled = load(
        r#"
name: "prune twice"
stages:
  - kind: rule-pruning
    content: ["out/**/*.html"]
    allow-list: ["highlighted"]
  - kind: rule-pruning
    content: ["out/**/*.html"]
    allow-list: ["highlighted"]
"#,
        dir.path(),
    )
    .to_pipeline()
    .unwrap();
    let run = run_build(&doubled, SHEET).await;
    assert_eq!(run.output(), once.output());
}
