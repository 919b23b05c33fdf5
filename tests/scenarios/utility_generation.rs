//! Test: Utility Generation - theme tokens become classes content uses

use crate::helpers::*;

#[tokio::test]
async fn test_empty_content_emits_only_safelist() {
    let dir = site(&[]);
    let yaml = r#"
name: "no content"
theme:
  fontFamily:
    sans: ["Arial", "sans-serif"]
    mono: ["Menlo", "monospace"]
  listStyleType:
    disc: disc
    none: none
stages:
  - kind: utility-generation
    content: []
    safelist: ["list-none"]
"#;
    let pipeline = load(yaml, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, "@tailwind utilities;").await;
    assert_build_completed(&run);
    let out = run.output();

    assert!(out.contains(".list-none"));
    assert!(!out.contains(".list-disc"));
    assert!(!out.contains(".font-sans"));
    assert!(!out.contains(".font-mono"));
    assert!(run.state.warnings.is_empty());
}

#[tokio::test]
async fn test_font_fallback_order_preserved() {
    let dir = site(&[("out/index.html", r#"<p class="font-display">Hi</p>"#)]);
    let yaml = r#"
name: "fonts"
stages:
  - kind: utility-generation
    content: ["out/*.html"]
    theme:
      fontFamily:
        display: ["Zeta", "Alpha Sans", "serif"]
"#;
    let pipeline = load(yaml, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, "@tailwind utilities;").await;
    assert_build_completed(&run);
    assert!(run
        .output()
        .contains(r#"font-family: Zeta, "Alpha Sans", serif;"#));
}

#[tokio::test]
async fn test_stage_theme_overrides_pipeline_theme() {
    let dir = site(&[("out/index.html", r#"<p class="font-sans">Hi</p>"#)]);
    let yaml = r#"
name: "override"
theme:
  fontFamily:
    sans: ["Helvetica"]
stages:
  - kind: utility-generation
    content: ["out/*.html"]
    theme:
      fontFamily:
        sans: ["Inter"]
"#;
    let pipeline = load(yaml, dir.path()).to_pipeline().unwrap();

    let run = run_build(&pipeline, "@tailwind utilities;").await;
    assert!(run.output().contains("font-family: Inter;"));
    assert!(!run.output().contains("Helvetica"));
}
