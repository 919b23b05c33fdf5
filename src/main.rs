use anyhow::{Context, Result};
use stylepipe::cli::commands::{BuildCommand, ScanCommand, StagesCommand, ValidateCommand};
use stylepipe::cli::output::*;
use stylepipe::cli::{Cli, Command};
use stylepipe::content::ContentScanner;
use stylepipe::core::{BuildState, Pipeline, PipelineConfig};
use stylepipe::execution::{ExecutionEngine, ExecutionEvent};
use stylepipe::transform::TransformerRegistry;
use std::path::Path;
use tokio::io::AsyncReadExt;
use tracing::error;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::from_args();

    // Initialize logging; RUST_LOG wins over --verbose
    let log_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(log_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .finish();
    tracing::subscriber::set_global_default(subscriber)
        .context("Failed to set logging subscriber")?;

    match &cli.command {
        Command::Build(cmd) => build(cmd).await?,
        Command::Validate(cmd) => validate(cmd)?,
        Command::Stages(cmd) => list_stages(cmd)?,
        Command::Scan(cmd) => scan(cmd).await?,
    }

    Ok(())
}

fn load_config(path: &Path, base_dir: Option<&Path>) -> Result<PipelineConfig> {
    let config = PipelineConfig::from_file(path).context("Failed to load pipeline config")?;
    Ok(match base_dir {
        Some(dir) => config.with_base_dir(dir),
        None => config,
    })
}

async fn build(cmd: &BuildCommand) -> Result<()> {
    let config = load_config(&cmd.config, cmd.base_dir.as_deref())?;
    eprintln!("{} Loaded pipeline: {}", INFO, style(&config.name).bold());

    let pipeline = config
        .to_pipeline()
        .context("Failed to compose pipeline")?;

    let source = match &cmd.input {
        Some(path) => tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read style sheet {}", path.display()))?,
        None => {
            let mut source = String::new();
            tokio::io::stdin()
                .read_to_string(&mut source)
                .await
                .context("Failed to read style sheet from stdin")?;
            source
        }
    };

    let mut engine = ExecutionEngine::new();
    let progress = cmd.progress.then(|| create_progress_bar(pipeline.len()));
    match progress.clone() {
        Some(bar) => engine.add_event_handler(move |event| match &event {
            ExecutionEvent::StageStarted { label, .. } => bar.set_message(label.clone()),
            ExecutionEvent::StageCompleted { .. } => bar.inc(1),
            ExecutionEvent::StageFailed { .. } => {
                bar.inc(1);
                bar.println(format_execution_event(&event));
            }
            ExecutionEvent::Warning(_) => bar.println(format_execution_event(&event)),
            _ => {}
        }),
        None => engine.add_event_handler(|event| eprintln!("{}", format_execution_event(&event))),
    }

    let mut state = BuildState::new(&pipeline);
    let result = engine.execute(&pipeline, &source, &mut state).await;
    if let Some(bar) = progress {
        bar.finish_and_clear();
    }

    let css = match result {
        Ok(css) => css,
        Err(e) => {
            eprintln!("\n{}", format_build_summary(&state));
            for record in &state.stages {
                eprintln!(
                    "  [{}] {} {}",
                    record.index,
                    style(&record.label).cyan(),
                    format_stage_state(&record.state)
                );
            }
            error!("{:#}", anyhow::Error::new(e));
            std::process::exit(1);
        }
    };

    match &cmd.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                tokio::fs::create_dir_all(parent)
                    .await
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            tokio::fs::write(path, &css)
                .await
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        None => println!("{}", css),
    }

    eprintln!("\n{}", format_build_summary(&state));

    Ok(())
}

fn validate(cmd: &ValidateCommand) -> Result<()> {
    println!("{} Validating pipeline...", INFO);

    let result = PipelineConfig::from_file(&cmd.config).and_then(|config| {
        let pipeline = config.to_pipeline()?;
        Ok((config, pipeline))
    });

    match result {
        Ok((config, pipeline)) => {
            println!("{} Pipeline configuration is valid!", CHECK);
            println!("  Name: {}", style(&config.name).bold());
            if let Some(description) = &config.description {
                println!("  Description: {}", style(description).dim());
            }
            print_stages(&pipeline);

            if cmd.json {
                let json = serde_json::to_string_pretty(&config)?;
                println!("\n{}", json);
            }
            Ok(())
        }
        Err(e) => {
            println!("{} Validation failed:", CROSS);
            println!("  {}", style(format!("{:#}", e)).red());
            std::process::exit(1);
        }
    }
}

fn print_stages(pipeline: &Pipeline) {
    println!("  Stages: {}", style(pipeline.len()).cyan());
    for stage in pipeline.stages() {
        if stage.label == stage.kind {
            println!("    {}. {}", stage.index, style(&stage.kind).cyan());
        } else {
            println!(
                "    {}. {} ({})",
                stage.index,
                style(&stage.label).bold(),
                style(&stage.kind).cyan()
            );
        }
    }
}

fn list_stages(cmd: &StagesCommand) -> Result<()> {
    let registry = TransformerRegistry::builtin();
    let kinds: Vec<&str> = registry.kinds().collect();

    if cmd.json {
        let data = serde_json::json!({ "stages": kinds });
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    println!("{} Available stage kinds:", INFO);
    for kind in kinds {
        println!("  {}", style(kind).bold());
    }
    Ok(())
}

async fn scan(cmd: &ScanCommand) -> Result<()> {
    let config = load_config(&cmd.config, cmd.base_dir.as_deref())?;
    let pipeline = config
        .to_pipeline()
        .context("Failed to compose pipeline")?;
    let scanner = ContentScanner::new(pipeline.base_dir.clone());

    let mut reports = Vec::new();
    for stage in pipeline.stages() {
        let Some(source) = stage.transform.content() else {
            continue;
        };
        let result = scanner
            .scan(source)
            .await
            .with_context(|| format!("Failed to scan content for stage {}", stage.index))?;
        reports.push((stage, source.patterns().to_vec(), result));
    }

    if cmd.json {
        let data: Vec<_> = reports
            .iter()
            .map(|(stage, patterns, result)| {
                serde_json::json!({
                    "index": stage.index,
                    "kind": stage.kind,
                    "patterns": patterns,
                    "scan": result,
                })
            })
            .collect();
        println!("{}", serde_json::to_string_pretty(&data)?);
        return Ok(());
    }

    if reports.is_empty() {
        println!("{} No stage declares content globs", INFO);
        return Ok(());
    }

    for (stage, patterns, result) in &reports {
        println!(
            "{} [{}] {} {}",
            SEARCH,
            stage.index,
            style(&stage.label).bold(),
            style(patterns.join(" ")).dim()
        );
        for pattern in &result.unmatched {
            println!("  {} '{}' matched no files", WARN, pattern);
        }
        println!("  Files: {}", style(result.files.len()).cyan());
        for file in &result.files {
            println!("    {}", style(file.display()).dim());
        }
        let classes: Vec<String> = result.classes.iter().cloned().collect();
        println!(
            "  Classes ({}): {}",
            style(classes.len()).cyan(),
            format_list(&classes, 20)
        );
    }

    Ok(())
}
