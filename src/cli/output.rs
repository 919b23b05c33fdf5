//! CLI output formatting

use crate::{
    core::{BuildState, ExecutionStatus, StageState},
    execution::ExecutionEvent,
};
use console::Emoji;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

// Re-export style
pub use console::style;

// Emojis for output
pub static CHECK: Emoji<'_, '_> = Emoji("✅ ", "✓ ");
pub static CROSS: Emoji<'_, '_> = Emoji("❌ ", "✗ ");
pub static SPINNER: Emoji<'_, '_> = Emoji("⏳ ", "~ ");
pub static INFO: Emoji<'_, '_> = Emoji("ℹ️  ", "i ");
pub static WARN: Emoji<'_, '_> = Emoji("⚠️  ", "!");
pub static ROCKET: Emoji<'_, '_> = Emoji("🚀 ", "> ");
pub static SEARCH: Emoji<'_, '_> = Emoji("🔍 ", "? ");

/// Create a progress bar over `total` stages
pub fn create_progress_bar(total: usize) -> ProgressBar {
    let progress = ProgressBar::new(total as u64);
    let style = ProgressStyle::default_bar()
        .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
        .unwrap_or_else(|_| ProgressStyle::default_bar())
        .progress_chars("#>-");
    progress.set_style(style);
    progress.enable_steady_tick(Duration::from_millis(100));
    progress
}

/// Format a stage state for display
pub fn format_stage_state(state: &StageState) -> String {
    match state {
        StageState::Pending => style("PENDING").dim().to_string(),
        StageState::Running { .. } => style("RUNNING").yellow().to_string(),
        StageState::Completed {
            bytes_in, bytes_out, ..
        } => format!(
            "{} {}",
            style("COMPLETED").green(),
            style(format!("{} → {}", format_bytes(*bytes_in), format_bytes(*bytes_out))).dim()
        ),
        StageState::Failed { .. } => style("FAILED").red().to_string(),
        StageState::Skipped { .. } => style("SKIPPED").dim().to_string(),
    }
}

/// Format an execution status for display
pub fn format_status(status: ExecutionStatus) -> String {
    match status {
        ExecutionStatus::Pending => style("PENDING").dim().to_string(),
        ExecutionStatus::Running => style("RUNNING").yellow().to_string(),
        ExecutionStatus::Completed => style("COMPLETED").green().to_string(),
        ExecutionStatus::Failed => style("FAILED").red().to_string(),
    }
}

/// One-line summary of a finished build
pub fn format_build_summary(state: &BuildState) -> String {
    let icon = match state.status {
        ExecutionStatus::Completed => CHECK,
        _ => CROSS,
    };
    format!(
        "{}{} {} ({}/{} stages, {} warnings)",
        icon,
        style(&state.pipeline_name).bold(),
        format_status(state.status),
        state.completed_stages(),
        state.stages.len(),
        state.warnings.len()
    )
}

/// Format an execution event for display
pub fn format_execution_event(event: &ExecutionEvent) -> String {
    match event {
        ExecutionEvent::PipelineStarted {
            execution_id,
            pipeline_name,
            stages,
        } => format!(
            "{} Building {} with {} stages ({})",
            ROCKET,
            style(pipeline_name).bold(),
            stages,
            style(&execution_id.to_string()[..8]).dim()
        ),
        ExecutionEvent::ContentScanned {
            stage_index,
            files,
            classes,
        } => format!(
            "{} Stage {}: {} files, {} candidate classes",
            SEARCH,
            stage_index,
            style(files).cyan(),
            style(classes).cyan()
        ),
        ExecutionEvent::Warning(warning) => format!("{} {}", WARN, style(warning).yellow()),
        ExecutionEvent::StageStarted { index, label } => {
            format!("{} [{}] {}", SPINNER, index, style(label).cyan())
        }
        ExecutionEvent::StageCompleted {
            index,
            bytes_in,
            bytes_out,
            duration,
        } => format!(
            "{} [{}] {} → {} in {}",
            CHECK,
            index,
            format_bytes(*bytes_in),
            style(format_bytes(*bytes_out)).green(),
            style(format_duration(*duration)).dim()
        ),
        ExecutionEvent::StageFailed { index, error } => {
            format!("{} [{}] {}", CROSS, style(index).red(), style(error).dim())
        }
        ExecutionEvent::PipelineCompleted {
            execution_id,
            status,
        } => {
            let status_str = match status {
                ExecutionStatus::Completed => {
                    format!("{} completed", style("successfully").green())
                }
                ExecutionStatus::Failed => style("failed").red().to_string(),
                _ => format!("{:?}", status),
            };
            format!(
                "{} Build ({}) {}",
                INFO,
                style(&execution_id.to_string()[..8]).dim(),
                status_str
            )
        }
    }
}

pub fn format_bytes(bytes: usize) -> String {
    if bytes < 1024 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} KiB", bytes as f64 / 1024.0)
    }
}

pub fn format_duration(duration: Duration) -> String {
    let millis = duration.as_millis();
    if millis < 1000 {
        format!("{}ms", millis)
    } else {
        format!("{:.2}s", duration.as_secs_f64())
    }
}

/// Truncate a list for display
pub fn format_list(items: &[String], max_items: usize) -> String {
    if items.len() <= max_items {
        items.join(", ")
    } else {
        format!(
            "{}, {}",
            items[..max_items].join(", "),
            style(format!("... ({} more)", items.len() - max_items)).dim()
        )
    }
}
