use std::io::Write;

use crate::cli::options::OutputFormat;
use crate::execution::{ExecutionPlan, Result};

/// Render a plan as trace lines or pretty JSON.
pub fn render_plan(plan: &ExecutionPlan, format: OutputFormat) -> Result<String> {
    match format {
        OutputFormat::Text => Ok(plan
            .invocations()
            .iter()
            .map(|invocation| format!("$ {invocation}\n"))
            .collect()),
        OutputFormat::Json => Ok(serde_json::to_string_pretty(plan)? + "\n"),
    }
}

pub fn print_plan(plan: &ExecutionPlan, format: OutputFormat) -> Result<()> {
    let rendered = render_plan(plan, format)?;
    let mut stdout = std::io::stdout().lock();
    if let Err(e) = stdout.write_all(rendered.as_bytes()) {
        tracing::warn!("Failed to print plan: {}", e);
    }
    Ok(())
}
