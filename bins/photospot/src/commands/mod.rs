//! CLI command implementations

pub mod geo;
pub mod photos;
pub mod query;

use crate::Format;
use owo_colors::OwoColorize;
use photospot_service::ServiceError;
use serde::Serialize;

/// Print a value as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print a service failure the way the API would return it, then fail.
pub fn report(err: &ServiceError, format: Format) -> anyhow::Result<()> {
    let body = err.body();
    match format {
        Format::Json => print_json(&body)?,
        Format::Text => {
            println!("{} {}", err.status_code().to_string().red().bold(), body.message);
            for field in body.fields.iter().flatten() {
                println!("  {} {} ({})", field.field.yellow(), field.message, field.code.dimmed());
            }
            if let Some(trace_id) = &body.trace_id {
                println!("  trace id: {}", trace_id.dimmed());
            }
        }
    }
    anyhow::bail!("request failed with status {}", err.status_code())
}

/// Section header for text output.
pub fn header(title: &str) {
    println!();
    println!("  {}", title.blue().bold());
    println!("  {}", "─".repeat(title.chars().count()).blue());
}
