//! Report formatting for dashboard results.
//!
//! Pure functions: (&[ServiceStatus], OutputFormat) -> String.
//! No I/O, no side effects.

use serde::Serialize;

use crate::page::theme;
use crate::strings::Text;
use crate::types::{OutputFormat, ServiceStatus};

/// Format probe results for output.
///
/// # Errors
/// JSON serialization failed.
pub fn format_report(
    statuses: &[ServiceStatus],
    format: OutputFormat,
) -> Result<String, serde_json::Error> {
    match format {
        OutputFormat::Human => Ok(format_human(statuses)),
        OutputFormat::Json => format_json(statuses),
    }
}

/// "ONLINE (12 ms)", "OFFLINE (no response from server)".
pub fn status_text(status: &ServiceStatus) -> String {
    let word = if status.online {
        Text::StatusOnline
    } else {
        Text::StatusOffline
    };
    if status.detail.is_empty() {
        word.to_string()
    } else {
        format!("{word} {}", theme::paren_quote(&status.detail))
    }
}

/// Number of services online.
pub fn online_count(statuses: &[ServiceStatus]) -> usize {
    statuses.iter().filter(|s| s.online).count()
}

// ============================================================================
// HUMAN FORMAT
// ============================================================================

fn format_human(statuses: &[ServiceStatus]) -> String {
    if statuses.is_empty() {
        return format!("{}\n", Text::NoServices);
    }

    let width = statuses.iter().map(|s| s.name.len()).max().unwrap_or(0);
    let mut out = String::new();

    out.push_str(&format!("=== {} ===\n", Text::DashboardTitle));
    for status in statuses {
        out.push_str(&format!(
            "{:<width$}  {}\n",
            status.name,
            status_text(status)
        ));
    }
    out.push('\n');
    out.push_str(&format!(
        "Online: {} of {}\n",
        online_count(statuses),
        statuses.len()
    ));

    out
}

// ============================================================================
// JSON FORMAT
// ============================================================================

#[derive(Serialize)]
struct JsonReport<'a> {
    online: usize,
    total: usize,
    services: &'a [ServiceStatus],
}

fn format_json(statuses: &[ServiceStatus]) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&JsonReport {
        online: online_count(statuses),
        total: statuses.len(),
        services: statuses,
    })
}

// ============================================================================
// TESTS
// ============================================================================
