//! Output formatting for CLI

use crate::frame::Frame;
use crate::query::QueryPlan;

/// Format a frame as an aligned text table
pub fn format_table(frame: &Frame) -> String {
    let cells: Vec<Vec<String>> = frame
        .rows()
        .iter()
        .map(|row| row.values().iter().map(|v| v.to_string()).collect())
        .collect();

    let mut widths: Vec<usize> = frame.headers().iter().map(|h| h.chars().count()).collect();
    for row in &cells {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut output = String::new();
    output.push_str(&format_line(frame.headers(), &widths));
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    output.push_str(&format_line(&rule, &widths));
    for row in &cells {
        output.push_str(&format_line(row, &widths));
    }
    output.push_str(&format!("({} rows)\n", frame.len()));
    output
}

fn format_line(cells: &[String], widths: &[usize]) -> String {
    let padded: Vec<String> = cells
        .iter()
        .zip(widths)
        .map(|(cell, width)| format!("{:<width$}", cell, width = *width))
        .collect();
    format!("{}\n", padded.join("  ").trim_end())
}

/// Format a frame as a JSON array of records keyed by header
pub fn format_json(frame: &Frame) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(&frame.to_records())
}

/// Format the argument lists of a plan, one invocation per line
pub fn format_plan(plan: &QueryPlan) -> String {
    let mut output = String::new();
    for query in &plan.queries {
        output.push_str(&format!("{}\n", query));
    }
    if let Some(columns) = &plan.columns
        && let Some(link) = columns.link
    {
        output.push_str(&format!(
            "# columns {:?}, time linked to date at offset {}\n",
            columns.columns, link.offset
        ));
    }
    output
}
