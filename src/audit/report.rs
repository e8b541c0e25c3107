//! Table rendering and YAML snapshots for audit results.

use std::path::PathBuf;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// Renders rows as an aligned text table with a dashed underline.
///
/// Column widths are the widest of the header and every cell.
#[must_use]
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(i, h)| {
            rows.iter()
                .filter_map(|r| r.get(i))
                .map(|c| c.chars().count())
                .max()
                .unwrap_or(0)
                .max(h.chars().count())
        })
        .collect();

    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join("  ")
            .trim_end()
            .to_string()
    };

    let mut out = Vec::with_capacity(rows.len() + 2);
    out.push(line(headers.iter().map(|h| (*h).to_string()).collect()));
    out.push(line(widths.iter().map(|w| "-".repeat(*w)).collect()));
    for row in rows {
        out.push(line(row.clone()));
    }
    out.join("\n")
}

/// Prints a titled table, or a "(none)" line when there are no rows.
pub fn print_table(title: &str, headers: &[&str], rows: &[Vec<String>]) {
    println!("{title} ({})", rows.len());
    if rows.is_empty() {
        println!("  (none)");
    } else {
        println!("{}", render_table(headers, rows));
    }
    println!();
}

#[derive(Serialize)]
struct Snapshot<'a, T: Serialize> {
    generated_at: DateTime<Utc>,
    report: &'a T,
}

/// Writes `report` as `<cache>/<name>.yaml`, stamped with the current time.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_snapshot<T: Serialize>(
    ctx: &ServiceContext,
    config: &PipelineConfig,
    name: &str,
    report: &T,
) -> Result<PathBuf, String> {
    let snapshot = Snapshot { generated_at: ctx.clock.now(), report };
    let yaml = serde_yaml::to_string(&snapshot)
        .map_err(|e| format!("failed to serialize {name} snapshot: {e}"))?;
    let path = config.cache_dir().join(format!("{name}.yaml"));
    ctx.fs
        .write(&path, &yaml)
        .map_err(|e| format!("failed to write {name} snapshot to {}: {e}", path.display()))?;
    Ok(path)
}
