//! `weave icons-check` command.

use crate::audit::icons::{self, IconReport};
use crate::audit::report::{print_table, write_snapshot};
use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// Execute the `icons-check` command.
///
/// Prints every catalog icon whose code no template references, then writes
/// a YAML snapshot of the findings.
///
/// # Errors
///
/// Returns an error string if the template tree cannot be read, the catalog
/// cannot be fetched or parsed, or the snapshot cannot be written.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let report = super::runtime()?.block_on(icons::audit(ctx, config))?;
    print_report(&report);
    let path = write_snapshot(ctx, config, "icons-check", &report)?;
    println!("Snapshot written to {}", path.display());
    Ok(())
}

fn print_report(report: &IconReport) {
    println!("{} icon code(s) referenced locally.", report.local.len());
    let rows: Vec<Vec<String>> = report
        .unused
        .iter()
        .map(|icon| vec![icon.code.clone(), icon.name.clone().unwrap_or_default()])
        .collect();
    print_table("Unused icons", &["CODE", "NAME"], &rows);
}
