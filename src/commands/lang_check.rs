//! `weave lang-check` command.

use crate::audit::i18n::{self, LangReport};
use crate::audit::report::{print_table, write_snapshot};
use crate::config::PipelineConfig;
use crate::context::ServiceContext;

/// Execute the `lang-check` command.
///
/// Prints declared-but-unused markers, used-but-undeclared markers, and
/// untranslated literals, then writes a YAML snapshot of the findings.
///
/// # Errors
///
/// Returns an error string if the locale file or template tree cannot be
/// read, or the snapshot cannot be written.
pub fn run(ctx: &ServiceContext, config: &PipelineConfig) -> Result<(), String> {
    let report = super::runtime()?.block_on(i18n::audit(ctx, config))?;
    print_report(&report);
    let path = write_snapshot(ctx, config, "lang-check", &report)?;
    println!("Snapshot written to {}", path.display());
    Ok(())
}

fn print_report(report: &LangReport) {
    let single = |items: &[String]| -> Vec<Vec<String>> {
        items.iter().map(|m| vec![m.clone()]).collect()
    };
    print_table("Unused markers", &["MARKER"], &single(&report.unused));
    print_table("Missed markers", &["MARKER"], &single(&report.missed));

    let untranslated: Vec<Vec<String>> = report
        .needs_i18n
        .iter()
        .map(|(text, file)| vec![text.clone(), file.clone()])
        .collect();
    print_table("Needs i18n", &["TEXT", "FILE"], &untranslated);
}
