//! Plain-text summaries and JSON export written by the subcommands.

use std::io::Write;

use seamark_core::{Diagnostic, ExportNode, SeamarkCollection};
use seamark_data::{AreaQuery, IngestReport};

use crate::CliError;

/// Write load counts, rejected records and the size of the filtered set.
pub(crate) fn write_summary(
    writer: &mut dyn Write,
    report: &IngestReport,
    area: &AreaQuery,
    nearby: &SeamarkCollection,
) -> Result<(), CliError> {
    writeln!(
        writer,
        "{}: {} records loaded, {} rejected, {} diagnostics",
        report.collection.source(),
        report.collection.len(),
        report.failures.len(),
        report.diagnostics.len()
    )
    .map_err(CliError::WriteOutput)?;
    for failure in &report.failures {
        writeln!(writer, "  rejected {failure}").map_err(CliError::WriteOutput)?;
    }
    writeln!(
        writer,
        "{} records within {} m of {},{}",
        nearby.len(),
        area.radius_m,
        area.center.lat(),
        area.center.lon()
    )
    .map_err(CliError::WriteOutput)
}

/// Write one line per diagnostic.
pub(crate) fn write_diagnostics(
    writer: &mut dyn Write,
    diagnostics: &[Diagnostic],
) -> Result<(), CliError> {
    for diagnostic in diagnostics {
        writeln!(writer, "  warning {diagnostic}").map_err(CliError::WriteOutput)?;
    }
    Ok(())
}

/// Write exported nodes as a pretty-printed JSON array.
pub(crate) fn write_nodes(writer: &mut dyn Write, nodes: &[ExportNode]) -> Result<(), CliError> {
    let payload = serde_json::to_string_pretty(nodes).map_err(CliError::SerialiseNodes)?;
    writer
        .write_all(payload.as_bytes())
        .map_err(CliError::WriteOutput)?;
    writer.write_all(b"\n").map_err(CliError::WriteOutput)?;
    Ok(())
}
