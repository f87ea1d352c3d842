use std::path::Path;

use super::CsvError;
use crate::model::Phase;
use crate::schedule::dates::format_iso;

const HEADER: [&str; 8] = [
    "Order",
    "Phase",
    "Discipline",
    "Owner",
    "Status",
    "Start Date",
    "End Date",
    "Days",
];

/// Write a project's schedule as semicolon-delimited CSV to any writer.
///
/// Dates are ISO (`YYYY-MM-DD`); unplaced phases get empty date and day cells.
/// Returns the number of phases written.
pub fn write_schedule<W: std::io::Write>(phases: &[Phase], writer: W) -> Result<usize, CsvError> {
    let mut wtr = csv::WriterBuilder::new()
        .delimiter(b';')
        .from_writer(writer);

    wtr.write_record(HEADER)?;
    for phase in phases {
        let order = phase.sort_order.to_string();
        let start = format_iso(phase.start_date);
        let end = format_iso(phase.end_date);
        let days = phase
            .duration_days()
            .map(|d| d.to_string())
            .unwrap_or_default();
        wtr.write_record([
            order.as_str(),
            phase.name.as_str(),
            phase.discipline.as_str(),
            phase.owner.as_str(),
            phase.status.label(),
            start.as_str(),
            end.as_str(),
            days.as_str(),
        ])?;
    }

    wtr.flush()?;
    Ok(phases.len())
}

/// Export a project's schedule to a CSV file.
pub fn export_schedule_csv(phases: &[Phase], path: &Path) -> Result<usize, CsvError> {
    let file = std::fs::File::create(path)?;
    let count = write_schedule(phases, file)?;
    tracing::info!(path = %path.display(), count, "exported schedule");
    Ok(count)
}
