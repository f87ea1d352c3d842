use std::path::Path;

use super::CsvError;
use crate::model::{PhaseBlueprint, Template};

/// Column a header maps onto.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Name,
    Discipline,
    Role,
    Duration,
}

/// Detect delimiter by checking the first line for common separators.
fn detect_delimiter(first_line: &str) -> u8 {
    let semicolons = first_line.matches(';').count();
    let commas = first_line.matches(',').count();
    let tabs = first_line.matches('\t').count();

    if semicolons >= commas && semicolons >= tabs {
        b';'
    } else if tabs >= commas {
        b'\t'
    } else {
        b','
    }
}

/// Normalize a header string to a canonical column key.
fn normalize_header(h: &str) -> String {
    h.trim().to_lowercase().replace([' ', '-', '_'], "")
}

fn header_to_col(normalized: &str) -> Option<Column> {
    match normalized {
        "name" | "phase" | "phasename" | "task" | "title" | "step" => Some(Column::Name),
        "discipline" | "department" | "track" => Some(Column::Discipline),
        "role" | "ownerrole" | "owner" | "assignee" => Some(Column::Role),
        "duration" | "days" | "durationdays" | "length" | "estimate" => Some(Column::Duration),
        _ => None,
    }
}

/// Parse template CSV text.
///
/// Auto-detects the delimiter (comma, semicolon, tab) and matches headers
/// loosely ("Phase Name", "Owner Role", "Days", ...). Rows with a blank name
/// or a duration that is not a positive integer are skipped.
/// Returns `(template, skipped_count)`.
pub fn parse_template(name: &str, content: &str) -> Result<(Template, usize), CsvError> {
    let first_line = content.lines().next().unwrap_or("");
    let delimiter = detect_delimiter(first_line);

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(content.as_bytes());

    let headers = reader.headers()?.clone();
    let col_map: Vec<Option<Column>> = headers
        .iter()
        .map(|h| header_to_col(&normalize_header(h)))
        .collect();

    let has = |col: Column| col_map.contains(&Some(col));
    if !has(Column::Name) || !has(Column::Duration) {
        return Err(CsvError::MissingColumns {
            found: headers.iter().map(str::to_string).collect(),
        });
    }

    let mut phases = Vec::new();
    let mut skipped = 0usize;

    for (i, result) in reader.records().enumerate() {
        let row = i + 2;
        let record = match result {
            Ok(r) => r,
            Err(e) => {
                tracing::warn!(row, error = %e, "skipping unreadable template row");
                skipped += 1;
                continue;
            }
        };

        let mut phase_name = "";
        let mut discipline = "";
        let mut role = "";
        let mut duration = "";
        for (field, col) in record.iter().zip(col_map.iter()) {
            match col {
                Some(Column::Name) => phase_name = field,
                Some(Column::Discipline) => discipline = field,
                Some(Column::Role) => role = field,
                Some(Column::Duration) => duration = field,
                None => {}
            }
        }

        if phase_name.is_empty() {
            skipped += 1;
            continue;
        }
        let duration = match duration.parse::<u32>() {
            Ok(d) if d >= 1 => d,
            _ => {
                tracing::warn!(row, duration, phase = phase_name, "skipping row with invalid duration");
                skipped += 1;
                continue;
            }
        };

        phases.push(PhaseBlueprint {
            name: phase_name.to_string(),
            discipline: discipline.to_string(),
            owner_role: role.to_string(),
            duration,
        });
    }

    if phases.is_empty() {
        return Err(CsvError::Empty { skipped });
    }

    Ok((Template::new(name, phases), skipped))
}

/// Import a template from a CSV file; the template is named after the file stem.
pub fn import_template_csv(path: &Path) -> Result<(Template, usize), CsvError> {
    let content = std::fs::read_to_string(path)?;
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("Imported");
    parse_template(name, &content)
}

/// Load every `*.csv` template in `dir`. Unreadable files are logged and skipped;
/// a missing directory yields no templates.
pub fn load_user_templates(dir: &Path) -> Vec<Template> {
    let Ok(entries) = std::fs::read_dir(dir) else {
        return Vec::new();
    };

    let mut paths: Vec<_> = entries
        .flatten()
        .map(|e| e.path())
        .filter(|p| p.extension().and_then(|e| e.to_str()) == Some("csv"))
        .collect();
    paths.sort();

    let mut templates = Vec::new();
    for path in paths {
        match import_template_csv(&path) {
            Ok((template, skipped)) => {
                if skipped > 0 {
                    tracing::warn!(path = %path.display(), skipped, "template rows skipped");
                }
                templates.push(template);
            }
            Err(e) => {
                tracing::warn!(path = %path.display(), error = %e, "failed to load template");
            }
        }
    }
    templates
}
