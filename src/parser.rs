//! Readers for student marks: CSV uploads and manually entered rows.

use anyhow::{Context, Result, bail};
use csv::{ReaderBuilder, Trim};
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

use crate::report::{InvalidInput, StudentRecord};

/// Reads a marks table from CSV.
///
/// The first column holds student names whatever its header says; every
/// other header names a subject. Cells are trimmed.
///
/// # Errors
///
/// Returns an error for malformed CSV, rows with the wrong number of cells,
/// empty names, or a score that is not a number ([`InvalidInput::NonNumericScore`]).
pub fn read_marks_csv<R: Read>(reader: R) -> Result<Vec<StudentRecord>> {
    let mut rdr = ReaderBuilder::new().trim(Trim::All).from_reader(reader);

    let headers = rdr.headers()?.clone();
    if headers.is_empty() {
        bail!("marks CSV has no header row");
    }
    let subjects: Vec<String> = headers.iter().skip(1).map(str::to_string).collect();

    let mut records = Vec::new();
    for (idx, row) in rdr.records().enumerate() {
        let row_number = idx + 2;
        let row = row.with_context(|| format!("reading marks CSV row {}", row_number))?;

        let name = row.get(0).unwrap_or_default();
        if name.is_empty() {
            bail!("row {} has an empty student name", row_number);
        }

        let mut record = StudentRecord::new(name);
        for (subject, cell) in subjects.iter().zip(row.iter().skip(1)) {
            let score = parse_score(name, subject, cell)
                .with_context(|| format!("row {}", row_number))?;
            record.scores.push((subject.clone(), score));
        }
        records.push(record);
    }

    debug!(
        students = records.len(),
        subjects = subjects.len(),
        "Marks CSV parsed"
    );
    Ok(records)
}

/// Opens `path` and reads it with [`read_marks_csv`].
#[tracing::instrument]
pub fn load_marks_csv(path: &Path) -> Result<Vec<StudentRecord>> {
    let file = File::open(path).with_context(|| format!("opening {}", path.display()))?;
    read_marks_csv(file).with_context(|| format!("parsing {}", path.display()))
}

/// Parses one manually entered student, e.g. `Alice: Math=80, English=90`.
pub fn parse_entry(text: &str) -> Result<StudentRecord> {
    let Some((name, marks)) = text.split_once(':') else {
        bail!("entry '{}' is missing ':' after the student name", text);
    };
    let name = name.trim();
    if name.is_empty() {
        bail!("entry '{}' has an empty student name", text);
    }

    let mut record = StudentRecord::new(name);
    for part in marks.split(',') {
        let part = part.trim();
        if part.is_empty() {
            continue;
        }
        let Some((subject, value)) = part.split_once('=') else {
            bail!("'{}' in entry for {} is not Subject=Score", part, name);
        };
        let subject = subject.trim();
        if subject.is_empty() {
            bail!("'{}' in entry for {} has an empty subject", part, name);
        }
        let score = parse_score(name, subject, value.trim())?;
        record.scores.push((subject.to_string(), score));
    }

    Ok(record)
}

fn parse_score(student: &str, subject: &str, cell: &str) -> Result<f64, InvalidInput> {
    cell.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| InvalidInput::NonNumericScore {
            student: student.to_string(),
            subject: subject.to_string(),
            value: cell.to_string(),
        })
}
