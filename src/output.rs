//! Output formatting and persistence for report tables.
//!
//! Supports pretty-printing, JSON serialization, enriched CSV export and
//! report card files.

use anyhow::{Context, Result, bail};
use chrono::NaiveDate;
use csv::WriterBuilder;
use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::config::ReportConfig;
use crate::render::{combined_report, report_card};
use crate::report::ReportTable;
use crate::report::utility::slug;

/// Which report cards [`write_cards`] produces.
#[derive(Debug, Clone, PartialEq)]
pub enum CardSelection {
    /// One file per student.
    All,
    /// Only the named student's card.
    Student(String),
    /// A single `combined.txt` with every card and the class summary.
    Combined,
}

/// Logs the report table using Rust's debug pretty-print format.
pub fn print_pretty(table: &ReportTable) {
    debug!("{:#?}", table);
}

/// Logs the report table as pretty-printed JSON.
pub fn print_json(table: &ReportTable) -> Result<()> {
    info!("{}", serde_json::to_string_pretty(table)?);
    Ok(())
}

/// Writes the enriched table as CSV: name, one column per subject, average, grade.
///
/// Overwrites `path` if it exists.
pub fn write_table_csv(path: &Path, table: &ReportTable) -> Result<()> {
    debug!(path = %path.display(), students = table.students().len(), "Writing CSV table");

    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("creating {}", path.display()))?;

    let mut header = vec!["name".to_string()];
    header.extend(table.subjects().iter().cloned());
    header.push("average".to_string());
    header.push("grade".to_string());
    writer.write_record(&header)?;

    for student in table.students() {
        let mut row = vec![student.name.clone()];
        for subject in table.subjects() {
            row.push(student.score(subject).map(|s| s.to_string()).unwrap_or_default());
        }
        row.push(format!("{:.2}", student.average));
        row.push(student.grade.label().to_string());
        writer.write_record(&row)?;
    }

    writer.flush()?;
    Ok(())
}

/// Writes report card text files into `dir`, creating it if needed.
///
/// Returns the paths written. Asking for a student not in the table is an error.
#[tracing::instrument(skip(dir, config, table), fields(dir = %dir.display()))]
pub fn write_cards(
    dir: &Path,
    config: &ReportConfig,
    table: &ReportTable,
    selection: &CardSelection,
    issued: NaiveDate,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(dir).with_context(|| format!("creating {}", dir.display()))?;

    let mut written = Vec::new();
    match selection {
        CardSelection::Combined => {
            let path = dir.join("combined.txt");
            fs::write(&path, combined_report(config, table, issued))?;
            written.push(path);
        }
        CardSelection::Student(name) => {
            let Some(student) = table.student(name) else {
                bail!("no student named '{}' in the report", name);
            };
            let path = dir.join(format!("{}.txt", slug(&student.name)));
            fs::write(&path, report_card(config, table.subjects(), student, issued))?;
            written.push(path);
        }
        CardSelection::All => {
            let mut used = HashSet::new();
            for student in table.students() {
                let base = slug(&student.name);
                let mut name = base.clone();
                let mut n = 2;
                while !used.insert(name.clone()) {
                    name = format!("{}-{}", base, n);
                    n += 1;
                }
                let path = dir.join(format!("{}.txt", name));
                fs::write(&path, report_card(config, table.subjects(), student, issued))?;
                written.push(path);
            }
        }
    }

    info!(files = written.len(), "Report cards written");
    Ok(written)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::report::{StudentRecord, build};
    use std::env;

    fn temp_path(name: &str) -> PathBuf {
        env::temp_dir().join(name)
    }

    fn table() -> ReportTable {
        build(&[
            StudentRecord::new("Alice Smith")
                .with_score("Math", 80.0)
                .with_score("English", 90.0),
            StudentRecord::new("Bob")
                .with_score("Math", 45.0)
                .with_score("English", 50.0),
        ])
        .unwrap()
    }

    fn issued() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).unwrap()
    }

    #[test]
    fn test_print_pretty_does_not_panic() {
        print_pretty(&table());
    }

    #[test]
    fn test_print_json_does_not_panic() {
        print_json(&table()).unwrap();
    }

    #[test]
    fn test_write_table_csv() {
        let path = temp_path("report_card_test_table.csv");
        let _ = fs::remove_file(&path);

        write_table_csv(&path, &table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "name,Math,English,average,grade");
        assert_eq!(lines[1], "Alice Smith,80,90,85.00,A");
        assert_eq!(lines[2], "Bob,45,50,47.50,F");

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_table_csv_overwrites() {
        let path = temp_path("report_card_test_overwrite.csv");
        let _ = fs::remove_file(&path);

        write_table_csv(&path, &table()).unwrap();
        write_table_csv(&path, &table()).unwrap();

        let content = fs::read_to_string(&path).unwrap();
        let header_count = content.lines().filter(|l| l.starts_with("name,")).count();
        assert_eq!(header_count, 1);

        fs::remove_file(&path).unwrap();
    }

    #[test]
    fn test_write_cards_all() {
        let dir = temp_path("report_card_test_cards_all");
        let _ = fs::remove_dir_all(&dir);

        let written = write_cards(
            &dir,
            &ReportConfig::default(),
            &table(),
            &CardSelection::All,
            issued(),
        )
        .unwrap();

        assert_eq!(written, vec![dir.join("alice-smith.txt"), dir.join("bob.txt")]);
        let bob = fs::read_to_string(dir.join("bob.txt")).unwrap();
        assert!(bob.contains("Student: Bob"));
        assert!(bob.contains("Remark: Did not meet the required standard."));

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_cards_colliding_names() {
        let dir = temp_path("report_card_test_cards_collide");
        let _ = fs::remove_dir_all(&dir);
        let table = build(&[
            StudentRecord::new("Ann B").with_score("Math", 70.0),
            StudentRecord::new("Ann-B").with_score("Math", 60.0),
        ])
        .unwrap();

        let written = write_cards(
            &dir,
            &ReportConfig::default(),
            &table,
            &CardSelection::All,
            issued(),
        )
        .unwrap();

        assert_eq!(written, vec![dir.join("ann-b.txt"), dir.join("ann-b-2.txt")]);

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_cards_single_and_unknown() {
        let dir = temp_path("report_card_test_cards_single");
        let _ = fs::remove_dir_all(&dir);
        let config = ReportConfig::default();

        let written = write_cards(
            &dir,
            &config,
            &table(),
            &CardSelection::Student("Bob".into()),
            issued(),
        )
        .unwrap();
        assert_eq!(written, vec![dir.join("bob.txt")]);

        let missing = write_cards(
            &dir,
            &config,
            &table(),
            &CardSelection::Student("Zoe".into()),
            issued(),
        );
        assert!(missing.is_err());

        fs::remove_dir_all(&dir).unwrap();
    }

    #[test]
    fn test_write_cards_combined() {
        let dir = temp_path("report_card_test_cards_combined");
        let _ = fs::remove_dir_all(&dir);

        let written = write_cards(
            &dir,
            &ReportConfig::default(),
            &table(),
            &CardSelection::Combined,
            issued(),
        )
        .unwrap();

        assert_eq!(written, vec![dir.join("combined.txt")]);
        let text = fs::read_to_string(&written[0]).unwrap();
        assert!(text.contains("Student: Alice Smith"));
        assert!(text.contains("Class summary"));

        fs::remove_dir_all(&dir).unwrap();
    }
}
