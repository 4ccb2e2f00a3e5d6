//! Plain-text rendering of report tables: report cards, charts and a heatmap.

use chrono::NaiveDate;
use std::fmt::Write;

use crate::config::ReportConfig;
use crate::report::{
    ClassSummary, Grade, GradeDistribution, Heatmap, ReportTable, StudentReport,
    SubjectAggregate, classify,
};

const CARD_WIDTH: usize = 44;
const PAGE_BREAK: char = '=';
const FOOTER: &str = "Generated by Student Marks Analyzer";

/// Remark printed under the grade on a report card.
pub fn grade_remark(grade: Grade) -> &'static str {
    match grade {
        Grade::APlus => "Outstanding performance.",
        Grade::A => "Excellent work.",
        Grade::B => "Good work, keep it up.",
        Grade::C => "Satisfactory, aim higher.",
        Grade::D => "Needs improvement.",
        Grade::F => "Did not meet the required standard.",
    }
}

fn rule(out: &mut String, c: char) {
    out.extend(std::iter::repeat_n(c, CARD_WIDTH));
    out.push('\n');
}

fn line(out: &mut String, label: &str, value: &str) {
    let pad = CARD_WIDTH.saturating_sub(label.chars().count());
    let _ = writeln!(out, "{}{:>pad$}", label, value);
}

/// Renders a single student's report card.
///
/// Subjects are listed in `subjects` order so every card in a class lines up.
pub fn report_card(
    config: &ReportConfig,
    subjects: &[String],
    student: &StudentReport,
    issued: NaiveDate,
) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "{}", config.school_name);
    if let Some(address) = &config.school_address {
        let _ = writeln!(out, "{}", address);
    }
    let _ = writeln!(out, "{}", config.title);
    if let Some(term) = &config.term {
        let _ = writeln!(out, "Term: {}", term);
    }
    let _ = writeln!(out, "Issued: {}", issued.format("%Y-%m-%d"));
    rule(&mut out, '-');
    let _ = writeln!(out, "Student: {}", student.name);
    rule(&mut out, '-');

    for subject in subjects {
        if let Some(score) = student.score(subject) {
            line(&mut out, subject, &format!("{:.1}", score));
        }
    }

    rule(&mut out, '-');
    line(&mut out, "Average", &format!("{:.2}", student.average));
    line(&mut out, "Grade", student.grade.label());
    let _ = writeln!(out, "Remark: {}", grade_remark(student.grade));
    out.push('\n');
    let _ = writeln!(out, "{}", FOOTER);

    out
}

/// Every student's card in table order, then the class summary.
pub fn combined_report(config: &ReportConfig, table: &ReportTable, issued: NaiveDate) -> String {
    let mut out = String::new();

    for student in table.students() {
        out.push_str(&report_card(config, table.subjects(), student, issued));
        rule(&mut out, PAGE_BREAK);
    }

    out.push_str(&class_summary(&table.summary()));
    if !table.is_empty() {
        out.push('\n');
        out.push_str("Student averages\n");
        out.push_str(&student_average_chart(table, 30));
        out.push('\n');
        out.push_str("Subject averages\n");
        out.push_str(&subject_bar_chart(table.subject_aggregates(), 30));
    }

    out
}

/// Class totals, the grade distribution chart and the grade legend.
pub fn class_summary(summary: &ClassSummary) -> String {
    let mut out = String::new();

    let _ = writeln!(out, "Class summary");
    rule(&mut out, '-');
    line(&mut out, "Students", &summary.student_count.to_string());
    line(&mut out, "Subjects", &summary.subject_count.to_string());
    line(
        &mut out,
        "Class average",
        &summary
            .class_average
            .map(|a| format!("{:.1}", a))
            .unwrap_or_else(|| "-".to_string()),
    );
    line(
        &mut out,
        "Top student",
        summary.top_student.as_deref().unwrap_or("-"),
    );
    out.push('\n');
    out.push_str(&grade_distribution_chart(&summary.distribution));
    out.push('\n');
    out.push_str(&grade_legend());

    out
}

/// Mark range of every grade, best first.
pub fn grade_legend() -> String {
    let mut out = String::from("Grade legend\n");
    let mut ceiling: Option<f64> = None;
    for grade in Grade::ALL {
        let range = match (grade.lower_bound(), ceiling) {
            (Some(low), None) => format!("{} and above", low),
            (Some(low), Some(high)) => format!("{} - {}", low, high - 1.0),
            (None, Some(high)) => format!("below {}", high),
            (None, None) => "any mark".to_string(),
        };
        let _ = writeln!(out, "{:<2} | {}", grade.label(), range);
        ceiling = grade.lower_bound();
    }
    out
}

fn bars<'a>(rows: impl Iterator<Item = (&'a str, f64)> + Clone, width: usize) -> String {
    let label_width = rows
        .clone()
        .map(|(label, _)| label.chars().count())
        .max()
        .unwrap_or(0);

    let mut out = String::new();
    for (label, value) in rows {
        let filled = ((value.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
        let _ = writeln!(
            out,
            "{:<label_width$} | {:<width$} {:>5.1}",
            label,
            "#".repeat(filled),
            value,
        );
    }
    out
}

/// Horizontal bar per student average in table order, scaled so 100 fills `width`.
pub fn student_average_chart(table: &ReportTable, width: usize) -> String {
    bars(
        table.students().iter().map(|s| (s.name.as_str(), s.average)),
        width,
    )
}

/// Horizontal bar per subject, scaled so a mean of 100 fills `width`.
pub fn subject_bar_chart(aggregates: &[SubjectAggregate], width: usize) -> String {
    bars(
        aggregates.iter().map(|a| (a.subject.as_str(), a.mean)),
        width,
    )
}

/// One bar per grade, one mark per student.
pub fn grade_distribution_chart(distribution: &GradeDistribution) -> String {
    let mut out = String::new();
    for (grade, count) in &distribution.counts {
        let _ = writeln!(out, "{:<2} | {} {}", grade.label(), "*".repeat(*count), count);
    }
    out
}

fn shade(score: f64) -> char {
    match classify(score) {
        Grade::APlus => '█',
        Grade::A => '▓',
        Grade::B => '▒',
        Grade::C => '░',
        Grade::D => '·',
        Grade::F => ' ',
    }
}

/// Student by subject grid; each cell shows a shade for its grade band and the score.
pub fn heatmap(map: &Heatmap) -> String {
    let name_width = map
        .rows
        .iter()
        .map(|r| r.chars().count())
        .max()
        .unwrap_or(0)
        .max("Student".len());
    let col_widths: Vec<usize> = map
        .columns
        .iter()
        .map(|c| c.chars().count().max(7))
        .collect();

    let mut out = String::new();
    let _ = write!(out, "{:<name_width$}", "Student");
    for (col, &w) in map.columns.iter().zip(&col_widths) {
        let _ = write!(out, " | {:>w$}", col);
    }
    out.push('\n');

    for (name, row) in map.rows.iter().zip(&map.cells) {
        let _ = write!(out, "{:<name_width$}", name);
        for (score, &w) in row.iter().zip(&col_widths) {
            let cell = format!("{} {:>5.1}", shade(*score), score);
            let _ = write!(out, " | {:>w$}", cell);
        }
        out.push('\n');
    }

    out.push_str("Legend: █ 90+  ▓ 80+  ▒ 70+  ░ 60+  · 50+  (blank) below 50\n");
    out
}
