use std::collections::HashSet;

use tracing::debug;

use crate::report::error::InvalidInput;
use crate::report::grade::{Grade, classify};
use crate::report::types::{
    ClassSummary, GradeDistribution, Heatmap, ReportTable, StudentRecord, StudentReport,
    SubjectAggregate,
};
use crate::report::utility::mean;

const MIN_SCORE: f64 = 0.0;
const MAX_SCORE: f64 = 100.0;

/// Derives averages, grades and subject means from a set of student records.
///
/// Every record must carry the same, non-empty subject set with finite marks
/// in 0..=100, and names must be unique. An empty slice yields an empty table.
#[tracing::instrument(skip(records), fields(students = records.len()))]
pub fn build(records: &[StudentRecord]) -> Result<ReportTable, InvalidInput> {
    let Some(first) = records.first() else {
        return Ok(ReportTable::default());
    };

    let subjects: Vec<String> = first.scores.iter().map(|(s, _)| s.clone()).collect();
    let expected: HashSet<&str> = subjects.iter().map(String::as_str).collect();

    let mut names = HashSet::new();
    let mut students = Vec::with_capacity(records.len());

    for record in records {
        validate_record(record)?;

        if !names.insert(record.name.as_str()) {
            return Err(InvalidInput::DuplicateStudent {
                student: record.name.clone(),
            });
        }

        let found: HashSet<&str> = record.scores.iter().map(|(s, _)| s.as_str()).collect();
        if found != expected {
            return Err(InvalidInput::SubjectMismatch {
                student: record.name.clone(),
                expected: subjects.clone(),
                found: record.scores.iter().map(|(s, _)| s.clone()).collect(),
            });
        }

        // Rows follow the table's subject order.
        let scores: Vec<(String, f64)> = subjects
            .iter()
            .filter_map(|subject| record.score(subject).map(|v| (subject.clone(), v)))
            .collect();

        let marks: Vec<f64> = scores.iter().map(|(_, v)| *v).collect();
        let average = mean(&marks);
        let grade = classify(average);
        debug!(student = %record.name, average, %grade, "Student graded");

        students.push(StudentReport {
            name: record.name.clone(),
            scores,
            average,
            grade,
        });
    }

    let subject_aggregates = subject_means(&subjects, &students);

    Ok(ReportTable {
        subjects,
        students,
        subject_aggregates,
    })
}

fn validate_record(record: &StudentRecord) -> Result<(), InvalidInput> {
    if record.scores.is_empty() {
        return Err(InvalidInput::NoSubjects {
            student: record.name.clone(),
        });
    }

    let mut seen = HashSet::new();
    for (subject, score) in &record.scores {
        if !seen.insert(subject.as_str()) {
            return Err(InvalidInput::DuplicateSubject {
                student: record.name.clone(),
                subject: subject.clone(),
            });
        }
        if !score.is_finite() {
            return Err(InvalidInput::NonNumericScore {
                student: record.name.clone(),
                subject: subject.clone(),
                value: score.to_string(),
            });
        }
        if !(MIN_SCORE..=MAX_SCORE).contains(score) {
            return Err(InvalidInput::ScoreOutOfRange {
                student: record.name.clone(),
                subject: subject.clone(),
                score: *score,
            });
        }
    }

    Ok(())
}

/// Mean per subject, highest first. Ties keep subject order.
fn subject_means(subjects: &[String], students: &[StudentReport]) -> Vec<SubjectAggregate> {
    let mut aggregates: Vec<SubjectAggregate> = subjects
        .iter()
        .map(|subject| {
            let column: Vec<f64> = students
                .iter()
                .filter_map(|s| s.score(subject))
                .collect();
            SubjectAggregate {
                subject: subject.clone(),
                mean: mean(&column),
            }
        })
        .collect();

    aggregates.sort_by(|a, b| b.mean.total_cmp(&a.mean));
    aggregates
}

impl ReportTable {
    pub fn subjects(&self) -> &[String] {
        &self.subjects
    }

    pub fn students(&self) -> &[StudentReport] {
        &self.students
    }

    pub fn subject_aggregates(&self) -> &[SubjectAggregate] {
        &self.subject_aggregates
    }

    pub fn is_empty(&self) -> bool {
        self.students.is_empty()
    }

    pub fn student(&self, name: &str) -> Option<&StudentReport> {
        self.students.iter().find(|s| s.name == name)
    }

    /// Class average, best student and grade counts.
    pub fn summary(&self) -> ClassSummary {
        let averages: Vec<f64> = self.students.iter().map(|s| s.average).collect();
        let class_average = (!averages.is_empty()).then(|| mean(&averages));

        let mut top: Option<&StudentReport> = None;
        for s in &self.students {
            if top.is_none_or(|t| s.average > t.average) {
                top = Some(s);
            }
        }

        let counts = Grade::ALL
            .iter()
            .map(|g| (*g, self.students.iter().filter(|s| s.grade == *g).count()))
            .collect();

        ClassSummary {
            student_count: self.students.len(),
            subject_count: self.subjects.len(),
            class_average,
            top_student: top.map(|t| t.name.clone()),
            distribution: GradeDistribution { counts },
        }
    }

    /// Score grid with students as rows and subjects in table order as columns.
    pub fn heatmap(&self) -> Heatmap {
        Heatmap {
            rows: self.students.iter().map(|s| s.name.clone()).collect(),
            columns: self.subjects.clone(),
            cells: self
                .students
                .iter()
                .map(|s| {
                    self.subjects
                        .iter()
                        .map(|subject| s.score(subject).unwrap_or(0.0))
                        .collect()
                })
                .collect(),
        }
    }
}
