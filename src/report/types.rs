//! Data types flowing through report building and rendering.

use serde::Serialize;

use crate::report::grade::Grade;

/// One student's marks as supplied by the input source.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentRecord {
    pub name: String,
    /// Subject name to mark, in input order.
    pub scores: Vec<(String, f64)>,
}

impl StudentRecord {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            scores: Vec::new(),
        }
    }

    /// Adds a subject mark, builder style.
    pub fn with_score(mut self, subject: impl Into<String>, score: f64) -> Self {
        self.scores.push((subject.into(), score));
        self
    }

    pub fn score(&self, subject: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(s, _)| s == subject)
            .map(|(_, v)| *v)
    }
}

/// A student row enriched with its derived average and grade.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StudentReport {
    pub name: String,
    pub scores: Vec<(String, f64)>,
    pub average: f64,
    pub grade: Grade,
}

impl StudentReport {
    pub fn score(&self, subject: &str) -> Option<f64> {
        self.scores
            .iter()
            .find(|(s, _)| s == subject)
            .map(|(_, v)| *v)
    }
}

/// Mean mark of one subject across every student.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SubjectAggregate {
    pub subject: String,
    pub mean: f64,
}

/// Output of [`crate::report::builder::build`].
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct ReportTable {
    /// Subjects in the order of the first record.
    pub(crate) subjects: Vec<String>,
    pub(crate) students: Vec<StudentReport>,
    /// Sorted by mean, highest first.
    pub(crate) subject_aggregates: Vec<SubjectAggregate>,
}

/// Students per grade, best grade first. Zero counts are kept.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GradeDistribution {
    pub counts: Vec<(Grade, usize)>,
}

impl GradeDistribution {
    pub fn count(&self, grade: Grade) -> usize {
        self.counts
            .iter()
            .find(|(g, _)| *g == grade)
            .map(|(_, c)| *c)
            .unwrap_or(0)
    }
}

/// Class-wide figures shown under the combined report.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClassSummary {
    pub student_count: usize,
    pub subject_count: usize,
    pub class_average: Option<f64>,
    pub top_student: Option<String>,
    pub distribution: GradeDistribution,
}

/// Students by subjects score grid.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Heatmap {
    pub rows: Vec<String>,
    pub columns: Vec<String>,
    pub cells: Vec<Vec<f64>>,
}
