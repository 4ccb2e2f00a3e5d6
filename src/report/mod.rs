//! Grade classification and report-data shaping.
//!
//! This module turns raw student marks into a [`ReportTable`]: per-student
//! averages and letter grades, plus per-subject class means for charting.

pub mod builder;
pub mod error;
pub mod grade;
pub mod types;
pub mod utility;

pub use builder::build;
pub use error::InvalidInput;
pub use grade::{Grade, classify};
pub use types::{
    ClassSummary, GradeDistribution, Heatmap, ReportTable, StudentRecord, StudentReport,
    SubjectAggregate,
};
