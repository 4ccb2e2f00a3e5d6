//! Input validation failures raised while building a report.

use std::fmt;

/// Reasons a set of student records cannot be turned into a report.
#[derive(Debug, Clone, PartialEq)]
pub enum InvalidInput {
    /// A student has no subject scores, so no average exists.
    NoSubjects { student: String },

    /// A student's subjects differ from the first student's.
    SubjectMismatch {
        student: String,
        expected: Vec<String>,
        found: Vec<String>,
    },

    /// The same subject appears twice for one student.
    DuplicateSubject { student: String, subject: String },

    /// Two records share a name.
    DuplicateStudent { student: String },

    /// A score is not a number.
    NonNumericScore {
        student: String,
        subject: String,
        value: String,
    },

    /// A score lies outside 0..=100.
    ScoreOutOfRange {
        student: String,
        subject: String,
        score: f64,
    },
}

impl fmt::Display for InvalidInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InvalidInput::NoSubjects { student } => {
                write!(f, "student '{}' has no subject scores", student)
            }
            InvalidInput::SubjectMismatch {
                student,
                expected,
                found,
            } => write!(
                f,
                "student '{}' has subjects [{}], expected [{}]",
                student,
                found.join(", "),
                expected.join(", ")
            ),
            InvalidInput::DuplicateSubject { student, subject } => {
                write!(f, "student '{}' lists subject '{}' twice", student, subject)
            }
            InvalidInput::DuplicateStudent { student } => {
                write!(f, "student '{}' appears more than once", student)
            }
            InvalidInput::NonNumericScore {
                student,
                subject,
                value,
            } => write!(
                f,
                "score '{}' for '{}' in {} is not a number",
                value, student, subject
            ),
            InvalidInput::ScoreOutOfRange {
                student,
                subject,
                score,
            } => write!(
                f,
                "score {} for '{}' in {} is outside 0-100",
                score, student, subject
            ),
        }
    }
}

impl std::error::Error for InvalidInput {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = InvalidInput::NoSubjects {
            student: "Bob".into(),
        };
        assert_eq!(err.to_string(), "student 'Bob' has no subject scores");

        let err = InvalidInput::SubjectMismatch {
            student: "Eve".into(),
            expected: vec!["Math".into(), "English".into()],
            found: vec!["Math".into()],
        };
        assert_eq!(
            err.to_string(),
            "student 'Eve' has subjects [Math], expected [Math, English]"
        );
    }

    #[test]
    fn test_converts_into_anyhow() {
        let err: anyhow::Error = InvalidInput::DuplicateStudent {
            student: "Ann".into(),
        }
        .into();
        assert!(err.downcast_ref::<InvalidInput>().is_some());
    }
}
