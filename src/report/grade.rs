use serde::Serialize;
use std::fmt;

/// Letter grade assigned to a student average.
///
/// Variants are declared worst to best so the derived ordering follows tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub enum Grade {
    #[serde(rename = "F")]
    F,
    #[serde(rename = "D")]
    D,
    #[serde(rename = "C")]
    C,
    #[serde(rename = "B")]
    B,
    #[serde(rename = "A")]
    A,
    #[serde(rename = "A+")]
    APlus,
}

impl Grade {
    /// All grades, best first.
    pub const ALL: [Grade; 6] = [
        Grade::APlus,
        Grade::A,
        Grade::B,
        Grade::C,
        Grade::D,
        Grade::F,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Grade::APlus => "A+",
            Grade::A => "A",
            Grade::B => "B",
            Grade::C => "C",
            Grade::D => "D",
            Grade::F => "F",
        }
    }

    /// Lowest average that earns this grade. `F` has no floor.
    pub fn lower_bound(self) -> Option<f64> {
        match self {
            Grade::APlus => Some(90.0),
            Grade::A => Some(80.0),
            Grade::B => Some(70.0),
            Grade::C => Some(60.0),
            Grade::D => Some(50.0),
            Grade::F => None,
        }
    }
}

impl fmt::Display for Grade {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Converts an average mark into a letter grade.
///
/// | Range       | Grade |
/// |-------------|-------|
/// | >= 90       | A+    |
/// | >= 80       | A     |
/// | >= 70       | B     |
/// | >= 60       | C     |
/// | >= 50       | D     |
/// | < 50        | F     |
///
/// Defined for every `f64`; NaN lands in `F`.
pub fn classify(average: f64) -> Grade {
    match average {
        a if a >= 90.0 => Grade::APlus,
        a if a >= 80.0 => Grade::A,
        a if a >= 70.0 => Grade::B,
        a if a >= 60.0 => Grade::C,
        a if a >= 50.0 => Grade::D,
        _ => Grade::F,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_classify_boundaries() {
        assert_eq!(classify(100.0), Grade::APlus);
        assert_eq!(classify(90.0), Grade::APlus);
        assert_eq!(classify(89.999), Grade::A);
        assert_eq!(classify(80.0), Grade::A);
        assert_eq!(classify(79.99), Grade::B);
        assert_eq!(classify(70.0), Grade::B);
        assert_eq!(classify(69.99), Grade::C);
        assert_eq!(classify(60.0), Grade::C);
        assert_eq!(classify(59.99), Grade::D);
        assert_eq!(classify(50.0), Grade::D);
        assert_eq!(classify(49.999), Grade::F);
        assert_eq!(classify(0.0), Grade::F);
    }

    #[test]
    fn test_classify_outside_mark_range() {
        assert_eq!(classify(250.0), Grade::APlus);
        assert_eq!(classify(-10.0), Grade::F);
        assert_eq!(classify(f64::INFINITY), Grade::APlus);
        assert_eq!(classify(f64::NEG_INFINITY), Grade::F);
        assert_eq!(classify(f64::NAN), Grade::F);
    }

    #[test]
    fn test_classify_is_monotonic() {
        let mut previous = classify(-5.0);
        let mut a = -5.0;
        while a <= 105.0 {
            let current = classify(a);
            assert!(current >= previous, "grade dropped at {a}");
            previous = current;
            a += 0.25;
        }
    }

    #[test]
    fn test_labels_and_display() {
        assert_eq!(Grade::APlus.to_string(), "A+");
        assert_eq!(Grade::F.label(), "F");
        assert_eq!(serde_json::to_string(&Grade::APlus).unwrap(), "\"A+\"");
    }

    #[test]
    fn test_lower_bounds_match_classify() {
        for grade in Grade::ALL {
            if let Some(bound) = grade.lower_bound() {
                assert_eq!(classify(bound), grade);
                assert!(classify(bound - 0.001) < grade);
            }
        }
        assert_eq!(Grade::F.lower_bound(), None);
    }

    #[test]
    fn test_all_is_best_first() {
        assert!(Grade::ALL.windows(2).all(|w| w[0] > w[1]));
    }
}
