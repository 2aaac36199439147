//! Level descriptor parsing
//!
//! Enrollment submissions declare a competitor's level as free text. Two
//! shapes exist in the data: regular numeric grades ("3ro Primaria",
//! "1ro. de Secundaria", or the compact seed form "3P"/"3S") and named
//! special levels ("Robótica Nivel 1") that the catalog maps to a grade
//! range rather than a single grade.

use std::sync::LazyLock;

use regex::Regex;

use super::catalog::Cycle;

/// Long form: number, optional Spanish ordinal suffix, cycle word.
static REGULAR_LONG: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^\s*(\d+)\s*(?:ro|do|to|mo|vo|no)?\.?\s*(?:de\s+)?(primaria|secundaria)\s*$")
        .expect("regular level pattern")
});

/// Compact form used by the legacy catalog: "3P", "6S".
static REGULAR_COMPACT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\s*(\d+)\s*([PSps])\s*$").expect("compact level pattern"));

/// Parsed level descriptor from an enrollment submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LevelDescriptor {
    /// A regular numeric grade within a cycle
    Regular { number: i32, cycle: Cycle },
    /// Anything else: matched against the area's special levels
    Special(String),
}

impl LevelDescriptor {
    /// Classify a raw descriptor. Returns `None` for blank input. A string
    /// that looks numeric but carries no positive grade number is treated
    /// as a special label, which later fails resolution with a descriptive
    /// error instead of silently matching grade zero.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }

        if let Some(caps) = REGULAR_LONG.captures(trimmed) {
            if let Ok(number) = caps[1].parse::<i32>() {
                if number > 0 {
                    let cycle = if caps[2].eq_ignore_ascii_case("primaria") {
                        Cycle::Primary
                    } else {
                        Cycle::Secondary
                    };
                    return Some(Self::Regular { number, cycle });
                }
            }
        }

        if let Some(caps) = REGULAR_COMPACT.captures(trimmed) {
            if let Ok(number) = caps[1].parse::<i32>() {
                if number > 0 {
                    let cycle = if caps[2].eq_ignore_ascii_case("P") {
                        Cycle::Primary
                    } else {
                        Cycle::Secondary
                    };
                    return Some(Self::Regular { number, cycle });
                }
            }
        }

        Some(Self::Special(trimmed.to_string()))
    }
}

impl std::fmt::Display for LevelDescriptor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Regular { number, cycle } => write!(f, "{} {}", number, cycle),
            Self::Special(label) => f.write_str(label),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_regular_long_form() {
        assert_eq!(
            LevelDescriptor::parse("3ro Primaria"),
            Some(LevelDescriptor::Regular {
                number: 3,
                cycle: Cycle::Primary
            })
        );
        assert_eq!(
            LevelDescriptor::parse("1RO. de Secundaria"),
            Some(LevelDescriptor::Regular {
                number: 1,
                cycle: Cycle::Secondary
            })
        );
        assert_eq!(
            LevelDescriptor::parse("6to primaria"),
            Some(LevelDescriptor::Regular {
                number: 6,
                cycle: Cycle::Primary
            })
        );
    }

    #[test]
    fn test_parse_regular_compact_form() {
        assert_eq!(
            LevelDescriptor::parse("3P"),
            Some(LevelDescriptor::Regular {
                number: 3,
                cycle: Cycle::Primary
            })
        );
        assert_eq!(
            LevelDescriptor::parse("6s"),
            Some(LevelDescriptor::Regular {
                number: 6,
                cycle: Cycle::Secondary
            })
        );
    }

    #[test]
    fn test_parse_special_label() {
        assert_eq!(
            LevelDescriptor::parse("Robótica Nivel 1"),
            Some(LevelDescriptor::Special("Robótica Nivel 1".to_string()))
        );
        // A bare number without a cycle is not a regular grade
        assert_eq!(
            LevelDescriptor::parse("42"),
            Some(LevelDescriptor::Special("42".to_string()))
        );
    }

    #[test]
    fn test_parse_rejects_blank() {
        assert_eq!(LevelDescriptor::parse(""), None);
        assert_eq!(LevelDescriptor::parse("   "), None);
    }

    #[test]
    fn test_zero_grade_falls_back_to_special() {
        assert_eq!(
            LevelDescriptor::parse("0ro Primaria"),
            Some(LevelDescriptor::Special("0ro Primaria".to_string()))
        );
    }

    #[test]
    fn test_whitespace_is_trimmed() {
        assert_eq!(
            LevelDescriptor::parse("  3ro Secundaria  "),
            Some(LevelDescriptor::Regular {
                number: 3,
                cycle: Cycle::Secondary
            })
        );
    }
}
