//! Academic catalog models
//!
//! Areas, grades, special levels, and the geographic lookup tables used
//! by the registration workflow. Catalog rows are created by seed/admin
//! tooling and are read-only during registration.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Competition subject area (e.g. "Matemáticas", "Robótica")
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Area {
    pub id: Uuid,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// Academic cycle for regular numeric grades
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Cycle {
    Primary,
    Secondary,
}

impl Cycle {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "primary" => Some(Self::Primary),
            "secondary" => Some(Self::Secondary),
            _ => None,
        }
    }
}

impl std::fmt::Display for Cycle {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Regular numeric grade, unique per (number, cycle)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Grade {
    pub id: Uuid,
    pub number: i32,
    pub cycle: String,
}

/// Named level that spans a free-text grade range instead of a single
/// numeric grade (robotics brackets, astronomy tracks)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct SpecialLevel {
    pub id: Uuid,
    pub name: String,
    pub grade_range: String,
    pub area_id: Uuid,
}

/// Geographic department
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Department {
    pub id: Uuid,
    pub name: String,
}

/// Municipality, belongs to a department
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Municipality {
    pub id: Uuid,
    pub department_id: Uuid,
    pub name: String,
}
