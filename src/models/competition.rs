//! Competition, stage, and modality models

use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Competition database model
///
/// `start_date`/`end_date` bound the whole event; the registration window
/// is a separate pair of times. `management_year` scopes the active
/// competition for a registration season.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Competition {
    pub id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub registration_opens: NaiveTime,
    pub registration_closes: NaiveTime,
    pub cost: Decimal,
    pub management_year: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Competition {
    /// Date-range overlap test against another competition's range.
    /// Ranges collide when `start <= other_end && end >= other_start`.
    pub fn overlaps(&self, other_start: NaiveDate, other_end: NaiveDate) -> bool {
        self.start_date <= other_end && self.end_date >= other_start
    }
}

/// Dated phase of a competition's timeline (registration, validation,
/// payment, competition day)
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Stage {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub name: String,
    pub start_date: NaiveDate,
    pub start_time: NaiveTime,
    pub end_date: NaiveDate,
    pub end_time: NaiveTime,
    pub position: i32,
    pub status: String,
}

impl Stage {
    pub fn starts_at(&self) -> NaiveDateTime {
        self.start_date.and_time(self.start_time)
    }

    pub fn ends_at(&self) -> NaiveDateTime {
        self.end_date.and_time(self.end_time)
    }

    /// Date fields become immutable once the stage has started.
    pub fn has_started(&self, today: NaiveDate) -> bool {
        self.start_date <= today
    }
}

/// Resolved eligibility unit: one competition, one area, and exactly one
/// of a regular grade or a special level
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Modality {
    pub id: Uuid,
    pub competition_id: Uuid,
    pub area_id: Uuid,
    pub grade_id: Option<Uuid>,
    pub special_level_id: Option<Uuid>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn competition(start: NaiveDate, end: NaiveDate) -> Competition {
        Competition {
            id: Uuid::new_v4(),
            name: "Competencia 2025".to_string(),
            start_date: start,
            end_date: end,
            registration_opens: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            registration_closes: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            cost: Decimal::new(1600, 2),
            management_year: 2025,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_overlapping_ranges() {
        let existing = competition(date(2025, 6, 5), date(2025, 6, 20));
        assert!(existing.overlaps(date(2025, 6, 1), date(2025, 6, 10)));
        assert!(existing.overlaps(date(2025, 6, 20), date(2025, 6, 25)));
        assert!(existing.overlaps(date(2025, 6, 10), date(2025, 6, 12)));
    }

    #[test]
    fn test_disjoint_ranges() {
        let existing = competition(date(2025, 6, 5), date(2025, 6, 20));
        assert!(!existing.overlaps(date(2025, 5, 1), date(2025, 6, 4)));
        assert!(!existing.overlaps(date(2025, 6, 21), date(2025, 7, 1)));
    }

    #[test]
    fn test_stage_started_gate() {
        let stage = Stage {
            id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            name: "Inscripción".to_string(),
            start_date: date(2025, 4, 15),
            start_time: NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
            end_date: date(2025, 4, 30),
            end_time: NaiveTime::from_hms_opt(18, 0, 0).unwrap(),
            position: 1,
            status: "active".to_string(),
        };
        assert!(stage.has_started(date(2025, 4, 15)));
        assert!(stage.has_started(date(2025, 5, 1)));
        assert!(!stage.has_started(date(2025, 4, 14)));
    }

    #[test]
    fn test_stage_window_combines_date_and_time() {
        let stage = Stage {
            id: Uuid::new_v4(),
            competition_id: Uuid::new_v4(),
            name: "Final".to_string(),
            start_date: date(2025, 4, 15),
            start_time: NaiveTime::from_hms_opt(8, 30, 0).unwrap(),
            end_date: date(2025, 4, 15),
            end_time: NaiveTime::from_hms_opt(12, 0, 0).unwrap(),
            position: 2,
            status: "active".to_string(),
        };
        assert!(stage.starts_at() < stage.ends_at());
        assert_eq!(
            stage.starts_at(),
            date(2025, 4, 15).and_hms_opt(8, 30, 0).unwrap()
        );
    }
}
