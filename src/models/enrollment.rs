//! Enrollment and payment models, including the review state machine

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Enrollment database model: binds a competitor, tutor, competition, and
/// resolved modality with a review status
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Enrollment {
    pub id: Uuid,
    pub competitor_id: Uuid,
    pub tutor_id: Uuid,
    pub competition_id: Uuid,
    pub modality_id: Uuid,
    pub status: String,
    pub rejection_reason: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Enrollment {
    pub fn status(&self) -> Option<EnrollmentStatus> {
        EnrollmentStatus::parse(&self.status)
    }
}

/// Review status of an enrollment
///
/// Transitions: `pending -> {verified, rejected}`, `verified -> accepted`
/// (cashier confirms payment), `rejected -> verified` (re-review, which
/// clears the rejection reason). `accepted` is terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    Pending,
    Verified,
    Accepted,
    Rejected,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Verified => "verified",
            Self::Accepted => "accepted",
            Self::Rejected => "rejected",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "pending" => Some(Self::Pending),
            "verified" => Some(Self::Verified),
            "accepted" => Some(Self::Accepted),
            "rejected" => Some(Self::Rejected),
            _ => None,
        }
    }

    /// Whether a review action may move an enrollment to `target`.
    pub fn can_transition_to(&self, target: EnrollmentStatus) -> bool {
        matches!(
            (self, target),
            (Self::Pending, Self::Verified)
                | (Self::Pending, Self::Rejected)
                | (Self::Verified, Self::Accepted)
                | (Self::Rejected, Self::Verified)
        )
    }
}

impl std::fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Payment attached to an enrollment at submission time
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Payment {
    pub id: Uuid,
    pub enrollment_id: Uuid,
    pub amount: Decimal,
    pub status: String,
    pub created_at: DateTime<Utc>,
}

/// Payment status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Pending,
    Paid,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Paid => "paid",
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pending_transitions() {
        assert!(EnrollmentStatus::Pending.can_transition_to(EnrollmentStatus::Verified));
        assert!(EnrollmentStatus::Pending.can_transition_to(EnrollmentStatus::Rejected));
        assert!(!EnrollmentStatus::Pending.can_transition_to(EnrollmentStatus::Accepted));
    }

    #[test]
    fn test_verified_transitions() {
        assert!(EnrollmentStatus::Verified.can_transition_to(EnrollmentStatus::Accepted));
        assert!(!EnrollmentStatus::Verified.can_transition_to(EnrollmentStatus::Rejected));
        assert!(!EnrollmentStatus::Verified.can_transition_to(EnrollmentStatus::Pending));
    }

    #[test]
    fn test_rejected_allows_re_review() {
        assert!(EnrollmentStatus::Rejected.can_transition_to(EnrollmentStatus::Verified));
        assert!(!EnrollmentStatus::Rejected.can_transition_to(EnrollmentStatus::Accepted));
    }

    #[test]
    fn test_accepted_is_terminal() {
        for target in [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Verified,
            EnrollmentStatus::Rejected,
        ] {
            assert!(!EnrollmentStatus::Accepted.can_transition_to(target));
        }
    }

    #[test]
    fn test_status_wire_format_is_lowercase() {
        // The same strings back the database CHECK constraints.
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Pending).unwrap(),
            "\"pending\""
        );
        assert_eq!(
            serde_json::from_str::<EnrollmentStatus>("\"rejected\"").unwrap(),
            EnrollmentStatus::Rejected
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Paid).unwrap(),
            "\"paid\""
        );
    }

    #[test]
    fn test_status_round_trip() {
        for status in [
            EnrollmentStatus::Pending,
            EnrollmentStatus::Verified,
            EnrollmentStatus::Accepted,
            EnrollmentStatus::Rejected,
        ] {
            assert_eq!(EnrollmentStatus::parse(status.as_str()), Some(status));
        }
        assert_eq!(EnrollmentStatus::parse("unknown"), None);
    }
}
