//! Person and role-specialization models
//!
//! A Person is the shared identity record; competitors, tutors, cashiers,
//! and administrators all hang off it through a one-to-one User account
//! and role associations.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// Identity record shared by all roles
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Person {
    pub id: Uuid,
    pub first_name: String,
    pub last_name: String,
    pub second_last_name: Option<String>,
    pub carnet: String,
    pub email: String,
    pub phone: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// One account per person. The password hash is written by external auth
/// tooling; this backend only creates the row.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub person_id: Uuid,
    #[serde(skip_serializing)]
    pub password_hash: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// Role catalog row, resolved by name at call time
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Role {
    pub id: Uuid,
    pub name: String,
}

/// Tutor specialization: one per person
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Tutor {
    pub id: Uuid,
    pub person_id: Uuid,
    pub institution: String,
    pub municipality_id: Uuid,
    pub area_id: Option<Uuid>,
}

/// Competitor specialization: one per person
///
/// `level_code` is the label of the last-resolved level for the person;
/// the authoritative level of any enrollment is its modality.
#[derive(Debug, Clone, FromRow, Serialize, Deserialize)]
pub struct Competitor {
    pub id: Uuid,
    pub person_id: Uuid,
    pub birth_date: NaiveDate,
    pub municipality_id: Uuid,
    pub school: String,
    pub declared_grade: String,
    pub level_code: String,
}
