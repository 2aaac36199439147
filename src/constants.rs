//! Application-wide constants
//!
//! This module contains all constant values used throughout the application.
//! Constants are grouped by their purpose for better organization.

// =============================================================================
// SERVER DEFAULTS
// =============================================================================

/// Default server host address
pub const DEFAULT_SERVER_HOST: &str = "0.0.0.0";

/// Default server port
pub const DEFAULT_SERVER_PORT: u16 = 8080;

// =============================================================================
// DATABASE DEFAULTS
// =============================================================================

/// Default maximum database connections in the pool
pub const DEFAULT_DATABASE_MAX_CONNECTIONS: u32 = 20;

// =============================================================================
// USER ROLES
// =============================================================================

/// Role names as stored in the role catalog. Role ids are always resolved
/// by name lookup at call time.
pub mod roles {
    pub const ADMINISTRATOR: &str = "administrator";
    pub const CASHIER: &str = "cashier";
    pub const TUTOR: &str = "tutor";
    pub const COMPETITOR: &str = "competitor";

    /// All role names
    pub const ALL: &[&str] = &[ADMINISTRATOR, CASHIER, TUTOR, COMPETITOR];
}

// =============================================================================
// COMPETITION SETTINGS
// =============================================================================

/// Base name prefix for competitions created without an explicit name
pub const DEFAULT_COMPETITION_PREFIX: &str = "Competencia";

/// Default stage status at creation
pub const STAGE_STATUS_ACTIVE: &str = "active";

// =============================================================================
// VALIDATION
// =============================================================================

/// Maximum person name-part length
pub const MAX_NAME_LENGTH: u64 = 100;

/// Maximum school/institution name length
pub const MAX_INSTITUTION_LENGTH: u64 = 200;

/// Maximum level descriptor length
pub const MAX_LEVEL_DESCRIPTOR_LENGTH: u64 = 120;

/// Maximum competition/stage name length
pub const MAX_COMPETITION_NAME_LENGTH: u64 = 200;

/// Maximum rejection reason length
pub const MAX_REJECTION_REASON_LENGTH: u64 = 500;
