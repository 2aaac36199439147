//! Business logic services

pub mod competition_service;
pub mod enrollment_service;
pub mod modality_service;
pub mod registration_service;

pub use competition_service::CompetitionService;
pub use enrollment_service::EnrollmentService;
pub use modality_service::ModalityService;
pub use registration_service::RegistrationService;
