// Repository interfaces (ports)
// Implemented by the infrastructure layer

pub mod content_repository;
pub mod submission_repository;
pub mod team_repository;
pub mod user_repository;

pub use content_repository::ContentRepository;
pub use submission_repository::SubmissionRepository;
pub use team_repository::TeamRepository;
pub use user_repository::UserRepository;
