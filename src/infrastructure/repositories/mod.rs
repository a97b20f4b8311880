// Repository implementations (data access layer)
// Adapters that implement domain repository interfaces

pub mod postgres_content_repository;
pub mod postgres_submission_repository;
pub mod postgres_team_repository;
pub mod postgres_user_repository;

pub use postgres_content_repository::PostgresContentRepository;
pub use postgres_submission_repository::PostgresSubmissionRepository;
pub use postgres_team_repository::PostgresTeamRepository;
pub use postgres_user_repository::PostgresUserRepository;
