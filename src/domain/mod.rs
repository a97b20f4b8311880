// Domain layer module exports
// Following Hexagonal Architecture and DDD principles
// Domain is independent of infrastructure concerns

pub mod content;
pub mod repositories;
pub mod submission;
pub mod team;
pub mod user;
