//! Toycathon Portal API Library
//!
//! Backend for the Toycathon student innovation contest portal: user
//! registration and login, team creation and invite-link joins, idea
//! submissions, and the admin data operations. The join path is the one
//! operation with a real concurrency invariant (the 4-member team cap) and
//! is enforced by a single serializable database transaction.

pub mod api;
pub mod auth;
pub mod domain;
pub mod infrastructure;
