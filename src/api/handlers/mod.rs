pub mod admin;
pub mod auth;
pub mod content;
pub mod submissions;
pub mod teams;
pub mod users;
