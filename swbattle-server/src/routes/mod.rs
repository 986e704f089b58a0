//! API route handlers

pub mod battle;
pub mod graphql;
pub mod status;
