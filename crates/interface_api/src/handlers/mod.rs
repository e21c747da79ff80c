//! Request handlers

pub mod admin;
pub mod claims;
pub mod contacts;
pub mod health;
