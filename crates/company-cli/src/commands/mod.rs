//! Command handlers for one-shot CLI operations

pub mod config;
pub mod department;
pub mod employee;
pub mod status;
