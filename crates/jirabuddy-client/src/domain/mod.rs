//! Core session logic, independent of any terminal or network concerns.

pub mod models;
pub mod services;
