//! Configuration handling for the backend address, timeouts and logging.

mod config;

pub use config::*;
