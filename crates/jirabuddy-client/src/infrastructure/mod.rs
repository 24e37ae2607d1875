//! Integrations with the outside world: the HTTP chat backend.

pub mod clients;
