//! Session services: the history holder and the controller that drives it.

mod dispatch;
mod session_store;

pub use dispatch::*;
pub use session_store::*;
