mod chat_transport;
mod event;
mod message;
mod role;
mod status;

pub use chat_transport::*;
pub use event::*;
pub use message::*;
pub use role::*;
pub use status::*;
