mod config;
mod connection;
mod error;
mod relay;
mod room;
mod signaling;

pub use config::*;
pub use connection::*;
pub use error::*;
pub use relay::*;
pub use room::*;
pub use signaling::*;
