mod connection;
mod connection_state;

pub use connection::*;
pub use connection_state::*;
