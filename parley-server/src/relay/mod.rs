mod relay_command;
mod relay_engine;
mod relay_handle;

pub use relay_command::*;
pub use relay_engine::*;
pub use relay_handle::*;
