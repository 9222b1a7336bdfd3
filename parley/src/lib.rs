pub use parley_core::model::{Notification, PeerId, RoomId};

pub mod model {
    pub use parley_core::model::*;
}

#[cfg(feature = "server")]
pub mod server {
    pub use parley_server::*;
}
