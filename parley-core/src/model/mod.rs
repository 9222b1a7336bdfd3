mod notification;
mod peer;
mod room;

pub use notification::Notification;
pub use peer::{ParsePeerIdError, PeerId};
pub use room::RoomId;
