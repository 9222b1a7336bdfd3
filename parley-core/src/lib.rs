pub mod model;

pub use model::{Notification, PeerId, RoomId};
