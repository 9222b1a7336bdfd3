use crate::connection::Connection;
use crate::error::RelayError;
use parley_core::{PeerId, RoomId};
use tokio::sync::oneshot;

/// Requests sent from connection tasks to the relay engine.
#[derive(Debug)]
pub enum RelayCommand {
    /// The transport accepted a client for `room_id` and hands over its connection.
    Connect {
        room_id: RoomId,
        connection: Connection,
        reply: oneshot::Sender<Result<(), RelayError>>,
    },

    /// Raw text received from a client.
    Route { peer_id: PeerId, payload: String },

    /// The client's transport closed or failed.
    Disconnect { peer_id: PeerId },
}
