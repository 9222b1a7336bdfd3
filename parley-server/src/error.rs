use crate::connection::ConnectionState;
use parley_core::{PeerId, RoomId};
use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum DeliveryFailureReason {
    /// The recipient's send queue is full.
    #[error("send queue full")]
    QueueFull,
    /// The recipient's transport has gone away.
    #[error("connection closed")]
    Closed,
}

/// Errors raised by the relay.
///
/// A leave for a peer that is not a member is not an error at all; the
/// registry reports it as `None`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RelayError {
    #[error("peer {peer_id} is already joined to room {room_id}")]
    AlreadyJoined { peer_id: PeerId, room_id: RoomId },

    #[error("peer {peer_id} cannot join from state {state:?}")]
    NotJoinable {
        peer_id: PeerId,
        state: ConnectionState,
    },

    #[error("malformed message from peer {peer_id}: {reason}")]
    MalformedMessage { peer_id: PeerId, reason: String },

    #[error("delivery to peer {peer_id} failed: {reason}")]
    DeliveryFailure {
        peer_id: PeerId,
        reason: DeliveryFailureReason,
    },

    #[error("relay engine is not running")]
    EngineClosed,
}
