use crate::model::peer::PeerId;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Everything the relay ever sends to a client.
///
/// Serialized as a JSON object tagged by `type`, e.g.
/// `{"type":"peer_joined","peer_id":"..."}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A new member entered the room.
    PeerJoined { peer_id: PeerId },

    /// A member left the room or was evicted.
    PeerLeft { peer_id: PeerId },

    /// Opaque payload from another member, forwarded untouched.
    Signaling { message: Value, peer_id: PeerId },

    /// Problem with the recipient's own input. Never broadcast.
    Error { message: String },
}

impl Notification {
    pub fn error(message: impl Into<String>) -> Self {
        Self::Error {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::PeerJoined { .. } => "peer_joined",
            Self::PeerLeft { .. } => "peer_left",
            Self::Signaling { .. } => "signaling",
            Self::Error { .. } => "error",
        }
    }
}
