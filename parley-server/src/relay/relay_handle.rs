use crate::connection::Connection;
use crate::error::RelayError;
use crate::relay::RelayCommand;
use parley_core::{PeerId, RoomId};
use tokio::sync::{mpsc, oneshot};

/// Cloneable front door to a running [`RelayEngine`](crate::RelayEngine).
///
/// Calls made from one task are applied in the order they were made.
#[derive(Clone, Debug)]
pub struct RelayHandle {
    command_tx: mpsc::Sender<RelayCommand>,
}

impl RelayHandle {
    pub(crate) fn new(command_tx: mpsc::Sender<RelayCommand>) -> Self {
        Self { command_tx }
    }

    /// Admit `connection` into `room_id` and wait for the verdict.
    pub async fn connect(&self, room_id: RoomId, connection: Connection) -> Result<(), RelayError> {
        let (reply, verdict) = oneshot::channel();

        self.send(RelayCommand::Connect {
            room_id,
            connection,
            reply,
        })
        .await?;

        verdict.await.map_err(|_| RelayError::EngineClosed)?
    }

    pub async fn route(&self, peer_id: PeerId, payload: impl Into<String>) -> Result<(), RelayError> {
        self.send(RelayCommand::Route {
            peer_id,
            payload: payload.into(),
        })
        .await
    }

    pub async fn disconnect(&self, peer_id: PeerId) -> Result<(), RelayError> {
        self.send(RelayCommand::Disconnect { peer_id }).await
    }

    async fn send(&self, cmd: RelayCommand) -> Result<(), RelayError> {
        self.command_tx
            .send(cmd)
            .await
            .map_err(|_| RelayError::EngineClosed)
    }
}
