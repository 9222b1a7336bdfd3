use crate::config::RelayConfig;
use crate::connection::Connection;
use crate::error::RelayError;
use crate::relay::{RelayCommand, RelayHandle};
use crate::room::RoomRegistry;
use parley_core::{Notification, PeerId, RoomId};
use serde_json::Value;
use std::collections::VecDeque;
use std::sync::Arc;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

/// Sole owner of room membership.
///
/// Every join, leave and broadcast goes through this one task, so all
/// notifications produced for a given connection come out in the order
/// its commands were submitted.
pub struct RelayEngine {
    registry: Arc<RoomRegistry>,
    command_rx: mpsc::Receiver<RelayCommand>,
}

impl RelayEngine {
    pub fn new(registry: Arc<RoomRegistry>, config: &RelayConfig) -> (Self, RelayHandle) {
        let (command_tx, command_rx) = mpsc::channel(config.command_queue_capacity.max(1));
        let engine = Self {
            registry,
            command_rx,
        };
        (engine, RelayHandle::new(command_tx))
    }

    /// Build an engine and run it on the current tokio runtime.
    pub fn spawn(registry: Arc<RoomRegistry>, config: &RelayConfig) -> RelayHandle {
        let (engine, handle) = Self::new(registry, config);
        tokio::spawn(engine.run());
        handle
    }

    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    /// Process commands until every [`RelayHandle`] is dropped.
    pub async fn run(mut self) {
        info!("Relay engine started");

        while let Some(cmd) = self.command_rx.recv().await {
            self.handle_command(cmd);
        }

        info!("Command channel closed. Shutting down relay engine.");
    }

    fn handle_command(&mut self, cmd: RelayCommand) {
        match cmd {
            RelayCommand::Connect {
                room_id,
                connection,
                reply,
            } => {
                let result = self.on_connect(room_id, connection);
                if reply.send(result).is_err() {
                    debug!("Connect caller went away before the reply");
                }
            }
            RelayCommand::Route { peer_id, payload } => self.on_message(peer_id, &payload),
            RelayCommand::Disconnect { peer_id } => self.on_disconnect(peer_id),
        }
    }

    /// Join `connection` to `room_id` and announce it to the other members.
    pub fn on_connect(&self, room_id: RoomId, connection: Connection) -> Result<(), RelayError> {
        let peer_id = connection.id();

        if let Err(e) = self.registry.join(&room_id, connection) {
            warn!("Rejecting connection {}: {}", peer_id, e);
            return Err(e);
        }

        info!(
            "Peer {} joined room {} ({} members)",
            peer_id,
            room_id,
            self.registry.size(&room_id)
        );

        let failed = self.broadcast(&room_id, Some(peer_id), Notification::PeerJoined { peer_id });
        self.evict(failed);
        Ok(())
    }

    /// Remove the peer from its room and tell the rest. Safe to call for
    /// peers that never joined or already left.
    pub fn on_disconnect(&self, peer_id: PeerId) {
        let failed = self.leave(peer_id);
        self.evict(failed);
    }

    /// Relay a client's raw text to the other members of its room.
    pub fn on_message(&self, peer_id: PeerId, payload: &str) {
        let Some(room_id) = self.registry.room_of(&peer_id) else {
            debug!("Dropping message from {}: not joined", peer_id);
            return;
        };

        let message = match serde_json::from_str::<Value>(payload) {
            Ok(message) => message,
            Err(e) => {
                let err = RelayError::MalformedMessage {
                    peer_id,
                    reason: e.to_string(),
                };
                warn!("{}", err);
                self.reply_error(peer_id, "Invalid JSON");
                return;
            }
        };

        let failed = self.broadcast(
            &room_id,
            Some(peer_id),
            Notification::Signaling { message, peer_id },
        );
        self.evict(failed);
    }

    fn reply_error(&self, peer_id: PeerId, message: &str) {
        let Some(connection) = self.registry.connection(&peer_id) else {
            return;
        };
        if let Err(e) = connection.deliver(Notification::error(message)) {
            warn!("{}", e);
            self.evict(vec![peer_id]);
        }
    }

    /// Deliver `notification` to every member of `room_id` except `exclude`.
    /// Returns the members whose delivery failed.
    fn broadcast(
        &self,
        room_id: &RoomId,
        exclude: Option<PeerId>,
        notification: Notification,
    ) -> Vec<PeerId> {
        let mut failed = Vec::new();

        for member in self.registry.members(room_id) {
            if Some(member.id()) == exclude {
                continue;
            }
            if let Err(e) = member.deliver(notification.clone()) {
                warn!("Broadcast of {} in room {}: {}", notification.kind(), room_id, e);
                failed.push(member.id());
            }
        }

        failed
    }

    fn leave(&self, peer_id: PeerId) -> Vec<PeerId> {
        let Some((room_id, connection)) = self.registry.leave_any(&peer_id) else {
            debug!("Disconnect for {} ignored: not a member", peer_id);
            return Vec::new();
        };

        let state = connection.close();
        info!("Peer {} left room {} ({:?})", peer_id, room_id, state);

        self.broadcast(&room_id, None, Notification::PeerLeft { peer_id })
    }

    /// Tear down connections whose delivery failed. Their `peer_left`
    /// announcements can fail further deliveries, so keep going until none do.
    fn evict(&self, failed: Vec<PeerId>) {
        let mut pending = VecDeque::from(failed);

        while let Some(peer_id) = pending.pop_front() {
            info!("Evicting peer {}", peer_id);
            pending.extend(self.leave(peer_id));
        }
    }
}
