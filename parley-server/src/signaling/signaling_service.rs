use crate::config::RelayConfig;
use crate::connection::Connection;
use crate::relay::{RelayEngine, RelayHandle};
use crate::room::RoomRegistry;
use parley_core::Notification;
use std::sync::Arc;
use tokio::sync::mpsc;

/// Shared state handed to every axum handler.
#[derive(Clone)]
pub struct SignalingService {
    relay: RelayHandle,
    registry: Arc<RoomRegistry>,
    config: RelayConfig,
}

impl SignalingService {
    pub fn new(relay: RelayHandle, registry: Arc<RoomRegistry>, config: RelayConfig) -> Self {
        Self {
            relay,
            registry,
            config,
        }
    }

    /// Create a registry, spawn a relay engine over it and wrap both.
    pub fn start(config: RelayConfig) -> Self {
        let registry = Arc::new(RoomRegistry::new());
        let relay = RelayEngine::spawn(registry.clone(), &config);
        Self::new(relay, registry, config)
    }

    pub fn relay(&self) -> &RelayHandle {
        &self.relay
    }

    /// Read-only view for diagnostics. Membership changes go through [`Self::relay`].
    pub fn registry(&self) -> &Arc<RoomRegistry> {
        &self.registry
    }

    pub fn open_connection(&self) -> (Connection, mpsc::Receiver<Notification>) {
        Connection::open(self.config.send_queue_capacity)
    }
}
