//! Tests are organized by functionality:
//! - `connection_tests` - joining, rejection, disconnect, the WebSocket transport
//! - `messaging_tests` - relaying signaling payloads
//! - `multi_peer_tests` - several peers and rooms

pub mod connection_tests;

use std::sync::Arc;
use tracing::Level;

use parley_server::{RelayConfig, RelayEngine, RelayHandle, RoomRegistry};

/// Initialize tracing for tests (call once per test).
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// Spawn a relay engine over a fresh registry.
///
/// Returns (relay, registry) for test control.
pub fn create_test_relay() -> (RelayHandle, Arc<RoomRegistry>) {
    let registry = Arc::new(RoomRegistry::new());
    let relay = RelayEngine::spawn(registry.clone(), &RelayConfig::default());
    (relay, registry)
}
