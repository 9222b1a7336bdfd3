use crate::connection::ConnectionState;
use crate::error::{DeliveryFailureReason, RelayError};
use parley_core::{Notification, PeerId};
use std::sync::Arc;
use std::sync::atomic::{AtomicU8, Ordering};
use tokio::sync::mpsc;
use tokio::sync::mpsc::error::TrySendError;

/// Send half of one client's notification queue.
///
/// The transport keeps the matching [`mpsc::Receiver`] and writes whatever
/// arrives to the socket. Once the relay drops every clone of this handle
/// the receiver yields `None` and the transport closes the socket.
///
/// Clones share one lifecycle state, so a handle that has left stays left
/// no matter which clone is presented next.
#[derive(Debug, Clone)]
pub struct Connection {
    id: PeerId,
    state: Arc<AtomicU8>,
    tx: mpsc::Sender<Notification>,
}

impl Connection {
    /// Open a connection with a freshly generated id.
    pub fn open(capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        Self::with_id(PeerId::new(), capacity)
    }

    pub fn with_id(id: PeerId, capacity: usize) -> (Self, mpsc::Receiver<Notification>) {
        let (tx, rx) = mpsc::channel(capacity.max(1));
        let connection = Self {
            id,
            state: Arc::new(AtomicU8::new(ConnectionState::Connecting as u8)),
            tx,
        };
        (connection, rx)
    }

    pub fn id(&self) -> PeerId {
        self.id
    }

    pub fn state(&self) -> ConnectionState {
        ConnectionState::from_u8(self.state.load(Ordering::Acquire))
    }

    /// `Connecting -> Joined`. Any other starting state is returned as the error.
    pub(crate) fn mark_joined(&self) -> Result<(), ConnectionState> {
        self.state
            .compare_exchange(
                ConnectionState::Connecting as u8,
                ConnectionState::Joined as u8,
                Ordering::AcqRel,
                Ordering::Acquire,
            )
            .map(|_| ())
            .map_err(ConnectionState::from_u8)
    }

    pub(crate) fn mark_left(&self) {
        self.state.store(ConnectionState::Left as u8, Ordering::Release);
    }

    /// Consume the handle. Dropping the sender is what tells the transport
    /// to stop.
    pub(crate) fn close(self) -> ConnectionState {
        self.mark_left();
        let state = self.state();
        drop(self.tx);
        state
    }

    /// Enqueue without waiting. A full queue is reported the same way as a
    /// dead transport so that a stalled client cannot hold up a broadcast.
    pub fn deliver(&self, notification: Notification) -> Result<(), RelayError> {
        self.tx.try_send(notification).map_err(|e| {
            let reason = match e {
                TrySendError::Full(_) => DeliveryFailureReason::QueueFull,
                TrySendError::Closed(_) => DeliveryFailureReason::Closed,
            };
            RelayError::DeliveryFailure {
                peer_id: self.id,
                reason,
            }
        })
    }

    pub fn is_closed(&self) -> bool {
        self.tx.is_closed()
    }
}
