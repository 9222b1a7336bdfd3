use crate::connection::Connection;
use crate::error::RelayError;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use parley_core::{PeerId, RoomId};
use std::collections::HashMap;
use tracing::{debug, info};

/// Membership of every live room.
///
/// Each room maps to its member connections; `memberships` is the reverse
/// index that enforces one room per connection. Lock order is always
/// `memberships` before `rooms`.
#[derive(Default)]
pub struct RoomRegistry {
    rooms: DashMap<RoomId, HashMap<PeerId, Connection>>,
    memberships: DashMap<PeerId, RoomId>,
}

impl RoomRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `connection` to `room_id`, creating the room if needed.
    ///
    /// Only a connection that has never joined is admitted; one that has
    /// left is refused with [`RelayError::NotJoinable`].
    pub fn join(&self, room_id: &RoomId, connection: Connection) -> Result<(), RelayError> {
        let peer_id = connection.id();

        let membership = match self.memberships.entry(peer_id) {
            Entry::Occupied(entry) => {
                return Err(RelayError::AlreadyJoined {
                    peer_id,
                    room_id: entry.get().clone(),
                });
            }
            Entry::Vacant(entry) => entry,
        };

        if let Err(state) = connection.mark_joined() {
            return Err(RelayError::NotJoinable { peer_id, state });
        }

        let mut members = self.rooms.entry(room_id.clone()).or_insert_with(|| {
            info!("Creating room: {}", room_id);
            HashMap::new()
        });
        members.insert(peer_id, connection);
        drop(members);

        membership.insert(room_id.clone());
        Ok(())
    }

    /// Remove `peer_id` from `room_id`. Returns the removed connection, or
    /// `None` if it was not a member there.
    pub fn leave(&self, room_id: &RoomId, peer_id: &PeerId) -> Option<Connection> {
        if self
            .memberships
            .remove_if(peer_id, |_, joined| joined == room_id)
            .is_none()
        {
            debug!("Peer {} is not a member of room {}", peer_id, room_id);
            return None;
        }

        let Entry::Occupied(mut entry) = self.rooms.entry(room_id.clone()) else {
            return None;
        };

        let removed = entry.get_mut().remove(peer_id);
        if let Some(connection) = &removed {
            connection.mark_left();
        }
        if entry.get().is_empty() {
            entry.remove();
            info!("Room {} is empty, removing", room_id);
        }
        removed
    }

    /// Remove `peer_id` from whichever room it is in.
    pub fn leave_any(&self, peer_id: &PeerId) -> Option<(RoomId, Connection)> {
        let room_id = self.room_of(peer_id)?;
        let connection = self.leave(&room_id, peer_id)?;
        Some((room_id, connection))
    }

    /// Point-in-time copy of the room's members.
    pub fn members(&self, room_id: &RoomId) -> Vec<Connection> {
        self.rooms
            .get(room_id)
            .map(|members| members.values().cloned().collect())
            .unwrap_or_default()
    }

    pub fn size(&self, room_id: &RoomId) -> usize {
        self.rooms.get(room_id).map(|m| m.len()).unwrap_or(0)
    }

    /// The member connection for `peer_id`, wherever it is joined.
    pub fn connection(&self, peer_id: &PeerId) -> Option<Connection> {
        let room_id = self.room_of(peer_id)?;
        self.rooms
            .get(&room_id)
            .and_then(|members| members.get(peer_id).cloned())
    }

    pub fn room_of(&self, peer_id: &PeerId) -> Option<RoomId> {
        self.memberships.get(peer_id).map(|r| r.value().clone())
    }

    pub fn contains_room(&self, room_id: &RoomId) -> bool {
        self.rooms.contains_key(room_id)
    }

    pub fn room_count(&self) -> usize {
        self.rooms.len()
    }

    pub fn connection_count(&self) -> usize {
        self.memberships.len()
    }
}
