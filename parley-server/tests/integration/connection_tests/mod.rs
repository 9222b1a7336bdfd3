mod test_disconnect_is_idempotent;
mod test_single_peer_joins_room;
