use parley_core::RoomId;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::{NOTIFICATION_TIMEOUT_MS, TestPeer, wait_until};

#[tokio::test]
async fn test_single_peer_joins_room() {
    init_tracing();

    let (relay, registry) = create_test_relay();
    let room = RoomId::from("abc123");

    assert!(!registry.contains_room(&room));

    let mut peer = TestPeer::join(&relay, "abc123")
        .await
        .expect("Failed to join");

    assert_eq!(registry.size(&room), 1);
    assert_eq!(registry.room_of(&peer.peer_id), Some(room.clone()));
    peer.expect_silence().await.expect("Lone peer got a notification");

    peer.leave(&relay).await.expect("Leave failed");
    wait_until(|| !registry.contains_room(&room), NOTIFICATION_TIMEOUT_MS)
        .await
        .expect("Empty room was not removed");
    assert_eq!(registry.size(&room), 0);
    assert!(peer.is_closed().await, "Relay should drop the connection");
}
