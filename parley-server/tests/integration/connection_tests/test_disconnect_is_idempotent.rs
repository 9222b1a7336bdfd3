use parley_core::{Notification, PeerId, RoomId};

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_disconnect_is_idempotent() {
    init_tracing();

    let (relay, registry) = create_test_relay();

    let c1 = TestPeer::join(&relay, "abc123").await.expect("C1 join failed");
    let mut c2 = TestPeer::join(&relay, "abc123").await.expect("C2 join failed");
    let mut c3 = TestPeer::join(&relay, "abc123").await.expect("C3 join failed");

    c2.expect().await.expect("C2 should see C3 join");

    c1.leave(&relay).await.expect("First leave failed");
    c1.leave(&relay).await.expect("Second leave failed");
    // Never connected: must be harmless.
    relay.disconnect(PeerId::new()).await.expect("Stray disconnect failed");

    for peer in [&mut c2, &mut c3] {
        assert_eq!(
            peer.expect().await.expect("Missing peer_left"),
            Notification::PeerLeft { peer_id: c1.peer_id }
        );
        peer.expect_silence().await.expect("Leave announced twice");
    }

    assert_eq!(registry.size(&RoomId::from("abc123")), 2);
}
