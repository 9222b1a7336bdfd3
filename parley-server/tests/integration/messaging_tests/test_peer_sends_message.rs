use parley_core::{Notification, RoomId};
use serde_json::json;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_peer_sends_message() {
    init_tracing();

    let (relay, registry) = create_test_relay();
    let room = RoomId::from("abc123");

    let mut c1 = TestPeer::join(&relay, "abc123").await.expect("C1 join failed");
    assert_eq!(registry.size(&room), 1);

    let mut c2 = TestPeer::join(&relay, "abc123").await.expect("C2 join failed");
    assert_eq!(
        c1.expect().await.expect("C1 missed peer_joined"),
        Notification::PeerJoined { peer_id: c2.peer_id }
    );

    c1.send(&relay, r#"{"type":"offer","sdp":"..."}"#)
        .await
        .expect("Send failed");

    assert_eq!(
        c2.expect().await.expect("C2 missed signaling"),
        Notification::Signaling {
            message: json!({ "type": "offer", "sdp": "..." }),
            peer_id: c1.peer_id,
        }
    );

    c1.leave(&relay).await.expect("Leave failed");
    assert_eq!(
        c2.expect().await.expect("C2 missed peer_left"),
        Notification::PeerLeft { peer_id: c1.peer_id }
    );
    assert_eq!(registry.size(&room), 1);

    c1.expect_silence().await.expect("Sender got its own message back");
}
