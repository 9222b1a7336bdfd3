use parley_core::Notification;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::TestPeer;

/// A peer already in the room sees A join, B join, then A's message, in that order.
#[tokio::test]
async fn test_three_peers_join() {
    init_tracing();

    let (relay, _registry) = create_test_relay();

    let mut observer = TestPeer::join(&relay, "room").await.expect("Observer join failed");
    let mut a = TestPeer::join(&relay, "room").await.expect("A join failed");
    let mut b = TestPeer::join(&relay, "room").await.expect("B join failed");

    a.send(&relay, r#"{"type":"offer"}"#).await.expect("Send failed");

    let seen = [
        observer.expect().await.expect("Observer missed A"),
        observer.expect().await.expect("Observer missed B"),
        observer.expect().await.expect("Observer missed message"),
    ];
    assert_eq!(seen[0], Notification::PeerJoined { peer_id: a.peer_id });
    assert_eq!(seen[1], Notification::PeerJoined { peer_id: b.peer_id });
    assert!(matches!(
        &seen[2],
        Notification::Signaling { peer_id, .. } if *peer_id == a.peer_id
    ));

    assert_eq!(
        a.expect().await.expect("A missed B"),
        Notification::PeerJoined { peer_id: b.peer_id }
    );
    assert!(matches!(
        b.expect().await.expect("B missed message"),
        Notification::Signaling { peer_id, .. } if peer_id == a.peer_id
    ));

    // Nobody is ever told about themselves.
    a.expect_silence().await.expect("A got extra notifications");
    b.expect_silence().await.expect("B got extra notifications");
}
