use parley_core::Notification;
use serde_json::json;

use crate::integration::{create_test_relay, init_tracing};
use crate::utils::TestPeer;

#[tokio::test]
async fn test_rapid_message_sending() {
    init_tracing();

    let (relay, _registry) = create_test_relay();

    let sender = TestPeer::join(&relay, "burst").await.expect("Sender join failed");
    let mut receiver = TestPeer::join(&relay, "burst").await.expect("Receiver join failed");

    let count = 40;
    for i in 0..count {
        sender
            .send(&relay, &json!({ "type": "candidate", "seq": i }).to_string())
            .await
            .expect("Send failed");
    }

    for i in 0..count {
        match receiver.expect().await.expect("Missing message") {
            Notification::Signaling { message, peer_id } => {
                assert_eq!(peer_id, sender.peer_id);
                assert_eq!(message["seq"], i, "Messages out of order");
            }
            other => panic!("Unexpected notification: {:?}", other),
        }
    }
}
