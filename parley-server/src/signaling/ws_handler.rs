use crate::signaling::SignalingService;
use axum::extract::ws::{Message, WebSocket};
use axum::extract::{Path, State, WebSocketUpgrade};
use axum::response::IntoResponse;
use futures::{SinkExt, StreamExt};
use parley_core::{Notification, RoomId};
use tracing::{error, info, warn};

/// Upgrade `GET /ws/{room_code}` to a relay connection in that room.
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    Path(room_code): Path<String>,
    State(service): State<SignalingService>,
) -> impl IntoResponse {
    let room_id = RoomId::from(room_code);

    ws.on_upgrade(move |socket| handle_socket(socket, room_id, service))
}

async fn handle_socket(socket: WebSocket, room_id: RoomId, service: SignalingService) {
    let (connection, mut rx) = service.open_connection();
    let peer_id = connection.id();
    info!("New WebSocket connection {} for room {}", peer_id, room_id);

    let (mut sender, mut receiver) = socket.split();

    if let Err(e) = service.relay().connect(room_id, connection).await {
        warn!("Connection {} refused: {}", peer_id, e);
        if let Ok(json) = serde_json::to_string(&Notification::error(e.to_string())) {
            let _ = sender.send(Message::Text(json.into())).await;
        }
        let _ = sender.close().await;
        return;
    }

    let mut send_task = tokio::spawn(async move {
        while let Some(notification) = rx.recv().await {
            let json = match serde_json::to_string(&notification) {
                Ok(json) => json,
                Err(e) => {
                    error!("Failed to serialize notification: {}", e);
                    continue;
                }
            };
            if sender.send(Message::Text(json.into())).await.is_err() {
                break;
            }
        }
        // Queue closed: the relay dropped this connection.
        let _ = sender.close().await;
    });

    let mut recv_task = tokio::spawn({
        let relay = service.relay().clone();

        async move {
            while let Some(Ok(msg)) = receiver.next().await {
                match msg {
                    Message::Text(text) => {
                        if let Err(e) = relay.route(peer_id, text.as_str()).await {
                            error!("Relay died: {}", e);
                            break;
                        }
                    }
                    Message::Close(_) => break,
                    _ => {}
                }
            }
        }
    });

    tokio::select! {
        _ = (&mut send_task) => recv_task.abort(),
        _ = (&mut recv_task) => send_task.abort(),
    };

    if let Err(e) = service.relay().disconnect(peer_id).await {
        warn!("Could not release {}: {}", peer_id, e);
    }
    info!("WebSocket disconnected: {}", peer_id);
}
