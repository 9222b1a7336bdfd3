use crate::signaling::{SignalingService, ws_handler};
use axum::extract::{Path, State};
use axum::routing::get;
use axum::{Json, Router};
use parley_core::RoomId;
use serde::Serialize;
use tower_http::trace::TraceLayer;

#[derive(Debug, Serialize)]
pub struct RoomStatus {
    pub room_id: RoomId,
    pub peers: usize,
}

#[derive(Debug, Serialize)]
pub struct Health {
    pub status: &'static str,
    pub rooms: usize,
    pub connections: usize,
}

/// All relay routes. `/ws/room/{room_code}/` is the path older clients use.
pub fn router(service: SignalingService) -> Router {
    Router::new()
        .route("/ws/{room_code}", get(ws_handler))
        .route("/ws/room/{room_code}", get(ws_handler))
        .route("/ws/room/{room_code}/", get(ws_handler))
        .route("/rooms/{room_code}", get(room_status))
        .route("/health", get(health))
        .layer(TraceLayer::new_for_http())
        .with_state(service)
}

async fn room_status(
    Path(room_code): Path<String>,
    State(service): State<SignalingService>,
) -> Json<RoomStatus> {
    let room_id = RoomId::from(room_code);
    let peers = service.registry().size(&room_id);
    Json(RoomStatus { room_id, peers })
}

async fn health(State(service): State<SignalingService>) -> Json<Health> {
    let registry = service.registry();
    Json(Health {
        status: "ok",
        rooms: registry.room_count(),
        connections: registry.connection_count(),
    })
}
