use std::collections::HashSet;
use std::fmt;
use std::net::SocketAddr;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Path, Query, Request, State};
use axum::http::header::{HeaderName, HeaderValue};
use axum::http::Method;
use axum::http::StatusCode;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use contracts::{
    ApiError, CreateDriverRequest, CreateRiderRequest, DriverSnapshot, ErrorCode, Event, EventType,
    RequestRideRequest, RideSnapshot, RiderSnapshot, WorldSnapshot, SCHEMA_VERSION_V1,
};
use dispatch_core::{DispatchWorld, EngineError};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tokio::net::TcpListener;
use tokio::sync::{broadcast, Mutex};

const DEFAULT_PAGE_SIZE: usize = 500;
const MAX_PAGE_SIZE: usize = 5000;

include!("error.rs");
include!("state.rs");
include!("routes/control.rs");
include!("routes/entities.rs");
include!("routes/rides.rs");
include!("routes/query.rs");
include!("routes/stream.rs");
include!("util.rs");

pub async fn serve(addr: SocketAddr) -> Result<(), ServerError> {
    let state = AppState::new();
    let app = router(state);

    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn router(state: AppState) -> Router {
    Router::new()
        .route("/state", get(get_state))
        .route("/drivers", post(create_driver))
        .route("/drivers/{driver_id}", delete(delete_driver))
        .route("/riders", post(create_rider))
        .route("/riders/{rider_id}", delete(delete_rider))
        .route("/rides/request", post(request_ride))
        .route("/rides/{ride_id}/accept", post(accept_ride))
        .route("/rides/{ride_id}/reject", post(reject_ride))
        .route("/tick", post(advance_tick))
        .route("/reset", post(reset_world))
        .route("/events", get(get_events))
        .route("/stream", get(stream_world))
        .layer(middleware::from_fn(cors_middleware))
        .with_state(state)
}

async fn cors_middleware(request: Request, next: Next) -> Response {
    if request.method() == Method::OPTIONS {
        let mut response = Response::new(axum::body::Body::empty());
        *response.status_mut() = StatusCode::NO_CONTENT;
        apply_cors_headers(response.headers_mut());
        return response;
    }

    let mut response = next.run(request).await;
    apply_cors_headers(response.headers_mut());
    response
}
