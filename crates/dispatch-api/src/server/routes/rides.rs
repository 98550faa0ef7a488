#[derive(Debug, Serialize)]
struct RideResponse {
    schema_version: String,
    ride: RideSnapshot,
}

impl RideResponse {
    fn new(ride: RideSnapshot) -> Self {
        Self {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            ride,
        }
    }
}

/// A ride that dispatches to nobody comes back `failed` with status 200;
/// only invalid input or an unknown rider is an error.
async fn request_ride(
    State(state): State<AppState>,
    Json(request): Json<RequestRideRequest>,
) -> Result<Json<RideResponse>, HttpApiError> {
    let (ride, messages) = {
        let mut inner = state.inner.lock().await;
        let ride = inner
            .world
            .request_ride(&request.rider_id, request.pickup, request.dropoff)
            .map_err(HttpApiError::from_engine)?;
        let messages = collect_delta_messages(&mut inner);
        (ride, messages)
    };

    broadcast_messages(&state, messages);

    Ok(Json(RideResponse::new(ride)))
}

async fn accept_ride(
    Path(ride_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RideResponse>, HttpApiError> {
    let (ride, messages) = {
        let mut inner = state.inner.lock().await;
        let ride = inner
            .world
            .accept_ride(&ride_id)
            .map_err(HttpApiError::from_engine)?;
        let messages = collect_delta_messages(&mut inner);
        (ride, messages)
    };

    broadcast_messages(&state, messages);

    Ok(Json(RideResponse::new(ride)))
}

async fn reject_ride(
    Path(ride_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<RideResponse>, HttpApiError> {
    let (ride, messages) = {
        let mut inner = state.inner.lock().await;
        let ride = inner
            .world
            .reject_ride(&ride_id)
            .map_err(HttpApiError::from_engine)?;
        let messages = collect_delta_messages(&mut inner);
        (ride, messages)
    };

    broadcast_messages(&state, messages);

    Ok(Json(RideResponse::new(ride)))
}
