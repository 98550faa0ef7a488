#[derive(Debug, Serialize)]
struct CreateDriverResponse {
    schema_version: String,
    driver: DriverSnapshot,
}

async fn create_driver(
    State(state): State<AppState>,
    Json(request): Json<CreateDriverRequest>,
) -> Result<Json<CreateDriverResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let driver = inner
            .world
            .create_driver(request.id, request.x, request.y)
            .map_err(HttpApiError::from_engine)?;
        let messages = collect_delta_messages(&mut inner);

        (
            CreateDriverResponse {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                driver,
            },
            messages,
        )
    };

    broadcast_messages(&state, messages);

    Ok(Json(response))
}

#[derive(Debug, Serialize)]
struct DeleteEntityResponse {
    schema_version: String,
    message: String,
}

async fn delete_driver(
    Path(driver_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteEntityResponse>, HttpApiError> {
    let messages = {
        let mut inner = state.inner.lock().await;
        inner
            .world
            .delete_driver(&driver_id)
            .map_err(HttpApiError::from_engine)?;
        collect_delta_messages(&mut inner)
    };

    broadcast_messages(&state, messages);

    Ok(Json(DeleteEntityResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        message: format!("driver deleted: {driver_id}"),
    }))
}

#[derive(Debug, Serialize)]
struct CreateRiderResponse {
    schema_version: String,
    rider: RiderSnapshot,
}

async fn create_rider(
    State(state): State<AppState>,
    Json(request): Json<CreateRiderRequest>,
) -> Result<Json<CreateRiderResponse>, HttpApiError> {
    let (response, messages) = {
        let mut inner = state.inner.lock().await;
        let rider = inner
            .world
            .create_rider(request.id, request.x, request.y)
            .map_err(HttpApiError::from_engine)?;
        let messages = collect_delta_messages(&mut inner);

        (
            CreateRiderResponse {
                schema_version: SCHEMA_VERSION_V1.to_string(),
                rider,
            },
            messages,
        )
    };

    broadcast_messages(&state, messages);

    Ok(Json(response))
}

async fn delete_rider(
    Path(rider_id): Path<String>,
    State(state): State<AppState>,
) -> Result<Json<DeleteEntityResponse>, HttpApiError> {
    let messages = {
        let mut inner = state.inner.lock().await;
        inner
            .world
            .delete_rider(&rider_id)
            .map_err(HttpApiError::from_engine)?;
        collect_delta_messages(&mut inner)
    };

    broadcast_messages(&state, messages);

    Ok(Json(DeleteEntityResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        message: format!("rider deleted: {rider_id}"),
    }))
}
