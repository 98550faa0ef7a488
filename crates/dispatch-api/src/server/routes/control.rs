async fn advance_tick(State(state): State<AppState>) -> Json<WorldSnapshot> {
    let (snapshot, messages) = {
        let mut inner = state.inner.lock().await;
        inner.world.step();
        let snapshot = inner.world.snapshot_for_current_tick();

        let mut messages = collect_delta_messages(&mut inner);
        messages.push(StreamMessage::world_snapshot(&snapshot));

        (snapshot, messages)
    };

    broadcast_messages(&state, messages);

    Json(snapshot)
}

#[derive(Debug, Serialize)]
struct ResetResponse {
    schema_version: String,
    message: String,
}

async fn reset_world(State(state): State<AppState>) -> Json<ResetResponse> {
    let messages = {
        let mut inner = state.inner.lock().await;
        inner.world.reset();

        let mut messages = collect_delta_messages(&mut inner);
        messages.push(StreamMessage::world_snapshot(
            &inner.world.snapshot_for_current_tick(),
        ));
        messages
    };

    broadcast_messages(&state, messages);

    Json(ResetResponse {
        schema_version: SCHEMA_VERSION_V1.to_string(),
        message: "state reset".to_string(),
    })
}
