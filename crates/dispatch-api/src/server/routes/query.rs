async fn get_state(State(state): State<AppState>) -> Json<WorldSnapshot> {
    let inner = state.inner.lock().await;
    Json(inner.world.snapshot_for_current_tick())
}

#[derive(Debug, Deserialize, Default)]
struct EventsQuery {
    from_tick: Option<u64>,
    to_tick: Option<u64>,
    #[serde(default)]
    event_types: Vec<String>,
    #[serde(rename = "event_types[]", default)]
    event_types_bracket: Vec<String>,
    subject_id: Option<String>,
    cursor: Option<usize>,
    page_size: Option<usize>,
}

#[derive(Debug, Serialize)]
struct EventPage {
    schema_version: String,
    generated_at_tick: u64,
    cursor: usize,
    next_cursor: Option<usize>,
    total: usize,
    events: Vec<Event>,
}

async fn get_events(
    State(state): State<AppState>,
    Query(query): Query<EventsQuery>,
) -> Result<Json<EventPage>, HttpApiError> {
    let response = {
        let inner = state.inner.lock().await;

        let current_tick = inner.world.current_tick();
        let from_tick = query.from_tick.unwrap_or(0);
        let to_tick = query.to_tick.unwrap_or(current_tick);

        if to_tick < from_tick {
            return Err(HttpApiError::invalid_query(
                "to_tick must be >= from_tick",
                Some(format!("from_tick={from_tick} to_tick={to_tick}")),
            ));
        }

        let mut requested_types = query.event_types;
        requested_types.extend(query.event_types_bracket);
        let event_type_filter = parse_event_type_filter(&requested_types)?;

        let mut filtered = Vec::new();
        for event in inner.world.events() {
            if event.tick < from_tick || event.tick > to_tick {
                continue;
            }

            if let Some(filter) = &event_type_filter {
                if !filter.contains(&event.event_type) {
                    continue;
                }
            }

            if let Some(subject_id) = &query.subject_id {
                if event.subject_id != *subject_id {
                    continue;
                }
            }

            filtered.push(event.clone());
        }

        let (start, end, next_cursor) = paginate(filtered.len(), query.cursor, query.page_size)?;

        EventPage {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            generated_at_tick: current_tick,
            cursor: start,
            next_cursor,
            total: filtered.len(),
            events: filtered[start..end].to_vec(),
        }
    };

    Ok(Json(response))
}
