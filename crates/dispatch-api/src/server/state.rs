#[derive(Clone)]
struct AppState {
    inner: std::sync::Arc<Mutex<ServerInner>>,
    stream_tx: broadcast::Sender<StreamMessage>,
}

impl AppState {
    fn new() -> Self {
        let (stream_tx, _) = broadcast::channel(4096);
        Self {
            inner: std::sync::Arc::new(Mutex::new(ServerInner::default())),
            stream_tx,
        }
    }
}

#[derive(Debug, Default)]
struct ServerInner {
    world: DispatchWorld,
    emitted_event_count: usize,
}

/// Stream messages for engine events appended since the last collection.
/// A reset truncates the log, in which case emission restarts from the top.
fn collect_delta_messages(inner: &mut ServerInner) -> Vec<StreamMessage> {
    let total = inner.world.events().len();
    if inner.emitted_event_count > total {
        inner.emitted_event_count = 0;
    }

    let mut messages = Vec::new();
    for event in &inner.world.events()[inner.emitted_event_count..] {
        messages.push(StreamMessage::event_appended(event));
    }
    inner.emitted_event_count = total;

    messages
}

fn broadcast_messages(state: &AppState, messages: Vec<StreamMessage>) {
    for message in messages {
        let _ = state.stream_tx.send(message);
    }
}
