use super::*;

impl DispatchWorld {
    /// Append one log entry at the current tick. `sequence_in_tick`
    /// restarts at zero whenever the tick counter has moved since the last
    /// append.
    pub(super) fn push_event(
        &mut self,
        event_type: EventType,
        subject_id: &str,
        details: Option<Value>,
    ) {
        if self.event_sequence_tick != self.tick {
            self.event_sequence_tick = self.tick;
            self.next_event_sequence = 0;
        }
        let sequence_in_tick = self.next_event_sequence;
        self.next_event_sequence = self.next_event_sequence.saturating_add(1);

        self.event_log.push(Event {
            schema_version: SCHEMA_VERSION_V1.to_string(),
            event_id: format!("evt:{}:{}", self.tick, sequence_in_tick),
            tick: self.tick,
            sequence_in_tick,
            event_type,
            subject_id: subject_id.to_string(),
            details,
        });
    }

    pub fn events(&self) -> &[Event] {
        &self.event_log
    }
}
