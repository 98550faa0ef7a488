use super::*;

impl DispatchWorld {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-clear back to tick 0 with empty collections. The rebuilt log
    /// holds exactly one `world_reset` entry, so repeated resets observe
    /// identical state.
    pub fn reset(&mut self) {
        *self = Self::default();
        self.push_event(EventType::WorldReset, "world", None);
    }

    /// Next generated id for `prefix`. Skips values already taken by
    /// caller-supplied ids in any table, so a generated id can never shadow
    /// an existing entity.
    pub(super) fn fresh_id(&mut self, prefix: &str) -> String {
        loop {
            self.next_entity_sequence = self.next_entity_sequence.saturating_add(1);
            let candidate = format!("{prefix}_{:04}", self.next_entity_sequence);
            if !self.id_in_use(&candidate) {
                return candidate;
            }
        }
    }

    fn id_in_use(&self, id: &str) -> bool {
        self.drivers.contains_key(id) || self.riders.contains_key(id) || self.rides.contains_key(id)
    }
}
