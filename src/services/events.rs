use std::collections::BTreeMap;

use crate::models::EventInfo;

pub const UNKNOWN_EVENT: &str = "Unknown Event";

/// Read-only lookup of event display names
#[derive(Debug, Clone, Default)]
pub struct EventCatalog {
    events: BTreeMap<String, String>,
}

impl EventCatalog {
    pub fn new(events: BTreeMap<String, String>) -> Self {
        Self { events }
    }

    /// Display name for an event id, or "Unknown Event"
    pub fn name_of(&self, event_id: &str) -> &str {
        self.events
            .get(event_id)
            .map(String::as_str)
            .unwrap_or(UNKNOWN_EVENT)
    }

    /// All events, ordered by id
    pub fn list(&self) -> Vec<EventInfo> {
        self.events
            .iter()
            .map(|(id, name)| EventInfo {
                id: id.clone(),
                name: name.clone(),
            })
            .collect()
    }
}
