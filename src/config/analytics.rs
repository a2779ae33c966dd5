//! Bounded local event log

use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::Result;
use crate::storage::{KeyValueStore, read_json, write_json};

/// Storage key holding the event list
pub const ANALYTICS_KEY: &str = "analytics";

/// Maximum number of retained events
pub const MAX_EVENTS: usize = 100;

/// A single logged event
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    pub event: String,

    /// Free-form payload
    #[serde(default)]
    pub data: Map<String, Value>,

    #[serde(with = "crate::time::iso_millis")]
    pub timestamp: DateTime<Utc>,

    /// Page the event happened on
    pub url: String,
}

/// The most recent events, oldest first
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalyticsLog {
    pub events: VecDeque<AnalyticsEvent>,
}

impl AnalyticsLog {
    /// Load the log from the store; an absent key is an empty log
    pub fn load<S: KeyValueStore + ?Sized>(store: &S) -> Result<Self> {
        let mut log: Self = read_json(store, ANALYTICS_KEY)?;
        log.truncate_to_cap();
        Ok(log)
    }

    pub fn save<S: KeyValueStore + ?Sized>(&self, store: &mut S) -> Result<()> {
        write_json(store, ANALYTICS_KEY, self)
    }

    /// Append an event, evicting the oldest ones beyond [`MAX_EVENTS`]
    pub fn push(&mut self, event: AnalyticsEvent) {
        self.events.push_back(event);
        self.truncate_to_cap();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Events with the given name, oldest first
    pub fn named<'a>(&'a self, name: &'a str) -> impl Iterator<Item = &'a AnalyticsEvent> + 'a {
        self.events.iter().filter(move |e| e.event == name)
    }

    fn truncate_to_cap(&mut self) {
        while self.events.len() > MAX_EVENTS {
            self.events.pop_front();
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;
    use crate::storage::MemoryStore;
    use crate::time::test_now;

    fn event(n: usize) -> AnalyticsEvent {
        let mut data = Map::new();
        data.insert("n".to_string(), json!(n));
        AnalyticsEvent {
            event: format!("event_{n}"),
            data,
            timestamp: test_now(),
            url: "https://coldreads.example/".to_string(),
        }
    }

    #[test]
    fn push_appends_in_order() {
        let mut log = AnalyticsLog::default();
        log.push(event(1));
        log.push(event(2));
        let names: Vec<&str> = log.events.iter().map(|e| e.event.as_str()).collect();
        assert_eq!(names, vec!["event_1", "event_2"]);
    }

    #[test]
    fn hundred_and_first_event_evicts_oldest() {
        let mut log = AnalyticsLog::default();
        for n in 0..MAX_EVENTS {
            log.push(event(n));
        }
        assert_eq!(log.len(), MAX_EVENTS);

        log.push(event(MAX_EVENTS));
        assert_eq!(log.len(), MAX_EVENTS);
        assert_eq!(log.events.front().unwrap().event, "event_1");
        assert_eq!(log.events.back().unwrap().event, "event_100");

        let expected: Vec<String> = (1..=MAX_EVENTS).map(|n| format!("event_{n}")).collect();
        let actual: Vec<String> = log.events.iter().map(|e| e.event.clone()).collect();
        assert_eq!(actual, expected);
    }

    #[test]
    fn stored_layout_is_an_array() {
        let mut store = MemoryStore::new();
        let mut log = AnalyticsLog::default();
        log.push(event(7));
        log.save(&mut store).unwrap();

        let raw = store.get_item(ANALYTICS_KEY).unwrap().unwrap();
        let value: Value = serde_json::from_str(&raw).unwrap();
        assert_eq!(value[0]["event"], "event_7");
        assert_eq!(value[0]["data"]["n"], 7);
        assert_eq!(value[0]["url"], "https://coldreads.example/");
    }

    #[test]
    fn oversized_stored_logs_are_trimmed_on_load() {
        let mut store = MemoryStore::new();
        let oversized = AnalyticsLog { events: (0..150).map(event).collect() };
        oversized.save(&mut store).unwrap();

        let log = AnalyticsLog::load(&store).unwrap();
        assert_eq!(log.len(), MAX_EVENTS);
        assert_eq!(log.events.front().unwrap().event, "event_50");
    }

    #[test]
    fn named_filters_events() {
        let mut log = AnalyticsLog::default();
        log.push(event(1));
        log.push(event(2));
        log.push(event(1));
        assert_eq!(log.named("event_1").count(), 2);
    }
}
