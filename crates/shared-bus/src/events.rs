//! # Event Filters
//!
//! Subscription filters over [`LedgerEvent`] topics and subject addresses.

use shared_types::entities::Address;
use shared_types::events::{EventTopic, LedgerEvent};

/// Filter for subscribing to specific events.
#[derive(Debug, Clone, Default)]
pub struct EventFilter {
    /// Topics to include. Empty means all topics.
    pub topics: Vec<EventTopic>,
    /// Subject addresses to include. Empty means every address.
    pub subjects: Vec<Address>,
}

impl EventFilter {
    /// Create a filter that accepts all events.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Create a filter for specific topics.
    #[must_use]
    pub fn topics(topics: Vec<EventTopic>) -> Self {
        Self {
            topics,
            subjects: Vec::new(),
        }
    }

    /// Create a filter for events caused by specific addresses.
    #[must_use]
    pub fn subjects(subjects: Vec<Address>) -> Self {
        Self {
            topics: Vec::new(),
            subjects,
        }
    }

    /// Security alerts only.
    #[must_use]
    pub fn alerts() -> Self {
        Self::topics(vec![EventTopic::Security])
    }

    /// Check if an event matches this filter.
    #[must_use]
    pub fn matches(&self, event: &LedgerEvent) -> bool {
        let topic_match = self.topics.is_empty()
            || self.topics.contains(&EventTopic::All)
            || self.topics.contains(&event.topic());

        let subject_match = self.subjects.is_empty() || self.subjects.contains(&event.subject());

        topic_match && subject_match
    }
}
