use std::collections::VecDeque;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::color::Hsl;

pub const DEFAULT_TIMELINE_CAPACITY: usize = 64;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TimelineEntry {
    pub timestamp: DateTime<Utc>,
    pub hsl: Hsl,
    pub text: String,
}

/// Bounded history of submitted moods, oldest first.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MoodTimeline {
    capacity: usize,
    entries: VecDeque<TimelineEntry>,
}

impl Default for MoodTimeline {
    fn default() -> Self {
        MoodTimeline::with_capacity(DEFAULT_TIMELINE_CAPACITY)
    }
}

impl MoodTimeline {
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        MoodTimeline {
            capacity,
            entries: VecDeque::with_capacity(capacity),
        }
    }

    pub fn record(&mut self, hsl: Hsl, text: &str, at: DateTime<Utc>) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(TimelineEntry {
            timestamp: at,
            hsl,
            text: text.to_string(),
        });
    }

    /// The last `n` entries, oldest first.
    pub fn recent(&self, n: usize) -> Vec<TimelineEntry> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries.iter().skip(skip).cloned().collect()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }
}
