/***************************************/
/*        3rd party libraries          */
/***************************************/
use log::info;
use serde::Deserialize;
use serde::Serialize;
use std::collections::VecDeque;
use std::fmt;

/***************************************/
/*       Public data structures        */
/***************************************/
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogCategory {
    Call,
    Movement,
    Pickup,
    Dropoff,
    System,
}

impl fmt::Display for LogCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            LogCategory::Call => "call",
            LogCategory::Movement => "movement",
            LogCategory::Pickup => "pickup",
            LogCategory::Dropoff => "dropoff",
            LogCategory::System => "system",
        };
        write!(f, "{}", name)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogEntry {
    pub id: u64,
    pub timestamp: u64,
    pub message: String,
    pub category: LogCategory,
}

/**
 * Bounded history of human-readable simulation events.
 *
 * Entries are kept newest first. Once `capacity` entries are held, each push
 * drops the oldest one. Every entry is also forwarded to the `log` facade.
 */
#[derive(Debug, Clone)]
pub struct ActivityLog {
    entries: VecDeque<LogEntry>,
    capacity: usize,
    next_id: u64,
}

/***************************************/
/*             Public API              */
/***************************************/
impl ActivityLog {
    pub fn new(capacity: usize) -> ActivityLog {
        ActivityLog {
            entries: VecDeque::with_capacity(capacity),
            capacity,
            next_id: 0,
        }
    }

    pub fn push(&mut self, timestamp: u64, category: LogCategory, message: String) {
        info!("[{}] {}", category, message);

        self.next_id += 1;
        self.entries.push_front(LogEntry {
            id: self.next_id,
            timestamp,
            message,
            category,
        });
        self.entries.truncate(self.capacity);
    }

    /// Entries, newest first.
    pub fn entries(&self) -> impl Iterator<Item = &LogEntry> {
        self.entries.iter()
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[cfg(test)]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

/// Formats a simulation timestamp (milliseconds since start) as `HH:MM:SS`.
pub fn format_timestamp(timestamp: u64) -> String {
    let seconds = timestamp / 1000;
    format!(
        "{:02}:{:02}:{:02}",
        seconds / 3600,
        (seconds / 60) % 60,
        seconds % 60
    )
}
