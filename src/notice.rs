//! User-visible advisory notices.
//!
//! Notices never change control flow. They are handed to a [`NoticeSink`]
//! owned by the caller, which decides how to surface them.

use chrono::Local;
use std::collections::VecDeque;
use std::fmt;
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Maximum number of notices kept by a [`NoticeBuffer`]
const MAX_NOTICES: usize = 1000;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Notice {
    /// A table was served from the session cache instead of being re-read
    CacheHit { path: String },
    /// A short row was padded with missing values
    RaggedRowPadded {
        path: String,
        line: u64,
        fields: usize,
        expected: usize,
    },
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Notice::CacheHit { path } => write!(f, "Reading file from cache: {}", path),
            Notice::RaggedRowPadded {
                path,
                line,
                fields,
                expected,
            } => write!(
                f,
                "{}:{} has {} fields, padded to {}",
                path, line, fields, expected
            ),
        }
    }
}

/// Receiver for notices
pub trait NoticeSink: Send + Sync {
    fn notify(&self, notice: Notice);
}

/// Emits every notice as a `tracing` warning
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingNotices;

impl NoticeSink for TracingNotices {
    fn notify(&self, notice: Notice) {
        warn!(target: "csv_inspect::notice", "Custom Warning: {}", notice);
    }
}

/// A notice with the local time it was received
#[derive(Debug, Clone)]
pub struct NoticeEntry {
    pub timestamp: String,
    pub notice: Notice,
}

impl NoticeEntry {
    pub fn new(notice: Notice) -> Self {
        Self {
            timestamp: Local::now().format("%H:%M:%S.%3f").to_string(),
            notice,
        }
    }

    /// Format for display
    pub fn format_for_display(&self) -> String {
        format!("[{}] {}", self.timestamp, self.notice)
    }
}

/// Thread-safe ring buffer of notices. Clones share the same buffer.
#[derive(Clone, Default)]
pub struct NoticeBuffer {
    entries: Arc<Mutex<VecDeque<NoticeEntry>>>,
}

impl NoticeBuffer {
    pub fn new() -> Self {
        Self {
            entries: Arc::new(Mutex::new(VecDeque::with_capacity(MAX_NOTICES))),
        }
    }

    pub fn push(&self, notice: Notice) {
        let mut entries = self.lock();
        if entries.len() >= MAX_NOTICES {
            entries.pop_front();
        }
        entries.push_back(NoticeEntry::new(notice));
    }

    pub fn get_recent(&self, count: usize) -> Vec<NoticeEntry> {
        let entries = self.lock();
        entries.iter().rev().take(count).rev().cloned().collect()
    }

    pub fn notices(&self) -> Vec<Notice> {
        self.lock().iter().map(|e| e.notice.clone()).collect()
    }

    pub fn clear(&self) {
        self.lock().clear();
    }

    pub fn len(&self) -> usize {
        self.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.lock().is_empty()
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, VecDeque<NoticeEntry>> {
        // A poisoned buffer still holds valid notices
        self.entries.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl NoticeSink for NoticeBuffer {
    fn notify(&self, notice: Notice) {
        self.push(notice);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_keeps_recent() {
        let buffer = NoticeBuffer::new();
        for i in 0..(MAX_NOTICES + 5) {
            buffer.notify(Notice::CacheHit {
                path: format!("file_{}.csv", i),
            });
        }
        assert_eq!(buffer.len(), MAX_NOTICES);

        let recent = buffer.get_recent(1);
        assert_eq!(
            recent[0].notice,
            Notice::CacheHit {
                path: format!("file_{}.csv", MAX_NOTICES + 4)
            }
        );
    }

    #[test]
    fn test_clones_share_entries() {
        let buffer = NoticeBuffer::new();
        let handle = buffer.clone();
        handle.notify(Notice::CacheHit {
            path: "a.csv".into(),
        });
        assert_eq!(buffer.len(), 1);
        buffer.clear();
        assert!(handle.is_empty());
    }

    #[test]
    fn test_display() {
        let notice = Notice::CacheHit {
            path: "data.csv".into(),
        };
        assert_eq!(notice.to_string(), "Reading file from cache: data.csv");
        assert!(NoticeEntry::new(notice)
            .format_for_display()
            .ends_with("Reading file from cache: data.csv"));
    }
}
