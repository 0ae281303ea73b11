//! Transient user notifications.
//!
//! Pages push notices while they work; the binary drains and prints them
//! to stderr after each page step.

use std::fmt;
use std::io::{self, Write};
use std::sync::{Arc, Mutex, PoisonError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeLevel {
    Success,
    Info,
    Warning,
    Error,
}

impl fmt::Display for NoticeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Success => "ok",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notice {
    pub level: NoticeLevel,
    pub message: String,
}

impl Notice {
    pub fn new(level: NoticeLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }
}

/// Shared notice queue. Clones share the same queue.
#[derive(Debug, Clone, Default)]
pub struct Notices {
    inner: Arc<Mutex<Vec<Notice>>>,
}

impl Notices {
    pub fn push(&self, notice: Notice) {
        self.inner
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notice);
    }

    pub fn success(&self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Success, message));
    }

    pub fn info(&self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Info, message));
    }

    pub fn warning(&self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Warning, message));
    }

    pub fn error(&self, message: impl Into<String>) {
        self.push(Notice::new(NoticeLevel::Error, message));
    }

    /// Take every queued notice.
    pub fn drain(&self) -> Vec<Notice> {
        std::mem::take(&mut *self.inner.lock().unwrap_or_else(PoisonError::into_inner))
    }

    /// Drain and print notices as `[level] message` lines. Returns whether
    /// any of them was an error.
    pub fn flush_to(&self, w: &mut impl Write) -> io::Result<bool> {
        let mut any_error = false;
        for notice in self.drain() {
            any_error |= notice.level == NoticeLevel::Error;
            writeln!(w, "[{}] {}", notice.level, notice.message)?;
        }
        Ok(any_error)
    }
}
