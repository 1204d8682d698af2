//! Recording of the active page number, kept for observability only. The
//! listing never reads a recorded value back.

use std::collections::HashMap;

/// Session key under which the active page number is stored.
pub const PAGE_SESSION_KEY: &str = "page";

/// Receives the active page number every time the visible slice is
/// recomputed.
pub trait PageRecorder {
    fn record_page(&mut self, page: usize);
}

/// Discards every page number.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopRecorder;

impl PageRecorder for NoopRecorder {
    fn record_page(&mut self, _page: usize) {}
}

/// In-memory, session-scoped key/value storage. Dropped with the session.
#[derive(Debug, Default, Clone)]
pub struct SessionPageStore {
    entries: HashMap<String, String>,
}

impl SessionPageStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// The last recorded page number, if any.
    #[must_use]
    pub fn last_page(&self) -> Option<usize> {
        self.get(PAGE_SESSION_KEY)?.parse().ok()
    }
}

impl PageRecorder for SessionPageStore {
    fn record_page(&mut self, page: usize) {
        self.entries
            .insert(PAGE_SESSION_KEY.to_owned(), page.to_string());
    }
}
