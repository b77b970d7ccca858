//! Navigation abstraction backing the filter state.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use tokio::sync::watch;

/// Read/replace access to the query string of the current navigation entry.
///
/// `replace_query` must overwrite the current entry rather than push a new
/// one, and must not trigger any scroll or reload.
pub trait Location: Send + Sync {
    /// Current query string, without the leading `?`.
    fn query(&self) -> String;

    /// Replace the current entry's query string (`""` clears it).
    fn replace_query(&self, query: &str);
}

impl<L: Location + ?Sized> Location for Arc<L> {
    fn query(&self) -> String {
        (**self).query()
    }

    fn replace_query(&self, query: &str) {
        (**self).replace_query(query);
    }
}

/// In-process location: a fixed path plus a replaceable query string.
///
/// Subscribers see replacements through a `watch` channel, so they observe
/// the change after the writer returns, the way a router notifies components.
#[derive(Debug)]
pub struct MemoryLocation {
    path: String,
    query: watch::Sender<String>,
    replacements: AtomicUsize,
}

impl MemoryLocation {
    #[must_use]
    pub fn new(path: impl Into<String>, query: impl Into<String>) -> Self {
        let query: String = query.into();
        let (tx, _) = watch::channel(query.trim_start_matches('?').to_owned());
        Self { path: path.into(), query: tx, replacements: AtomicUsize::new(0) }
    }

    /// Split `href` (`/projects?status=planned`) into path and query.
    #[must_use]
    pub fn from_href(href: &str) -> Self {
        match href.split_once('?') {
            Some((path, query)) => Self::new(path, query),
            None => Self::new(href, ""),
        }
    }

    #[must_use]
    pub fn path(&self) -> &str {
        &self.path
    }

    /// `path` alone when the query is empty, `path?query` otherwise.
    #[must_use]
    pub fn href(&self) -> String {
        let query = self.query.borrow();
        if query.is_empty() { self.path.clone() } else { format!("{}?{}", self.path, *query) }
    }

    /// Number of times the query has been replaced.
    #[must_use]
    pub fn replacements(&self) -> usize {
        self.replacements.load(Ordering::SeqCst)
    }

    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.query.subscribe()
    }
}

impl Location for MemoryLocation {
    fn query(&self) -> String {
        self.query.borrow().clone()
    }

    fn replace_query(&self, query: &str) {
        self.query.send_replace(query.to_owned());
        self.replacements.fetch_add(1, Ordering::SeqCst);
    }
}
