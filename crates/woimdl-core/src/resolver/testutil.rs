//! Canned transport for driving resolvers offline in tests.

use std::cell::RefCell;
use std::collections::HashMap;
use std::rc::Rc;

use crate::cache::CacheStore;
use crate::fetch::{Fetcher, Transport};

/// Serves canned bodies by URL and records every network request. URLs with
/// no canned body behave like a failed fetch (empty string).
pub(crate) struct StubTransport {
    pages: HashMap<String, String>,
    calls: Rc<RefCell<Vec<String>>>,
}

impl StubTransport {
    pub fn new() -> Self {
        Self {
            pages: HashMap::new(),
            calls: Rc::new(RefCell::new(Vec::new())),
        }
    }

    pub fn page(mut self, url: &str, body: &str) -> Self {
        self.pages.insert(url.to_string(), body.to_string());
        self
    }

    /// Shared handle to the request log; survives moving the transport into
    /// a fetcher.
    pub fn calls(&self) -> Rc<RefCell<Vec<String>>> {
        Rc::clone(&self.calls)
    }
}

impl Transport for StubTransport {
    fn get(&self, url: &str) -> String {
        self.calls.borrow_mut().push(url.to_string());
        self.pages.get(url).cloned().unwrap_or_default()
    }
}

pub(crate) fn fetcher(
    dir: &std::path::Path,
    transport: StubTransport,
) -> Fetcher<StubTransport> {
    Fetcher::new(transport, CacheStore::new(dir))
}
