//! Remote content loading seam.
//!
//! Dialog bodies can be given either literal text or a location to fetch
//! content from. Fetching goes through the [`Requester`] trait so the
//! transport is injectable; the crate ships a table-backed implementation
//! for tests and demos and a null implementation that always fails.

use std::collections::HashMap;

use tracing::warn;

/// Outcome of a content request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestResult {
    pub is_success: bool,
    pub status_code: Option<u16>,
    pub content: String,
}

impl RequestResult {
    /// A successful 200 result carrying `content`.
    pub fn ok(content: impl Into<String>) -> Self {
        Self {
            is_success: true,
            status_code: Some(200),
            content: content.into(),
        }
    }

    /// A failed result with an optional status code.
    pub fn failed(status_code: Option<u16>) -> Self {
        Self {
            is_success: false,
            status_code,
            content: String::new(),
        }
    }
}

/// Fetches content for dialog bodies.
pub trait Requester {
    fn get(&mut self, location: &str) -> RequestResult;
}

/// Whether a content string should be treated as a location to fetch rather
/// than literal text.
pub fn is_url_or_path(content: &str) -> bool {
    content.starts_with("http://")
        || content.starts_with("https://")
        || content.starts_with('/')
        || content.starts_with("./")
        || content.starts_with("../")
}

/// A requester backed by a fixed route table.
#[derive(Default)]
pub struct StaticRequester {
    routes: HashMap<String, String>,
}

impl StaticRequester {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a location and the content it serves (builder).
    pub fn with_route(mut self, location: impl Into<String>, content: impl Into<String>) -> Self {
        self.routes.insert(location.into(), content.into());
        self
    }
}

impl Requester for StaticRequester {
    fn get(&mut self, location: &str) -> RequestResult {
        match self.routes.get(location) {
            Some(content) => RequestResult::ok(content.clone()),
            None => {
                warn!(target: "casement::request", location, "no route for location");
                RequestResult::failed(Some(404))
            }
        }
    }
}

/// A requester with no transport at all. Every request fails.
pub struct NullRequester;

impl Requester for NullRequester {
    fn get(&mut self, location: &str) -> RequestResult {
        warn!(target: "casement::request", location, "no requester configured");
        RequestResult::failed(None)
    }
}
