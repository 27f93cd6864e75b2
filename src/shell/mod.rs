//! Offline cache worker.
//!
//! Keeps the app shell (the static assets needed to render the game page) in a
//! versioned cache and answers intercepted requests from it:
//!
//! - navigation requests go to the network first, falling back to cached pages
//!   and finally to the cached `/index.html`;
//! - app shell assets and everything else are served cache first.
//!
//! The worker is host-agnostic: the host hands it a [`Network`] and drives the
//! lifecycle (`install`, `activate`, `fetch`, `on_message`).

mod cache;
mod message;
mod request;
mod worker;

pub use cache::{Cache, CacheStorage};
pub use message::WorkerMessage;
pub use request::{Request, RequestMode, Response};
pub use worker::{Network, Route, ShellWorker, WorkerState};

use thiserror::Error;

/// Version tag baked into every cache name. Bumping it retires old caches on
/// the next activation.
pub const VERSION: &str = "snake-v1.0.0";

pub const APP_SHELL: [&str; 8] = [
    "/",
    "/index.html",
    "/styles.css",
    "/app.js",
    "/game.js",
    "/manifest.webmanifest",
    "/icons/icon-192.png",
    "/icons/icon-512.png",
];

/// Page served for navigations when both the network and the pages cache miss.
pub const OFFLINE_FALLBACK: &str = "/index.html";

pub fn shell_cache_name() -> String {
    format!("app-shell-{}", VERSION)
}

pub fn pages_cache_name() -> String {
    format!("pages-{}", VERSION)
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ShellError {
    /// The network request itself failed.
    #[error("network error fetching {url}: {reason}")]
    Network { url: String, reason: String },

    /// Offline, and nothing cached can stand in for the request.
    #[error("offline and no cached response for {url}")]
    Offline { url: String },

    /// An app shell asset could not be fetched, so nothing was cached.
    #[error("install failed on {path}: {reason}")]
    InstallFailed { path: String, reason: String },

    /// A lifecycle step was attempted out of order.
    #[error("worker is {actual}, expected {expected}")]
    InvalidState { expected: WorkerState, actual: WorkerState },
}
