use std::fmt;

use log::{debug, info, warn};

use super::{
    pages_cache_name, shell_cache_name, CacheStorage, Request, RequestMode, Response, ShellError,
    WorkerMessage, APP_SHELL, OFFLINE_FALLBACK, VERSION,
};

/// Whatever actually talks to the network on the worker's behalf.
pub trait Network {
    fn fetch(&mut self, request: &Request) -> Result<Response, ShellError>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WorkerState {
    Parsed,
    Installing,
    Installed,
    Activating,
    Activated,
    /// Install failed; the worker never serves anything.
    Redundant,
}

impl WorkerState {
    pub fn can_intercept_fetch(&self) -> bool {
        matches!(self, WorkerState::Activated)
    }
}

impl fmt::Display for WorkerState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            WorkerState::Parsed => "parsed",
            WorkerState::Installing => "installing",
            WorkerState::Installed => "installed",
            WorkerState::Activating => "activating",
            WorkerState::Activated => "activated",
            WorkerState::Redundant => "redundant",
        };
        f.write_str(s)
    }
}

/// How an intercepted request is answered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    /// Network first, then the pages cache, then the offline fallback page.
    Navigation,
    /// Listed in the app shell: cache first.
    ShellAsset,
    /// Cache first, network fallback.
    Other,
}

impl Route {
    pub fn for_request(request: &Request) -> Route {
        if request.mode() == RequestMode::Navigate {
            Route::Navigation
        } else if APP_SHELL.contains(&request.path()) {
            Route::ShellAsset
        } else {
            Route::Other
        }
    }
}

pub struct ShellWorker<N: Network> {
    network: N,
    caches: CacheStorage,
    state: WorkerState,
    skip_waiting: bool,
    clients_claimed: bool,
}

impl<N: Network> ShellWorker<N> {
    /// A fresh worker over the caches left behind by earlier versions.
    pub fn new(network: N, caches: CacheStorage) -> Self {
        ShellWorker { network, caches, state: WorkerState::Parsed, skip_waiting: false, clients_claimed: false }
    }

    pub fn state(&self) -> WorkerState {
        self.state
    }

    pub fn caches(&self) -> &CacheStorage {
        &self.caches
    }

    pub fn network(&mut self) -> &mut N {
        &mut self.network
    }

    pub fn clients_claimed(&self) -> bool {
        self.clients_claimed
    }

    /// Installed and allowed to take over without waiting for old pages to close.
    pub fn wants_activation(&self) -> bool {
        self.state == WorkerState::Installed && self.skip_waiting
    }

    /// Fetches every app shell asset into the shell cache. All or nothing: if
    /// any asset fails, nothing is stored and the worker becomes redundant.
    pub fn install(&mut self) -> Result<(), ShellError> {
        self.expect_state(WorkerState::Parsed)?;
        self.state = WorkerState::Installing;

        let mut fetched = Vec::with_capacity(APP_SHELL.len());
        for path in APP_SHELL.iter() {
            let failure = match self.network.fetch(&Request::get(*path)) {
                Ok(response) if response.is_ok() => {
                    fetched.push((*path, response));
                    continue;
                }
                Ok(response) => format!("status {}", response.status),
                Err(e) => e.to_string(),
            };

            warn!("install of {} failed on {}: {}", VERSION, path, failure);
            self.state = WorkerState::Redundant;
            return Err(ShellError::InstallFailed { path: path.to_string(), reason: failure });
        }

        let cache = self.caches.open(&shell_cache_name());
        for (path, response) in fetched {
            cache.put(path, response);
        }

        self.state = WorkerState::Installed;
        self.skip_waiting = true;
        info!("installed {} ({} shell assets)", VERSION, APP_SHELL.len());
        Ok(())
    }

    /// Drops caches from other versions and claims open pages. Returns the
    /// names of the deleted caches.
    pub fn activate(&mut self) -> Result<Vec<String>, ShellError> {
        self.expect_state(WorkerState::Installed)?;
        self.state = WorkerState::Activating;

        let stale: Vec<String> = self.caches.keys()
            .into_iter()
            .filter(|name| !name.ends_with(VERSION))
            .collect();
        for name in &stale {
            self.caches.delete(name);
            debug!("deleted stale cache {}", name);
        }

        self.clients_claimed = true;
        self.state = WorkerState::Activated;
        info!("activated {}, dropped {} stale caches", VERSION, stale.len());
        Ok(stale)
    }

    /// Answers a request the page made. Before activation requests go
    /// straight to the network.
    pub fn fetch(&mut self, request: &Request) -> Result<Response, ShellError> {
        if !self.state.can_intercept_fetch() {
            return self.network.fetch(request);
        }

        let route = Route::for_request(request);
        debug!("{:?} {}", route, request.url());

        match route {
            Route::Navigation => self.network_first(request),
            Route::ShellAsset | Route::Other => self.cache_first(request),
        }
    }

    /// Handles a message posted by a page. Returns whether it was understood.
    pub fn on_message(&mut self, raw: &str) -> bool {
        match WorkerMessage::parse(raw) {
            Some(WorkerMessage::SkipWaiting) => {
                info!("skip-waiting requested");
                self.skip_waiting = true;
                true
            }
            None => {
                debug!("ignoring message {}", raw);
                false
            }
        }
    }

    ///////////////////////////////////////////////////////////////////////////

    fn network_first(&mut self, request: &Request) -> Result<Response, ShellError> {
        match self.network.fetch(request) {
            Ok(fresh) => {
                self.caches.open(&pages_cache_name()).put(request.key(), fresh.clone());
                Ok(fresh)
            }
            Err(e) => {
                warn!("navigation to {} failed, trying cache: {}", request.url(), e);
                let cached = self.caches.get(&pages_cache_name())
                    .and_then(|pages| pages.lookup(request.key()))
                    .or_else(|| self.caches.lookup(OFFLINE_FALLBACK));

                cached.cloned().ok_or_else(|| ShellError::Offline { url: request.url().to_string() })
            }
        }
    }

    fn cache_first(&mut self, request: &Request) -> Result<Response, ShellError> {
        match self.caches.lookup(request.key()) {
            Some(cached) => Ok(cached.clone()),
            None => self.network.fetch(request),
        }
    }

    fn expect_state(&self, expected: WorkerState) -> Result<(), ShellError> {
        if self.state == expected {
            Ok(())
        } else {
            Err(ShellError::InvalidState { expected, actual: self.state })
        }
    }
}
