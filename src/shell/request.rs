#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestMode {
    /// A top-level page load.
    Navigate,
    /// Subresources: scripts, styles, images, API calls.
    Other,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Request {
    url: String,
    key: String,
    mode: RequestMode,
}

impl Request {
    pub fn new(url: impl Into<String>, mode: RequestMode) -> Self {
        let url = url.into();
        let key = cache_key(&url);
        Request { url, key, mode }
    }

    pub fn navigate(url: impl Into<String>) -> Self {
        Self::new(url, RequestMode::Navigate)
    }

    pub fn get(url: impl Into<String>) -> Self {
        Self::new(url, RequestMode::Other)
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn mode(&self) -> RequestMode {
        self.mode
    }

    /// Path plus query, with the origin and fragment stripped. Cache entries
    /// are keyed by this.
    pub fn key(&self) -> &str {
        &self.key
    }

    /// Just the path, the way app shell entries are listed.
    pub fn path(&self) -> &str {
        let key = self.key();
        match key.find('?') {
            Some(query) => &key[..query],
            None => key,
        }
    }
}

fn cache_key(url: &str) -> String {
    let without_origin = match url.find("://") {
        Some(scheme_end) => {
            let rest = &url[scheme_end + 3..];
            // The authority ends at the first of '/', '?' or '#'.
            match rest.find(|c| matches!(c, '/' | '?' | '#')) {
                Some(end) if rest[end..].starts_with('/') => rest[end..].to_string(),
                Some(end) => format!("/{}", &rest[end..]),
                None => "/".to_string(),
            }
        }
        None => url.to_string(),
    };

    match without_origin.find('#') {
        Some(hash) => without_origin[..hash].to_string(),
        None => without_origin,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Response {
    pub status: u16,
    pub body: Vec<u8>,
}

impl Response {
    pub fn new(status: u16, body: impl Into<Vec<u8>>) -> Self {
        Response { status, body: body.into() }
    }

    pub fn ok(body: impl Into<Vec<u8>>) -> Self {
        Self::new(200, body)
    }

    pub fn is_ok(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
