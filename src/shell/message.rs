use serde::{Deserialize, Serialize};

/// Control messages the page posts to the worker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "kebab-case")]
pub enum WorkerMessage {
    /// Activate the waiting worker now instead of when every page closes.
    SkipWaiting,
}

impl WorkerMessage {
    pub fn to_json(&self) -> String {
        // A unit variant with an internal tag always serializes.
        serde_json::to_string(self).unwrap_or_default()
    }

    /// Parses a posted message. Anything that is not a known message shape
    /// yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        serde_json::from_str(raw).ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_shape() {
        assert_eq!(WorkerMessage::SkipWaiting.to_json(), r#"{"type":"skip-waiting"}"#);
        assert_eq!(WorkerMessage::parse(r#"{"type":"skip-waiting"}"#), Some(WorkerMessage::SkipWaiting));
    }

    #[test]
    fn unknown_shapes_are_ignored() {
        assert_eq!(WorkerMessage::parse(r#"{"type":"claim"}"#), None);
        assert_eq!(WorkerMessage::parse(r#"{"kind":"skip-waiting"}"#), None);
        assert_eq!(WorkerMessage::parse("skip-waiting"), None);
    }
}
