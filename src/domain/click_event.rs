//! Click event model for detached click counting.

use chrono::{DateTime, Utc};

/// A successful resolution waiting to be counted.
///
/// Created by [`crate::application::services::RedirectService`] after the
/// target URL is known, sent over a bounded channel and consumed by
/// [`crate::domain::click_worker::run_click_worker`]. The redirect response
/// never waits for it.
#[derive(Debug, Clone)]
pub struct ClickEvent {
    pub code: String,
    pub resolved_at: DateTime<Utc>,
}

impl ClickEvent {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            resolved_at: Utc::now(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_click_event_creation() {
        let before = Utc::now();
        let event = ClickEvent::new("abc123");

        assert_eq!(event.code, "abc123");
        assert!(event.resolved_at >= before);
    }
}
