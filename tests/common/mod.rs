#![allow(dead_code)]

use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use urlbite::config::RegistrationConfig;
use urlbite::domain::click_event::ClickEvent;
use urlbite::domain::entities::NewShortLink;
use urlbite::domain::repositories::{InsertOutcome, LinkRepository};
use urlbite::infrastructure::persistence::MemoryLinkRepository;
use urlbite::state::AppState;

pub const BASE_URL: &str = "https://s.example.com";

pub fn test_registration() -> RegistrationConfig {
    RegistrationConfig {
        base_url: BASE_URL.to_string(),
        code_length: 6,
        max_attempts: 10,
        timeout: Duration::from_secs(5),
    }
}

/// State over a fresh in-memory registry. The click receiver is returned
/// undrained so tests can inspect queued events.
pub fn create_test_state() -> (
    AppState,
    mpsc::Receiver<ClickEvent>,
    Arc<MemoryLinkRepository>,
) {
    let repo = Arc::new(MemoryLinkRepository::new());
    let (tx, rx) = mpsc::channel(100);

    let state = AppState::new(repo.clone(), tx, test_registration());

    (state, rx, repo)
}

pub async fn create_test_link(repo: &MemoryLinkRepository, code: &str, url: &str) {
    let outcome = repo
        .try_insert(NewShortLink::new(code, url))
        .await
        .unwrap();

    assert!(matches!(outcome, InsertOutcome::Inserted(_)));
}
