//! Short code resolution with detached click counting.

use std::sync::Arc;

use tokio::sync::mpsc::{self, error::TrySendError};
use tracing::{debug, warn};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;
use crate::error::AppError;
use crate::utils::validation::is_valid_slug;

/// Resolves short codes to their original URL.
///
/// The click increment is handed to the background worker with a
/// non-blocking send, so the caller gets the URL as soon as the lookup
/// finishes. A full or closed queue loses the click; it never fails the
/// resolution.
pub struct RedirectService<L: LinkRepository + ?Sized = dyn LinkRepository> {
    repository: Arc<L>,
    click_sender: mpsc::Sender<ClickEvent>,
}

impl<L: LinkRepository + ?Sized> RedirectService<L> {
    pub fn new(repository: Arc<L>, click_sender: mpsc::Sender<ClickEvent>) -> Self {
        Self {
            repository,
            click_sender,
        }
    }

    /// Returns the original URL registered under `code`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link has this code.
    /// Returns [`AppError::Storage`] if the lookup itself fails.
    pub async fn resolve(&self, code: &str) -> Result<String, AppError> {
        // Nothing outside the slug charset can ever have been registered.
        if !is_valid_slug(code) {
            return Err(AppError::NotFound {
                code: code.to_string(),
            });
        }

        let link = self
            .repository
            .find_by_code(code)
            .await?
            .ok_or_else(|| AppError::NotFound {
                code: code.to_string(),
            })?;

        self.record_click(code);

        debug!(code, target = %link.original_url, "Resolved short code");
        Ok(link.original_url)
    }

    /// Whether the click queue still has a consumer.
    pub fn click_queue_open(&self) -> bool {
        !self.click_sender.is_closed()
    }

    /// Free slots left in the click queue.
    pub fn click_queue_capacity(&self) -> usize {
        self.click_sender.capacity()
    }

    fn record_click(&self, code: &str) {
        match self.click_sender.try_send(ClickEvent::new(code)) {
            Ok(()) => {}
            Err(TrySendError::Full(event)) => {
                warn!(code = %event.code, "Click queue full, dropping click");
            }
            Err(TrySendError::Closed(event)) => {
                warn!(code = %event.code, "Click queue closed, dropping click");
            }
        }
    }
}
