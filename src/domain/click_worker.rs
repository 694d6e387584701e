//! Background worker applying click-count increments.

use std::sync::Arc;

use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tracing::{debug, error, info};

use crate::domain::click_event::ClickEvent;
use crate::domain::repositories::LinkRepository;

/// Drains the click queue until every sender is dropped.
///
/// Up to `concurrency` increments run at the same time. A failed increment
/// is logged and discarded; it is never retried and never reported back to
/// the request that produced it. Events still queued when the channel closes
/// are processed before the worker returns.
pub async fn run_click_worker<L>(
    mut rx: mpsc::Receiver<ClickEvent>,
    repository: Arc<L>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = permits.clone().acquire_owned().await else {
            break;
        };

        let repository = repository.clone();
        tasks.spawn(async move {
            let _permit = permit;
            process_click(repository.as_ref(), event).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}

    info!("Click worker stopped");
}

/// Applies a single increment. Returns whether it succeeded.
pub async fn process_click<L>(repository: &L, event: ClickEvent) -> bool
where
    L: LinkRepository + ?Sized,
{
    match repository.increment_click_count(&event.code).await {
        Ok(()) => {
            debug!(code = %event.code, "Click counted");
            true
        }
        Err(e) => {
            error!(code = %event.code, resolved_at = %event.resolved_at, "Failed to update click count: {}", e);
            false
        }
    }
}
