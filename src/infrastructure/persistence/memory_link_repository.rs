//! In-process link repository.
//!
//! Used with `STORAGE_BACKEND=memory` for local runs and by tests that do not
//! need PostgreSQL. Contents are lost on restart.

use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;
use chrono::Utc;

use crate::domain::entities::{NewShortLink, ShortLink};
use crate::domain::repositories::{InsertOutcome, LinkRepository};
use crate::error::StorageError;

#[derive(Default)]
struct Inner {
    links: HashMap<String, ShortLink>,
    next_id: i64,
}

/// Link repository backed by a mutex-guarded map.
///
/// The conditional insert holds the lock across the lookup and the write, so
/// it gives the same uniqueness guarantee as the database constraint.
#[derive(Default)]
pub struct MemoryLinkRepository {
    inner: Mutex<Inner>,
}

impl MemoryLinkRepository {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> Result<MutexGuard<'_, Inner>, StorageError> {
        self.inner
            .lock()
            .map_err(|_| StorageError::Unavailable("link map lock poisoned".to_string()))
    }
}

#[async_trait]
impl LinkRepository for MemoryLinkRepository {
    async fn find_by_code(&self, code: &str) -> Result<Option<ShortLink>, StorageError> {
        Ok(self.lock()?.links.get(code).cloned())
    }

    async fn try_insert(&self, new_link: NewShortLink) -> Result<InsertOutcome, StorageError> {
        let mut guard = self.lock()?;
        let inner = &mut *guard;
        let id = inner.next_id + 1;

        match inner.links.entry(new_link.short_code) {
            Entry::Occupied(_) => Ok(InsertOutcome::AlreadyExists),
            Entry::Vacant(slot) => {
                let link = ShortLink::new(
                    id,
                    slot.key().clone(),
                    new_link.original_url,
                    0,
                    Utc::now(),
                );
                slot.insert(link.clone());
                inner.next_id = id;
                Ok(InsertOutcome::Inserted(link))
            }
        }
    }

    async fn increment_click_count(&self, code: &str) -> Result<(), StorageError> {
        if let Some(link) = self.lock()?.links.get_mut(code) {
            link.click_count += 1;
        }
        Ok(())
    }

    async fn count(&self) -> Result<i64, StorageError> {
        Ok(self.lock()?.links.len() as i64)
    }

    async fn total_clicks(&self) -> Result<i64, StorageError> {
        Ok(self.lock()?.links.values().map(|l| l.click_count).sum())
    }
}
