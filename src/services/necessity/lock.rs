use dashmap::DashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};

use super::model::GenerationKey;

/// Process-wide mutex per generation key.
///
/// Two runs for the same key queue behind each other so their delete and
/// insert phases never interleave. Runs for different keys do not contend.
/// Entries are removed once the last holder or waiter is gone.
#[derive(Debug, Clone, Default)]
pub struct GenerationLocks {
    slots: Arc<DashMap<GenerationKey, Arc<Mutex<()>>>>,
}

impl GenerationLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: GenerationKey) -> GenerationGuard {
        let slot = self
            .slots
            .entry(key)
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();
        let guard = slot.lock_owned().await;
        GenerationGuard {
            key,
            slots: self.slots.clone(),
            guard: Some(guard),
        }
    }

    /// Number of keys currently held or awaited.
    pub fn active_keys(&self) -> usize {
        self.slots.len()
    }
}

pub struct GenerationGuard {
    key: GenerationKey,
    slots: Arc<DashMap<GenerationKey, Arc<Mutex<()>>>>,
    guard: Option<OwnedMutexGuard<()>>,
}

impl Drop for GenerationGuard {
    fn drop(&mut self) {
        // release the mutex before checking who else still references it
        drop(self.guard.take());
        // map entry + nobody else: safe to forget the slot
        self.slots
            .remove_if(&self.key, |_, slot| Arc::strong_count(slot) == 1);
    }
}
