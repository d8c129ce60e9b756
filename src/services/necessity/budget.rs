use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};

use crate::errors::ServiceError;

/// Cooperative deadline and cancel flag for one generation run.
///
/// The engine calls [`GenerationBudget::check`] between plan entries and
/// between insert batches. A failed check aborts the run and the open
/// transaction rolls back.
#[derive(Debug, Clone)]
pub struct GenerationBudget {
    deadline: Option<Instant>,
    timeout: Option<Duration>,
    cancelled: Arc<AtomicBool>,
}

impl GenerationBudget {
    pub fn new(timeout: Option<Duration>) -> Self {
        Self {
            deadline: timeout.map(|t| Instant::now() + t),
            timeout,
            cancelled: Arc::new(AtomicBool::new(false)),
        }
    }

    pub fn unlimited() -> Self {
        Self::new(None)
    }

    /// Handle that cancels this budget from another task.
    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(self.cancelled.clone())
    }

    pub fn check(&self) -> Result<(), ServiceError> {
        if self.cancelled.load(Ordering::Relaxed) {
            return Err(ServiceError::Cancelled(
                "necessity generation was cancelled".to_string(),
            ));
        }
        if let (Some(deadline), Some(timeout)) = (self.deadline, self.timeout) {
            if Instant::now() >= deadline {
                return Err(ServiceError::Cancelled(format!(
                    "necessity generation exceeded its {}s deadline",
                    timeout.as_secs()
                )));
            }
        }
        Ok(())
    }
}

#[derive(Debug, Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}
