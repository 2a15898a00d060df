//! Cancellation signal for waiter operations.
//!
//! A `CancelToken` fires either when `cancel()` is called on any clone or
//! when its deadline passes, whichever comes first.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::watch;
use tokio::time::{sleep_until, Instant};

/// Why a wait was cancelled
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CancelReason {
    /// `cancel()` was called
    Cancelled,
    /// The token's deadline passed
    DeadlineExceeded,
}

impl fmt::Display for CancelReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CancelReason::Cancelled => f.write_str("cancelled"),
            CancelReason::DeadlineExceeded => f.write_str("deadline exceeded"),
        }
    }
}

/// Clonable cancellation signal with an optional deadline
///
/// **Public** - passed to `wait_mined` / `wait_finalized`
#[derive(Debug, Clone)]
pub struct CancelToken {
    state: Arc<watch::Sender<Option<CancelReason>>>,
    deadline: Option<Instant>,
}

impl Default for CancelToken {
    fn default() -> Self {
        Self::new()
    }
}

impl CancelToken {
    /// Token that only fires on explicit `cancel()`
    pub fn new() -> Self {
        let (state, _) = watch::channel(None);
        Self {
            state: Arc::new(state),
            deadline: None,
        }
    }

    /// Token that also fires `timeout` from now
    pub fn with_timeout(timeout: Duration) -> Self {
        Self::with_deadline(Instant::now() + timeout)
    }

    /// Token that also fires at `deadline`
    pub fn with_deadline(deadline: Instant) -> Self {
        Self {
            deadline: Some(deadline),
            ..Self::new()
        }
    }

    /// Deadline, if any
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Fire the signal for this token and every clone of it
    pub fn cancel(&self) {
        self.state.send_if_modified(|reason| {
            if reason.is_some() {
                return false;
            }
            *reason = Some(CancelReason::Cancelled);
            true
        });
    }

    /// Reason the token fired, or `None` while it is still live
    pub fn reason(&self) -> Option<CancelReason> {
        if let Some(reason) = *self.state.borrow() {
            return Some(reason);
        }
        match self.deadline {
            Some(deadline) if Instant::now() >= deadline => Some(CancelReason::DeadlineExceeded),
            _ => None,
        }
    }

    /// True once the token has fired
    pub fn is_cancelled(&self) -> bool {
        self.reason().is_some()
    }

    /// Resolve once the token fires
    ///
    /// Cancel-safe: dropping the future has no side effects.
    pub async fn cancelled(&self) -> CancelReason {
        let mut rx = self.state.subscribe();
        let explicit = async move {
            loop {
                let current = *rx.borrow_and_update();
                if let Some(reason) = current {
                    return reason;
                }
                // The sender lives as long as `self`, so this only errors
                // after the token is gone.
                if rx.changed().await.is_err() {
                    std::future::pending::<()>().await;
                }
            }
        };

        match self.deadline {
            Some(deadline) => tokio::select! {
                reason = explicit => reason,
                _ = sleep_until(deadline) => CancelReason::DeadlineExceeded,
            },
            None => explicit.await,
        }
    }
}
