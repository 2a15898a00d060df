//! Transaction confirmation waiter.

pub mod cancel;
pub mod confirmation;

// Re-export main types
pub use cancel::{CancelReason, CancelToken};
pub use confirmation::{wait_finalized, wait_mined, ConfirmationSource};
