//! Error type shared by every queue operation.

use std::collections::TryReserveError;
use thiserror::Error;

/// Result type for queue operations.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Reasons a queue operation can fail.
///
/// Every failure leaves the queue exactly as it was before the call.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    /// The operation targeted a handle that holds no queue (never created, or destroyed).
    #[error("queue handle is absent")]
    Absent,

    /// Removal was requested from a queue with no elements.
    #[error("queue is empty")]
    Empty,

    /// The allocator refused a payload copy or a slot reservation.
    #[error("allocation failed: {0}")]
    AllocationFailed(#[from] TryReserveError),

    /// The slot index type cannot address another node.
    #[error("slot index space exhausted ({limit} slots)")]
    SlotsExhausted { limit: usize },
}
