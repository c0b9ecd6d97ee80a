#![cfg(feature = "handle")]
//! Queue operations over a handle that may not hold a queue.
//!
//! A [`StringQueue`] is always valid once constructed.  Code that needs a handle which can
//! be "not created yet" or "already destroyed" keeps an `Option<StringQueue>` and drives
//! it through [`QueueHandle`]: mutations on `None` report [`QueueError::Absent`], `size`
//! reports `0`, and `reverse`/`destroy` do nothing.
//!
//! ```rust
//! use small_queue::{QueueError, QueueHandle, StringQueue};
//!
//! let mut handle: Option<StringQueue<8>> = QueueHandle::create();
//! handle.insert_tail("job").unwrap();
//! assert_eq!(handle.size(), 1);
//!
//! handle.destroy();
//! assert_eq!(handle.size(), 0);
//! assert_eq!(handle.insert_tail("late"), Err(QueueError::Absent));
//! ```

use crate::error::{QueueError, Result};
use crate::queue::StringQueue;
use crate::utils::index_type::IndexType;

/// Absent-tolerant queue operations.
pub trait QueueHandle {
    /// Returns a handle holding a new, empty queue.
    fn create() -> Self;

    /// Inserts at the head; [`QueueError::Absent`] if there is no queue.
    fn insert_head(&mut self, value: impl AsRef<[u8]>) -> Result<()>;

    /// Inserts at the tail; [`QueueError::Absent`] if there is no queue.
    fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> Result<()>;

    /// Removes the head into `out`; [`QueueError::Absent`] if there is no queue,
    /// [`QueueError::Empty`] if the queue has no elements.
    fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize>;

    /// Number of elements, or `0` if there is no queue.
    fn size(&self) -> usize;

    /// Reverses the queue; does nothing if there is no queue.
    fn reverse(&mut self);

    /// Releases the queue and every element in it, leaving the handle empty.
    /// Does nothing if there is no queue.
    fn destroy(&mut self);
}

fn absent(op: &'static str) -> QueueError {
    tracing::debug!(op, "operation on absent queue handle");
    QueueError::Absent
}

impl<const N: usize, I: IndexType> QueueHandle for Option<StringQueue<N, I>> {
    fn create() -> Self {
        Some(StringQueue::new())
    }

    fn insert_head(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        match self {
            Some(q) => q.insert_head(value),
            None => Err(absent("insert_head")),
        }
    }

    fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        match self {
            Some(q) => q.insert_tail(value),
            None => Err(absent("insert_tail")),
        }
    }

    fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize> {
        match self {
            Some(q) => q.remove_head(out),
            None => Err(absent("remove_head")),
        }
    }

    fn size(&self) -> usize {
        self.as_ref().map_or(0, StringQueue::len)
    }

    fn reverse(&mut self) {
        if let Some(q) = self {
            q.reverse();
        }
    }

    fn destroy(&mut self) {
        if let Some(q) = self.take() {
            q.destroy();
        }
    }
}
