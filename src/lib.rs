//! # Small Queue
//!
//! A doubly-linked queue of owned text payloads whose nodes live in an index-linked arena,
//! with small payloads stored inline in each node.
//!
//! This crate provides `StringQueue`, `SmallPayload`, and the `QueueHandle` trait for code
//! that keeps a queue behind an `Option`.
//!
//! ## Key Features
//!
//! * **Constant-time ends:** `insert_head`, `insert_tail`, `remove_head` and `len` are O(1).
//! * **Allocation-free reversal:** `reverse` swaps the links of every node in place.
//! * **No dangling links:** nodes refer to each other by slot index, and freed slots are
//!   recycled through a free-list.
//! * **Inline payloads:** payloads of up to `N` bytes are stored in a `heapless::Vec` inside
//!   the node; longer ones get an exactly-sized heap buffer.
//! * **Fallible allocation:** running out of memory is reported as `QueueError::AllocationFailed`
//!   and leaves the queue untouched.
//!
//! ## Generic parameters
//!
//! * **`N`:** inline payload capacity in bytes.  Must be non-zero.
//! * **`I`:** slot index type (`u8`, `u16`, `u32`).  Narrower indices shrink every node but
//!   cap the number of nodes (255 for `u8`, 65535 for `u16`).
//!
//! ## Examples
//!
//! ### FIFO and LIFO
//!
//! ```rust
//! use small_queue::StringQueue;
//!
//! let mut q: StringQueue<16> = StringQueue::new();
//!
//! q.insert_tail("a").unwrap();
//! q.insert_tail("b").unwrap();
//! q.insert_head("first").unwrap();
//!
//! assert_eq!(q.len(), 3);
//! assert_eq!(q.head(), Some(&b"first"[..]));
//! assert_eq!(q.tail(), Some(&b"b"[..]));
//! ```
//!
//! ### Bounded copy-out
//!
//! ```rust
//! use small_queue::StringQueue;
//!
//! let mut q: StringQueue<16> = StringQueue::new();
//! q.insert_tail("truncate me").unwrap();
//!
//! // Room for 8 bytes plus the terminator.
//! let mut buf = [0u8; 9];
//! assert_eq!(q.remove_head(Some(&mut buf)).unwrap(), 8);
//! assert_eq!(&buf, b"truncate\0");
//! assert!(q.is_empty());
//! ```
//!
//! ### Reversal
//!
//! ```rust
//! use small_queue::StringQueue;
//!
//! let mut q: StringQueue<8, u8> = StringQueue::new();
//! for s in ["a", "b", "c"] {
//!     q.insert_tail(s).unwrap();
//! }
//! q.reverse();
//!
//! assert_eq!(q.head(), Some(&b"c"[..]));
//! assert_eq!(q.tail(), Some(&b"a"[..]));
//! ```

// --- Module Declarations ---

pub mod error;
pub mod handle;
pub mod payload;
pub mod queue;
pub mod utils;

// --- Re-exports ---

pub use error::{QueueError, Result};
#[cfg(feature = "handle")]
pub use handle::QueueHandle;
pub use payload::{SmallPayload, copy_truncated};
pub use queue::{AnyStringQueue, StringQueue};
pub use utils::index_type::IndexType;
