//! Owned byte payload stored in each queue node.
//!
//! Provides [`SmallPayload`], backed by `heapless::Vec<u8, N>` for payloads of up to `N`
//! bytes and by an exactly-sized heap buffer beyond that.  The heap copy is reserved with
//! `try_reserve_exact`, so running out of memory surfaces as
//! [`QueueError::AllocationFailed`](crate::QueueError::AllocationFailed) instead of aborting the process.
//!
//! [`copy_truncated`] is the bounded copy-out used when a node is removed into a
//! caller-supplied buffer.

use std::fmt;
use std::ops::Deref;

use crate::error::Result;

/// Copies `src` into `out` as a zero-terminated byte string, truncating if needed.
///
/// At most `out.len() - 1` bytes are copied and a `0` byte is written right after them.
/// Truncation is silent: the excess bytes are simply dropped.  An empty `out` receives
/// neither data nor a terminator.
///
/// Returns the number of payload bytes copied (excluding the terminator).
///
/// ```rust
/// use small_queue::copy_truncated;
///
/// let mut buf = [0xffu8; 4];
/// assert_eq!(copy_truncated(b"hello", &mut buf), 3);
/// assert_eq!(&buf, b"hel\0");
/// ```
pub fn copy_truncated(src: &[u8], out: &mut [u8]) -> usize {
    let Some(room) = out.len().checked_sub(1) else {
        return 0;
    };
    let n = src.len().min(room);
    out[..n].copy_from_slice(&src[..n]);
    out[n] = 0;
    if n < src.len() {
        tracing::debug!(bytes = src.len(), copied = n, "payload truncated on copy-out");
    }
    n
}

/// Storage for [`SmallPayload`]: inline up to `N` bytes, otherwise on the heap.
#[derive(Clone)]
enum PayloadData<const N: usize> {
    Stack(heapless::Vec<u8, N>),
    Heap(Vec<u8>),
}

/// An owned byte string that lives inline for up to `N` bytes, then on the heap.
///
/// Each queue node owns exactly one payload.  The bytes are copied in when the node is
/// created, so a payload never aliases caller memory.
#[derive(Clone)]
pub struct SmallPayload<const N: usize> {
    data: PayloadData<N>,
}

impl<const N: usize> SmallPayload<N> {
    /// Maximum allowed inline size in bytes (16 KB).
    pub const MAX_STACK_SIZE: usize = 16 * 1024;

    /// Copies `bytes` into a new payload.
    ///
    /// # Errors
    /// [`QueueError::AllocationFailed`](crate::QueueError::AllocationFailed) if `bytes` does not fit inline and the heap copy
    /// cannot be reserved.
    ///
    /// # Compile-Time Safety
    /// `N` must be non-zero and the payload must fit the 16 KB stack budget.
    ///
    /// ```rust,compile_fail
    /// use small_queue::SmallPayload;
    /// let p = SmallPayload::<0>::try_from_bytes(b"x");
    /// ```
    pub fn try_from_bytes(bytes: &[u8]) -> Result<Self> {
        const {
            assert!(N > 0, "SmallPayload N must be non-zero");
            assert!(
                std::mem::size_of::<Self>() <= Self::MAX_STACK_SIZE,
                "SmallPayload is too large! Reduce N."
            );
        }

        if bytes.len() <= N {
            let mut stack: heapless::Vec<u8, N> = heapless::Vec::new();
            match stack.extend_from_slice(bytes) {
                Ok(()) => Ok(Self {
                    data: PayloadData::Stack(stack),
                }),
                Err(_) => unreachable!("Stack capacity check failed in try_from_bytes"),
            }
        } else {
            let mut heap = Vec::new();
            heap.try_reserve_exact(bytes.len())?;
            heap.extend_from_slice(bytes);
            Ok(Self {
                data: PayloadData::Heap(heap),
            })
        }
    }

    /// Returns `true` if the bytes are stored inline.
    #[inline(always)]
    pub fn is_inline(&self) -> bool {
        matches!(self.data, PayloadData::Stack(_))
    }

    /// Returns the payload bytes.
    #[inline(always)]
    pub fn as_bytes(&self) -> &[u8] {
        match &self.data {
            PayloadData::Stack(v) => v.as_slice(),
            PayloadData::Heap(v) => v.as_slice(),
        }
    }

    /// Length in bytes.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.as_bytes().len()
    }

    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Copies the payload into `out` as a zero-terminated byte string.
    ///
    /// See [`copy_truncated`].
    #[inline]
    pub fn copy_into(&self, out: &mut [u8]) -> usize {
        copy_truncated(self.as_bytes(), out)
    }

    /// Converts the payload into an owned `Vec<u8>`.
    pub fn into_vec(self) -> Vec<u8> {
        match self.data {
            PayloadData::Stack(v) => v.as_slice().to_vec(),
            PayloadData::Heap(v) => v,
        }
    }
}

impl<const N: usize> Deref for SmallPayload<N> {
    type Target = [u8];

    fn deref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> AsRef<[u8]> for SmallPayload<N> {
    fn as_ref(&self) -> &[u8] {
        self.as_bytes()
    }
}

impl<const N: usize> fmt::Debug for SmallPayload<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&String::from_utf8_lossy(self.as_bytes()), f)
    }
}

impl<const N: usize, const M: usize> PartialEq<SmallPayload<M>> for SmallPayload<N> {
    fn eq(&self, other: &SmallPayload<M>) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}

impl<const N: usize> Eq for SmallPayload<N> {}

impl<const N: usize> PartialEq<[u8]> for SmallPayload<N> {
    fn eq(&self, other: &[u8]) -> bool {
        self.as_bytes() == other
    }
}

impl<'a, const N: usize> PartialEq<&'a str> for SmallPayload<N> {
    fn eq(&self, other: &&'a str) -> bool {
        self.as_bytes() == other.as_bytes()
    }
}
