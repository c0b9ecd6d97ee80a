//! Arena-backed doubly-linked queue of owned text payloads.
//!
//! Provides [`StringQueue`], a queue supporting insertion at both ends, removal from the
//! head, O(1) size and in-place reversal.  [`AnyStringQueue`] is an object-safe trait over
//! both `StringQueue` and the standard library's `VecDeque<Vec<u8>>`.
//!
//! # Design rationale
//! Nodes live in a growable slot table and link to each other by **index** instead of by
//! pointer.  Links are stored Struct-of-Arrays style (`prevs`, `nexts`, `payloads`), and
//! released slots are threaded onto an intrusive free-list through `nexts`, so steady-state
//! churn never grows the table.  Reversal swaps the two link fields of every live slot and
//! then swaps `head` and `tail`; it neither allocates nor frees.

use core::mem;
use std::collections::VecDeque;
use std::fmt;

use crate::error::{QueueError, Result};
use crate::payload::{SmallPayload, copy_truncated};
use crate::utils::index_type::IndexType;

// ─── AnyStringQueue ───────────────────────────────────────────────────────────

/// An object-safe abstraction over text queue types.
///
/// Implemented by both `VecDeque<Vec<u8>>` (heap reference) and [`StringQueue`] so that
/// code can drive a queue without knowing which backend is active.
pub trait AnyStringQueue {
    /// Returns the number of elements in the queue.
    fn len(&self) -> usize;
    /// Returns `true` if the queue contains no elements.
    fn is_empty(&self) -> bool {
        self.len() == 0
    }
    /// Copies `value` into a new element at the head.
    fn insert_head(&mut self, value: &[u8]) -> Result<()>;
    /// Copies `value` into a new element at the tail.
    fn insert_tail(&mut self, value: &[u8]) -> Result<()>;
    /// Removes the head element, copying it into `out` with [`copy_truncated`].
    /// Returns the number of bytes copied.
    fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize>;
    /// Reverses the order of all elements.
    fn reverse(&mut self);
    /// Returns the head element's bytes, or `None` if empty.
    fn head(&self) -> Option<&[u8]>;
    /// Returns the tail element's bytes, or `None` if empty.
    fn tail(&self) -> Option<&[u8]>;
    /// Removes all elements.
    fn clear(&mut self);
}

/// Copies `value` into a fresh heap buffer, reporting allocation failure instead of aborting.
fn try_to_vec(value: &[u8]) -> Result<Vec<u8>> {
    let mut owned = Vec::new();
    owned.try_reserve_exact(value.len())?;
    owned.extend_from_slice(value);
    Ok(owned)
}

impl AnyStringQueue for VecDeque<Vec<u8>> {
    fn len(&self) -> usize {
        self.len()
    }
    fn insert_head(&mut self, value: &[u8]) -> Result<()> {
        self.try_reserve(1)?;
        self.push_front(try_to_vec(value)?);
        Ok(())
    }
    fn insert_tail(&mut self, value: &[u8]) -> Result<()> {
        self.try_reserve(1)?;
        self.push_back(try_to_vec(value)?);
        Ok(())
    }
    fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize> {
        let value = self.pop_front().ok_or(QueueError::Empty)?;
        Ok(out.map_or(0, |buf| copy_truncated(&value, buf)))
    }
    fn reverse(&mut self) {
        self.make_contiguous().reverse();
    }
    fn head(&self) -> Option<&[u8]> {
        self.front().map(Vec::as_slice)
    }
    fn tail(&self) -> Option<&[u8]> {
        self.back().map(Vec::as_slice)
    }
    fn clear(&mut self) {
        self.clear();
    }
}

// ─── StringQueue ──────────────────────────────────────────────────────────────

/// A **doubly-linked queue of owned byte strings** stored in an index-linked arena.
///
/// # Overview
/// | Operation | Complexity |
/// |-----------|------------|
/// | `insert_head` / `insert_tail` | O(1) amortized |
/// | `remove_head` / `pop_head` | O(1) |
/// | `len` | O(1) |
/// | `reverse` | O(n), no allocation |
///
/// # Generic parameters
/// | Parameter | Meaning |
/// |-----------|---------|
/// | `N` | Inline payload capacity in bytes; longer payloads go to the heap |
/// | `I` | Slot index type; `u8` (max 255 nodes), `u16` (max 65535) or `u32` (default) |
///
/// # Invariants
/// Between operations:
/// - `len == 0` iff `head` and `tail` are both `I::NONE`.
/// - `prevs[head]` and `nexts[tail]` are `I::NONE`.
/// - Walking `nexts` from `head` visits exactly `len` slots and ends at `tail`; walking
///   `prevs` from `tail` visits the same slots in reverse.
/// - Every slot is either live (payload present, on the chain) or free (payload absent,
///   on the free-list starting at `free_head`).
///
/// # Example
/// ```rust
/// use small_queue::StringQueue;
///
/// let mut q: StringQueue<16> = StringQueue::new();
/// q.insert_tail("a").unwrap();
/// q.insert_tail("b").unwrap();
/// q.insert_head("z").unwrap();
/// assert_eq!(q.len(), 3);
///
/// q.reverse();
/// let mut buf = [0u8; 8];
/// assert_eq!(q.remove_head(Some(&mut buf)).unwrap(), 1);
/// assert_eq!(&buf[..2], b"b\0");
/// ```
#[derive(Clone)]
pub struct StringQueue<const N: usize = 24, I: IndexType = u32> {
    /// `Some` for live slots, `None` for free slots.
    payloads: Vec<Option<SmallPayload<N>>>,
    /// `prevs[i]` is the slot before `i` (towards the head), or `I::NONE` at the head.
    prevs: Vec<I>,
    /// `nexts[i]` is the slot after `i` (towards the tail), or `I::NONE` at the tail.
    /// For free slots, the next free slot.
    nexts: Vec<I>,
    /// First slot of the free-list, or `I::NONE` if every slot is live.
    free_head: I,
    head: I,
    tail: I,
    len: usize,
}

impl<const N: usize, I: IndexType> AnyStringQueue for StringQueue<N, I> {
    fn len(&self) -> usize {
        self.len
    }
    fn insert_head(&mut self, value: &[u8]) -> Result<()> {
        self.insert_head(value)
    }
    fn insert_tail(&mut self, value: &[u8]) -> Result<()> {
        self.insert_tail(value)
    }
    fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize> {
        self.remove_head(out)
    }
    fn reverse(&mut self) {
        self.reverse();
    }
    fn head(&self) -> Option<&[u8]> {
        self.head()
    }
    fn tail(&self) -> Option<&[u8]> {
        self.tail()
    }
    fn clear(&mut self) {
        self.clear();
    }
}

impl<const N: usize, I: IndexType> StringQueue<N, I> {
    /// Creates an empty queue.  No allocation occurs.
    pub fn new() -> Self {
        Self {
            payloads: Vec::new(),
            prevs: Vec::new(),
            nexts: Vec::new(),
            free_head: I::NONE,
            head: I::NONE,
            tail: I::NONE,
            len: 0,
        }
    }

    /// Creates an empty queue with room for `capacity` nodes.
    ///
    /// # Panics
    /// If the allocator cannot satisfy the reservation.  See
    /// [`try_with_capacity`](Self::try_with_capacity) for the fallible form.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            payloads: Vec::with_capacity(capacity),
            prevs: Vec::with_capacity(capacity),
            nexts: Vec::with_capacity(capacity),
            ..Self::new()
        }
    }

    /// Creates an empty queue with room for `capacity` nodes.
    ///
    /// Fails with [`QueueError::AllocationFailed`] if the slot table cannot be reserved;
    /// no partially constructed queue is returned.
    pub fn try_with_capacity(capacity: usize) -> Result<Self> {
        let mut queue = Self::new();
        queue.payloads.try_reserve_exact(capacity)?;
        queue.prevs.try_reserve_exact(capacity)?;
        queue.nexts.try_reserve_exact(capacity)?;
        Ok(queue)
    }

    /// Returns the number of elements in the queue.
    #[inline(always)]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the queue contains no elements.
    #[inline(always)]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of slots in the arena, live and free.
    #[inline]
    pub fn slot_count(&self) -> usize {
        self.payloads.len()
    }

    /// Returns the bytes of the head element, or `None` if empty.
    #[inline]
    pub fn head(&self) -> Option<&[u8]> {
        self.payload_at(self.head)
    }

    /// Returns the bytes of the tail element, or `None` if empty.
    #[inline]
    pub fn tail(&self) -> Option<&[u8]> {
        self.payload_at(self.tail)
    }

    /// Copies `value` into a new node placed before the current head.
    ///
    /// # Errors
    /// - [`QueueError::AllocationFailed`] if the payload copy or the slot cannot be allocated.
    /// - [`QueueError::SlotsExhausted`] if `I` cannot address another slot.
    ///
    /// On error the queue is unchanged.
    pub fn insert_head(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        let value = value.as_ref();
        let idx = self.alloc_slot(value)?;
        self.attach_front(idx);
        tracing::trace!(
            slot = idx.as_usize(),
            bytes = value.len(),
            len = self.len,
            "inserted at head"
        );
        Ok(())
    }

    /// Copies `value` into a new node placed after the current tail.
    ///
    /// Constant time: the chain is never traversed.  Fails under the same conditions as
    /// [`insert_head`](Self::insert_head), leaving the queue unchanged.
    pub fn insert_tail(&mut self, value: impl AsRef<[u8]>) -> Result<()> {
        let value = value.as_ref();
        let idx = self.alloc_slot(value)?;
        self.attach_back(idx);
        tracing::trace!(
            slot = idx.as_usize(),
            bytes = value.len(),
            len = self.len,
            "inserted at tail"
        );
        Ok(())
    }

    /// Removes the head node and returns its payload, or `None` if the queue is empty.
    pub fn pop_head(&mut self) -> Option<SmallPayload<N>> {
        let idx = self.detach_front()?;
        let payload = self.release_slot(idx);
        tracing::trace!(slot = idx.as_usize(), len = self.len, "removed head");
        payload
    }

    /// Removes the head node, optionally copying its payload into `out`.
    ///
    /// When `out` is given, up to `out.len() - 1` bytes are copied followed by a `0`
    /// terminator; longer payloads are silently truncated.  An empty `out` is accepted and
    /// receives nothing, not even the terminator.  Returns the number of payload bytes
    /// copied (`0` when `out` is `None`).
    ///
    /// # Errors
    /// [`QueueError::Empty`] if there is nothing to remove; the queue is unchanged.
    pub fn remove_head(&mut self, out: Option<&mut [u8]>) -> Result<usize> {
        let Some(payload) = self.pop_head() else {
            tracing::debug!("remove_head on empty queue");
            return Err(QueueError::Empty);
        };
        Ok(out.map_or(0, |buf| payload.copy_into(buf)))
    }

    /// Reverses the order of all elements in place.
    ///
    /// Swaps the `prev`/`next` links of every live slot, then swaps `head` and `tail`.
    /// No slot or payload is allocated, moved or released.  A no-op for fewer than two
    /// elements.
    pub fn reverse(&mut self) {
        if self.len < 2 {
            return;
        }
        let mut curr = self.head;
        while curr != I::NONE {
            let i = curr.as_usize();
            let next = self.nexts[i];
            self.nexts[i] = self.prevs[i];
            self.prevs[i] = next;
            curr = next;
        }
        mem::swap(&mut self.head, &mut self.tail);
        tracing::trace!(len = self.len, "reversed");
    }

    /// Releases every node and payload.  The slot table keeps its capacity.
    pub fn clear(&mut self) {
        self.payloads.clear();
        self.prevs.clear();
        self.nexts.clear();
        self.free_head = I::NONE;
        self.head = I::NONE;
        self.tail = I::NONE;
        self.len = 0;
    }

    /// Consumes the queue, releasing every node and payload.
    ///
    /// Equivalent to dropping it.
    pub fn destroy(self) {
        tracing::trace!(len = self.len, slots = self.payloads.len(), "destroyed");
    }

    // --- Slot management ---

    #[inline(always)]
    fn payload_at(&self, idx: I) -> Option<&[u8]> {
        if idx == I::NONE {
            return None;
        }
        self.payloads[idx.as_usize()].as_deref()
    }

    /// Copies `value` into a payload and parks it in a free or newly appended slot.
    ///
    /// The payload is built first; if no slot can be obtained it is dropped here, so a
    /// failed insert never leaves a half-built node behind.
    fn alloc_slot(&mut self, value: &[u8]) -> Result<I> {
        let payload = SmallPayload::<N>::try_from_bytes(value).inspect_err(|e| {
            tracing::debug!(bytes = value.len(), error = %e, "payload copy failed");
        })?;

        if self.free_head != I::NONE {
            let idx = self.free_head;
            let i = idx.as_usize();
            self.free_head = self.nexts[i];
            self.payloads[i] = Some(payload);
            return Ok(idx);
        }

        let Some(idx) = I::try_from_usize(self.payloads.len()) else {
            tracing::debug!(limit = I::limit(), "slot index space exhausted");
            return Err(QueueError::SlotsExhausted { limit: I::limit() });
        };
        self.reserve_slot()?;
        self.payloads.push(Some(payload));
        self.prevs.push(I::NONE);
        self.nexts.push(I::NONE);
        Ok(idx)
    }

    /// Reserves room for one more slot in all three tables before any of them is touched.
    fn reserve_slot(&mut self) -> Result<()> {
        let reserved = self
            .payloads
            .try_reserve(1)
            .and_then(|()| self.prevs.try_reserve(1))
            .and_then(|()| self.nexts.try_reserve(1));
        if let Err(e) = reserved {
            tracing::debug!(slots = self.payloads.len(), error = %e, "slot reservation failed");
            return Err(e.into());
        }
        Ok(())
    }

    /// Takes the payload out of slot `idx` and pushes the slot onto the free-list.
    fn release_slot(&mut self, idx: I) -> Option<SmallPayload<N>> {
        let i = idx.as_usize();
        let payload = self.payloads[i].take();
        self.prevs[i] = I::NONE;
        self.nexts[i] = self.free_head;
        self.free_head = idx;
        payload
    }

    // --- Linking ---

    /// Links slot `idx` in front of the current head.
    #[inline(always)]
    fn attach_front(&mut self, idx: I) {
        let i = idx.as_usize();
        self.prevs[i] = I::NONE;
        self.nexts[i] = self.head;
        if self.head != I::NONE {
            self.prevs[self.head.as_usize()] = idx;
        } else {
            self.tail = idx;
        }
        self.head = idx;
        self.len += 1;
    }

    /// Links slot `idx` after the current tail.
    #[inline(always)]
    fn attach_back(&mut self, idx: I) {
        let i = idx.as_usize();
        self.nexts[i] = I::NONE;
        self.prevs[i] = self.tail;
        if self.tail != I::NONE {
            self.nexts[self.tail.as_usize()] = idx;
        } else {
            self.head = idx;
        }
        self.tail = idx;
        self.len += 1;
    }

    /// Unlinks the head slot and returns its index, or `None` if empty.
    ///
    /// The slot keeps its payload; the caller releases it.
    #[inline(always)]
    fn detach_front(&mut self) -> Option<I> {
        let idx = self.head;
        if idx == I::NONE {
            return None;
        }
        let next = self.nexts[idx.as_usize()];
        self.head = next;
        if next != I::NONE {
            self.prevs[next.as_usize()] = I::NONE;
        } else {
            self.tail = I::NONE;
        }
        self.len -= 1;
        Some(idx)
    }

    /// Live slot indices from head to tail.
    fn chain(&self) -> impl Iterator<Item = I> + '_ {
        let first = Some(self.head).filter(|&i| i != I::NONE);
        std::iter::successors(first, move |&i| {
            Some(self.nexts[i.as_usize()]).filter(|&n| n != I::NONE)
        })
    }
}

impl<const N: usize, I: IndexType> Default for StringQueue<N, I> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize, I: IndexType> fmt::Debug for StringQueue<N, I> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list()
            .entries(self.chain().filter_map(|i| self.payloads[i.as_usize()].as_ref()))
            .finish()
    }
}

impl<const N: usize, const M: usize, I: IndexType, J: IndexType> PartialEq<StringQueue<M, J>>
    for StringQueue<N, I>
{
    fn eq(&self, other: &StringQueue<M, J>) -> bool {
        self.len == other.len
            && self
                .chain()
                .zip(other.chain())
                .all(|(a, b)| self.payload_at(a) == other.payload_at(b))
    }
}

impl<const N: usize, I: IndexType> Eq for StringQueue<N, I> {}

#[cfg(test)]
mod tests {
    use super::*;

    /// Checks every link invariant of the arena.
    fn assert_links<const N: usize, I: IndexType>(q: &StringQueue<N, I>) {
        if q.len == 0 {
            assert_eq!(q.head, I::NONE);
            assert_eq!(q.tail, I::NONE);
        } else {
            assert_eq!(q.prevs[q.head.as_usize()], I::NONE);
            assert_eq!(q.nexts[q.tail.as_usize()], I::NONE);
        }

        let forward: Vec<I> = q.chain().collect();
        assert_eq!(forward.len(), q.len);
        assert_eq!(forward.last().copied().unwrap_or(I::NONE), q.tail);
        for w in forward.windows(2) {
            assert_eq!(q.nexts[w[0].as_usize()], w[1]);
            assert_eq!(q.prevs[w[1].as_usize()], w[0]);
        }

        let mut backward = Vec::new();
        let mut curr = q.tail;
        while curr != I::NONE {
            backward.push(curr);
            curr = q.prevs[curr.as_usize()];
        }
        backward.reverse();
        assert_eq!(forward, backward);

        for &i in &forward {
            assert!(q.payloads[i.as_usize()].is_some());
        }

        let mut free = 0;
        let mut curr = q.free_head;
        while curr != I::NONE {
            assert!(q.payloads[curr.as_usize()].is_none());
            free += 1;
            curr = q.nexts[curr.as_usize()];
        }
        assert_eq!(free + q.len, q.payloads.len());
        assert_eq!(q.prevs.len(), q.payloads.len());
        assert_eq!(q.nexts.len(), q.payloads.len());
    }

    fn pop_string<const N: usize, I: IndexType>(q: &mut StringQueue<N, I>) -> Option<String> {
        q.pop_head()
            .map(|p| String::from_utf8(p.into_vec()).unwrap())
    }

    // ─── basics ───────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_new_is_empty() {
        let mut q: StringQueue<8> = StringQueue::new();
        assert_eq!(q.len(), 0);
        assert!(q.is_empty());
        assert_eq!(q.head(), None);
        assert_eq!(q.tail(), None);
        assert_eq!(q.slot_count(), 0);
        assert_eq!(q.remove_head(None), Err(QueueError::Empty));
        assert_links(&q);
    }

    #[test]
    fn test_queue_scenario_tail_reverse_remove() {
        let mut q: StringQueue<8> = StringQueue::new();
        q.insert_tail("a").unwrap();
        q.insert_tail("b").unwrap();
        q.insert_tail("c").unwrap();
        assert_eq!(q.len(), 3);
        assert_eq!(q.head(), Some(&b"a"[..]));
        assert_eq!(q.tail(), Some(&b"c"[..]));

        q.reverse();
        assert_links(&q);
        assert_eq!(q.head(), Some(&b"c"[..]));
        assert_eq!(q.tail(), Some(&b"a"[..]));

        let mut buf = [0u8; 8];
        assert_eq!(q.remove_head(Some(&mut buf)), Ok(1));
        assert_eq!(&buf[..2], b"c\0");
        assert_eq!(q.len(), 2);
        assert_eq!(q.head(), Some(&b"b"[..]));
        assert_links(&q);
    }

    #[test]
    fn test_queue_scenario_head_inserts() {
        let mut q: StringQueue<8> = StringQueue::new();
        q.insert_head("x").unwrap();
        q.insert_head("y").unwrap();
        assert_eq!(q.head(), Some(&b"y"[..]));
        assert_eq!(q.tail(), Some(&b"x"[..]));
        assert_eq!(q.len(), 2);

        let mut buf = [0u8; 4];
        assert_eq!(q.remove_head(Some(&mut buf)), Ok(1));
        assert_eq!(&buf[..2], b"y\0");
        assert_eq!(q.len(), 1);
        assert_eq!(q.head(), q.tail());
        assert_links(&q);
    }

    // ─── ordering ─────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_fifo_from_tail() {
        let mut q: StringQueue<4> = StringQueue::new();
        let words = ["one", "two", "three", "four", "five-is-long"];
        for w in words {
            q.insert_tail(w).unwrap();
            assert_links(&q);
        }
        for w in words {
            assert_eq!(pop_string(&mut q).as_deref(), Some(w));
            assert_links(&q);
        }
        assert_eq!(pop_string(&mut q), None);
    }

    #[test]
    fn test_queue_lifo_from_head() {
        let mut q: StringQueue<4> = StringQueue::new();
        let words = ["one", "two", "three", "four"];
        for w in words {
            q.insert_head(w).unwrap();
        }
        assert_links(&q);
        for w in words.iter().rev() {
            assert_eq!(pop_string(&mut q).as_deref(), Some(*w));
        }
        assert!(q.is_empty());
    }

    #[test]
    fn test_queue_mixed_ends() {
        let mut q: StringQueue<8> = StringQueue::new();
        q.insert_tail("m").unwrap();
        q.insert_head("h").unwrap();
        q.insert_tail("t").unwrap();
        q.insert_head("hh").unwrap();
        assert_links(&q);
        assert_eq!(format!("{:?}", q), r#"["hh", "h", "m", "t"]"#);
    }

    #[test]
    fn test_queue_size_tracks_inserts_and_removes() {
        let mut q: StringQueue<8> = StringQueue::new();
        for i in 0..10 {
            q.insert_tail(i.to_string()).unwrap();
        }
        for _ in 0..4 {
            q.remove_head(None).unwrap();
        }
        assert_eq!(q.len(), 6);
        assert_links(&q);
    }

    // ─── reverse ──────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_reverse_twice_restores_identities() {
        let mut q: StringQueue<8> = StringQueue::new();
        for s in ["a", "b", "c", "d"] {
            q.insert_tail(s).unwrap();
        }
        let original = q.clone();
        let (head, tail) = (q.head, q.tail);
        let slots: Vec<u32> = q.chain().collect();

        q.reverse();
        assert_links(&q);
        assert_eq!(q.head, tail);
        assert_eq!(q.tail, head);
        let reversed: Vec<u32> = q.chain().collect();
        assert_eq!(reversed, slots.iter().rev().copied().collect::<Vec<_>>());

        q.reverse();
        assert_links(&q);
        assert_eq!((q.head, q.tail), (head, tail));
        assert_eq!(q.chain().collect::<Vec<_>>(), slots);
        assert_eq!(q, original);
    }

    #[test]
    fn test_queue_reverse_small_is_noop() {
        let mut q: StringQueue<8> = StringQueue::new();
        q.reverse();
        assert_eq!(q.len(), 0);
        assert_links(&q);

        q.insert_tail("only").unwrap();
        q.reverse();
        assert_eq!(q.len(), 1);
        assert_eq!(q.head(), Some(&b"only"[..]));
        assert_links(&q);
    }

    #[test]
    fn test_queue_reverse_does_not_allocate_slots() {
        let mut q: StringQueue<8> = StringQueue::new();
        for i in 0..16 {
            q.insert_tail(format!("v{i}")).unwrap();
        }
        let slots = q.slot_count();
        q.reverse();
        assert_eq!(q.slot_count(), slots);
        assert_eq!(q.head(), Some(&b"v15"[..]));
        assert_eq!(q.tail(), Some(&b"v0"[..]));
    }

    #[test]
    fn test_queue_reverse_then_insert_both_ends() {
        let mut q: StringQueue<8> = StringQueue::new();
        for s in ["1", "2", "3"] {
            q.insert_tail(s).unwrap();
        }
        q.reverse();
        q.insert_head("0").unwrap();
        q.insert_tail("4").unwrap();
        assert_links(&q);
        assert_eq!(format!("{:?}", q), r#"["0", "3", "2", "1", "4"]"#);
    }

    // ─── copy-out ─────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_remove_truncates() {
        let mut q: StringQueue<4> = StringQueue::new();
        q.insert_tail("abcdefgh").unwrap();
        let mut buf = [0xffu8; 4];
        assert_eq!(q.remove_head(Some(&mut buf)), Ok(3));
        assert_eq!(&buf, b"abc\0");
        assert!(q.is_empty());
    }

    #[test]
    fn test_queue_remove_capacity_zero_still_removes() {
        let mut q: StringQueue<4> = StringQueue::new();
        q.insert_tail("abc").unwrap();
        q.insert_tail("def").unwrap();
        let mut backing = [0x55u8; 2];
        let (empty, rest) = backing.split_at_mut(0);
        assert_eq!(q.remove_head(Some(empty)), Ok(0));
        assert_eq!(rest, &[0x55u8, 0x55]);
        assert_eq!(q.len(), 1);
        assert_eq!(q.head(), Some(&b"def"[..]));
    }

    #[test]
    fn test_queue_remove_without_buffer() {
        let mut q: StringQueue<4> = StringQueue::new();
        q.insert_tail("abc").unwrap();
        assert_eq!(q.remove_head(None), Ok(0));
        assert!(q.is_empty());
        assert_eq!(q.remove_head(None), Err(QueueError::Empty));
    }

    #[test]
    fn test_queue_heap_payload_roundtrip() {
        let mut q: StringQueue<2> = StringQueue::new();
        let long = "a payload much longer than two bytes";
        q.insert_head(long).unwrap();
        let p = q.pop_head().unwrap();
        assert!(!p.is_inline());
        assert_eq!(p, long);
    }

    #[test]
    fn test_queue_copies_caller_bytes() {
        let mut q: StringQueue<16> = StringQueue::new();
        let mut source = String::from("mutable");
        q.insert_tail(&source).unwrap();
        source.clear();
        source.push_str("changed");
        assert_eq!(q.head(), Some(&b"mutable"[..]));
    }

    // ─── arena ────────────────────────────────────────────────────────────────
    #[test]
    fn test_queue_slots_are_reused() {
        let mut q: StringQueue<8> = StringQueue::new();
        q.insert_tail("keep").unwrap();
        for i in 0..1000 {
            q.insert_tail(format!("{i}")).unwrap();
            q.remove_head(None).unwrap();
        }
        assert_eq!(q.len(), 1);
        assert!(q.slot_count() <= 2);
        assert_links(&q);
    }

    #[test]
    fn test_queue_u8_index_exhaustion() {
        let mut q: StringQueue<4, u8> = StringQueue::new();
        for i in 0..255 {
            q.insert_tail(format!("{i}")).unwrap();
        }
        assert_eq!(q.len(), 255);
        assert_eq!(
            q.insert_tail("overflow"),
            Err(QueueError::SlotsExhausted { limit: 255 })
        );
        assert_eq!(
            q.insert_head("overflow"),
            Err(QueueError::SlotsExhausted { limit: 255 })
        );
        assert_eq!(q.len(), 255);
        assert_eq!(q.head(), Some(&b"0"[..]));
        assert_eq!(q.tail(), Some(&b"254"[..]));
        assert_links(&q);

        q.remove_head(None).unwrap();
        q.insert_tail("fits").unwrap();
        assert_eq!(q.tail(), Some(&b"fits"[..]));
        assert_eq!(q.slot_count(), 255);
        assert_links(&q);
    }

    #[test]
    fn test_queue_try_with_capacity() {
        let q: StringQueue<8> = StringQueue::try_with_capacity(32).unwrap();
        assert!(q.is_empty());
        assert!(matches!(
            StringQueue::<8>::try_with_capacity(usize::MAX),
            Err(QueueError::AllocationFailed(_))
        ));
    }

    #[test]
    fn test_queue_clear_and_reuse() {
        let mut q: StringQueue<8> = StringQueue::with_capacity(4);
        for s in ["a", "b", "c"] {
            q.insert_tail(s).unwrap();
        }
        q.clear();
        assert!(q.is_empty());
        assert_eq!(q.slot_count(), 0);
        assert_links(&q);
        q.insert_head("z").unwrap();
        assert_eq!(q.head(), Some(&b"z"[..]));
        assert_links(&q);
    }

    #[test]
    fn test_queue_destroy_releases_everything() {
        let mut q: StringQueue<2> = StringQueue::new();
        for i in 0..8 {
            q.insert_tail(format!("heap-allocated payload {i}")).unwrap();
        }
        q.destroy();

        let empty: StringQueue<2> = StringQueue::default();
        empty.destroy();
    }

    // ─── model-based ──────────────────────────────────────────────────────────
    fn run_script(q: &mut dyn AnyStringQueue, seed: u64) -> Vec<(usize, Vec<u8>)> {
        let mut state = seed;
        let mut log = Vec::new();
        for step in 0..500 {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let value = format!("v{step}-{}", state >> 60);
            match (state >> 33) % 5 {
                0 => q.insert_head(value.as_bytes()).unwrap(),
                1 => q.insert_tail(value.as_bytes()).unwrap(),
                2 => q.reverse(),
                _ => {
                    let mut buf = vec![0u8; ((state >> 40) % 6) as usize];
                    match q.remove_head(Some(&mut buf)) {
                        Ok(n) => log.push((n, buf)),
                        Err(e) => {
                            assert_eq!(e, QueueError::Empty);
                            assert!(q.is_empty());
                        }
                    }
                }
            }
            log.push((q.len(), q.head().unwrap_or_default().to_vec()));
            log.push((q.len(), q.tail().unwrap_or_default().to_vec()));
        }
        log
    }

    #[test]
    fn test_queue_matches_vecdeque_model() {
        for seed in [1, 7, 42, 0xdead_beef] {
            let mut arena: StringQueue<4> = StringQueue::new();
            let mut model: VecDeque<Vec<u8>> = VecDeque::new();
            assert_eq!(run_script(&mut arena, seed), run_script(&mut model, seed));
            assert_links(&arena);
        }
    }

    #[test]
    fn test_any_string_queue_trait_objects() {
        let mut backends: Vec<Box<dyn AnyStringQueue>> = vec![
            Box::new(StringQueue::<8>::new()),
            Box::new(VecDeque::<Vec<u8>>::new()),
        ];
        for q in backends.iter_mut() {
            assert!(q.is_empty());
            q.insert_tail(b"a").unwrap();
            q.insert_tail(b"b").unwrap();
            q.reverse();
            assert_eq!(q.head(), Some(&b"b"[..]));
            assert_eq!(q.tail(), Some(&b"a"[..]));
            q.clear();
            assert_eq!(q.len(), 0);
            assert_eq!(q.remove_head(None), Err(QueueError::Empty));
        }
    }

    #[test]
    fn test_queue_equality_ignores_layout() {
        let mut a: StringQueue<8> = StringQueue::new();
        let mut b: StringQueue<2, u16> = StringQueue::new();
        a.insert_tail("x").unwrap();
        a.insert_tail("y").unwrap();
        b.insert_head("y").unwrap();
        b.insert_head("x").unwrap();
        assert!(a == b);
        b.reverse();
        assert!(a != b);
    }
}
