//! Compact slot indices for the queue arena.

use core::hash::Hash;
use std::fmt::Debug;

/// Integer types usable as **slot indices** in the queue arena.
///
/// Links between nodes are stored as indices into the slot table rather than pointers,
/// so a narrower index type shrinks every node.  The price is a hard ceiling on the
/// number of slots the arena can address.
///
/// # Sentinel value
/// `NONE` marks "no node" (an absent link, the end of a chain).  It is the maximum value
/// of the integer type, so valid slot indices are `0..NONE` and an arena indexed by `I`
/// holds at most `I::NONE.as_usize()` slots.
///
/// | Type  | `NONE`        | Maximum slots |
/// |-------|---------------|---------------|
/// | `u8`  | 255           | 255           |
/// | `u16` | 65535         | 65535         |
/// | `u32` | 4294967295    | 4294967295    |
pub trait IndexType: Copy + Eq + Hash + Debug + 'static {
    /// Sentinel value indicating "no node".
    const NONE: Self;

    /// Converts this index to a `usize` for slot table access.
    fn as_usize(self) -> usize;

    /// Converts a slot position to this index type.
    ///
    /// Returns `None` when `i` is not addressable, i.e. `i >= NONE`.
    fn try_from_usize(i: usize) -> Option<Self>;

    /// Number of slots addressable with this index type.
    #[inline(always)]
    fn limit() -> usize {
        Self::NONE.as_usize()
    }
}

macro_rules! impl_index_type {
    ($($t:ty),*) => {
        $(
            impl IndexType for $t {
                const NONE: Self = <$t>::MAX;

                #[inline(always)]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline(always)]
                fn try_from_usize(i: usize) -> Option<Self> {
                    match <$t>::try_from(i) {
                        Ok(v) if v != Self::NONE => Some(v),
                        _ => None,
                    }
                }
            }
        )*
    };
}

impl_index_type!(u8, u16, u32);
