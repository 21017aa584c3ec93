//! Sentinel-based index trait for node links.
//!
//! Every link in this crate (`next`, `prev`, `parent`, a container's
//! `head`/`tail`) is a plain index into the container's arena. A reserved
//! sentinel value (`MAX` of the integer type) stands in for "no link",
//! avoiding the space overhead of `Option<Idx>` inside every node.

/// A copyable index type with a sentinel "none" value.
///
/// Implemented for the unsigned integer types. The default index type
/// throughout the crate is `u32`, which keeps nodes compact while allowing
/// ~4 billion live nodes per container.
///
/// # Example
///
/// ```
/// use linkage::Index;
///
/// let idx: u32 = 7;
/// assert!(idx.is_some());
/// assert!(u32::NONE.is_none());
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel value representing "no link".
    ///
    /// `MAX` for the integer types; an arena never hands out this value.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this is not the sentinel value.
    #[inline]
    fn is_some(self) -> bool {
        !self.is_none()
    }

    /// Returns the index as a `usize`, for slot addressing.
    fn as_usize(self) -> usize;

    /// Creates an index from a slot position.
    fn from_usize(val: usize) -> Self;
}

macro_rules! impl_index {
    ($($ty:ty),*) => {
        $(
            impl Index for $ty {
                const NONE: Self = <$ty>::MAX;

                #[inline]
                fn as_usize(self) -> usize {
                    self as usize
                }

                #[inline]
                fn from_usize(val: usize) -> Self {
                    val as Self
                }
            }
        )*
    };
}

impl_index!(u8, u16, u32, u64, usize);
