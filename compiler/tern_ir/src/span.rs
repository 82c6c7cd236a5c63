//! Source spans attached to IR nodes.
//!
//! IR reaching the traversal layer has already been desugared and converted
//! into explicit-merge form, so spans point at the source construct a node
//! was derived from. Generated nodes (phi alternatives, loop bookkeeping)
//! usually carry [`Span::DUMMY`].

use std::fmt;

/// A byte offset did not fit in 32 bits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[error("byte offset {offset} does not fit in a 32-bit span")]
pub struct SpanOverflow {
    pub offset: usize,
}

/// Half-open byte range `start..end` in the originating source file.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
#[repr(C)]
pub struct Span {
    pub start: u32,
    pub end: u32,
}

impl Span {
    /// Span for compiler-generated nodes.
    pub const DUMMY: Span = Span { start: 0, end: 0 };

    #[inline]
    pub const fn new(start: u32, end: u32) -> Self {
        Span { start, end }
    }

    /// Convert a `usize` byte range, failing if either end exceeds `u32::MAX`.
    pub fn try_from_range(range: std::ops::Range<usize>) -> Result<Self, SpanOverflow> {
        let start = u32::try_from(range.start).map_err(|_| SpanOverflow {
            offset: range.start,
        })?;
        let end = u32::try_from(range.end).map_err(|_| SpanOverflow { offset: range.end })?;
        Ok(Span { start, end })
    }

    #[inline]
    pub const fn len(&self) -> u32 {
        self.end.saturating_sub(self.start)
    }

    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.start >= self.end
    }

    #[inline]
    pub const fn is_dummy(&self) -> bool {
        self.start == 0 && self.end == 0
    }

    /// Smallest span covering both `self` and `other`.
    #[inline]
    #[must_use]
    pub fn merge(self, other: Span) -> Span {
        Span {
            start: self.start.min(other.start),
            end: self.end.max(other.end),
        }
    }
}

impl fmt::Debug for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_span_merge() {
        let a = Span::new(4, 9);
        let b = Span::new(1, 6);
        assert_eq!(a.merge(b), Span::new(1, 9));
    }

    #[test]
    fn test_span_len_and_empty() {
        assert_eq!(Span::new(3, 10).len(), 7);
        assert!(Span::new(5, 5).is_empty());
        assert!(Span::DUMMY.is_dummy());
        assert!(!Span::new(0, 1).is_dummy());
    }

    #[test]
    fn test_try_from_range_overflow() {
        let too_far = usize::try_from(u64::from(u32::MAX) + 1).unwrap_or(usize::MAX);
        assert_eq!(
            Span::try_from_range(0..too_far),
            Err(SpanOverflow { offset: too_far })
        );
        assert_eq!(Span::try_from_range(2..8), Ok(Span::new(2, 8)));
    }
}
