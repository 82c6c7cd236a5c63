//! Arena ids and ranges.
//!
//! Nodes never own their children. An expression refers to its operands by
//! [`ExprId`], a block is a [`StmtRange`] of contiguous statements, and a
//! merge map is a [`PhiRange`] of contiguous phi entries.

use std::fmt;

/// Defines a `u32` index newtype with an `INVALID` sentinel.
macro_rules! define_id {
    ($($(#[$meta:meta])* $name:ident),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        #[repr(transparent)]
        pub struct $name(u32);

        impl $name {
            /// Sentinel that never resolves in an arena.
            pub const INVALID: Self = Self(u32::MAX);

            #[inline]
            pub const fn new(index: u32) -> Self {
                Self(index)
            }

            #[inline]
            pub const fn index(self) -> usize {
                self.0 as usize
            }

            #[inline]
            pub const fn raw(self) -> u32 {
                self.0
            }

            #[inline]
            pub const fn is_valid(self) -> bool {
                self.0 != u32::MAX
            }
        }

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                if self.is_valid() {
                    write!(f, "{}({})", stringify!($name), self.0)
                } else {
                    write!(f, "{}::INVALID", stringify!($name))
                }
            }
        }

        impl Default for $name {
            fn default() -> Self {
                Self::INVALID
            }
        }
    )* };
}

/// Defines a contiguous `start..start + len` range over one arena table.
///
/// `Range => Id` also generates `ids()`, for tables whose slots have their
/// own id type.
macro_rules! define_range {
    ($($(#[$meta:meta])* $name:ident $(=> $id:ident)?),* $(,)?) => { $(
        $(#[$meta])*
        #[derive(Copy, Clone, Eq, PartialEq, Hash, Default)]
        #[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
        pub struct $name {
            pub start: u32,
            pub len: u32,
        }

        impl $name {
            pub const EMPTY: Self = Self { start: 0, len: 0 };

            #[inline]
            pub const fn new(start: u32, len: u32) -> Self {
                Self { start, len }
            }

            #[inline]
            pub const fn is_empty(&self) -> bool {
                self.len == 0
            }

            #[inline]
            pub const fn len(&self) -> usize {
                self.len as usize
            }

            /// Arena slot indices covered by this range, in order.
            #[inline]
            pub fn indices(&self) -> std::ops::Range<usize> {
                let start = self.start as usize;
                start..start + self.len as usize
            }
        }

        $(
            impl $name {
                /// Ids covered by this range, in order.
                pub fn ids(&self) -> impl Iterator<Item = $id> {
                    (self.start..self.start.saturating_add(self.len)).map($id::new)
                }
            }
        )?

        impl fmt::Debug for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(
                    f,
                    "{}({}..{})",
                    stringify!($name),
                    self.start,
                    self.start.saturating_add(self.len)
                )
            }
        }
    )* };
}

define_id!(
    /// Index of an [`Expr`](crate::Expr) in an [`IrArena`](crate::IrArena).
    ExprId,
    /// Index of a [`Stmt`](crate::Stmt) in an [`IrArena`](crate::IrArena).
    StmtId,
    /// Index of a [`PhiNode`](crate::PhiNode) in an [`IrArena`](crate::IrArena).
    PhiId,
    /// Index of a [`Function`](crate::Function) in an [`IrArena`](crate::IrArena).
    FnId,
    /// Opaque handle to a type owned by the type checker.
    TypeId,
);

define_range!(
    /// Ordered expression list (tuple elements, call arguments, ...).
    ExprRange,
    /// A block: contiguous statements executed in order.
    StmtRange => StmtId,
    /// A merge map: contiguous phi entries.
    PhiRange => PhiId,
);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_sentinel() {
        assert!(!ExprId::INVALID.is_valid());
        assert!(ExprId::new(0).is_valid());
        assert_eq!(ExprId::default(), ExprId::INVALID);
        assert_eq!(format!("{:?}", StmtId::INVALID), "StmtId::INVALID");
        assert_eq!(format!("{:?}", FnId::new(3)), "FnId(3)");
    }

    #[test]
    fn test_range_ids_in_order() {
        let range = StmtRange::new(4, 3);
        let ids: Vec<StmtId> = range.ids().collect();
        assert_eq!(ids, vec![StmtId::new(4), StmtId::new(5), StmtId::new(6)]);
        assert_eq!(range.indices(), 4..7);
        assert_eq!(format!("{range:?}"), "StmtRange(4..7)");
    }

    #[test]
    fn test_empty_range() {
        assert!(PhiRange::EMPTY.is_empty());
        assert_eq!(PhiRange::EMPTY.ids().count(), 0);
        assert_eq!(ExprRange::EMPTY.indices().count(), 0);
        assert_eq!(PhiRange::default(), PhiRange::EMPTY);
    }
}
