//! Merge maps (phi nodes).

use crate::{ExprId, Name, Named};

/// One entry of a merge map: `name = phi(left, right)`.
///
/// For a branch, `left` is the true-path value and `right` the false-path
/// value. For a loop head, `left` enters the loop and `right` comes back
/// along the backedge.
///
/// Within one merge map every `name` is unique.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PhiNode {
    pub name: Name,
    pub left: ExprId,
    pub right: ExprId,
}

impl PhiNode {
    #[inline]
    pub const fn new(name: Name, left: ExprId, right: ExprId) -> Self {
        PhiNode { name, left, right }
    }
}

impl Named for PhiNode {
    fn name(&self) -> Name {
        self.name
    }
}
