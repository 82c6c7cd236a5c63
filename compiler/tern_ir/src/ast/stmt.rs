//! Statement nodes.
//!
//! Control flow is already in explicit-merge form: `If`, `While` and
//! `ForLoop` each carry the merge map reconciling the values of names that
//! are reassigned on their paths.

use std::fmt;

use crate::{ExprId, Name, PhiRange, Span, Spanned, StmtRange};

/// A statement node.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

impl Stmt {
    #[inline]
    pub fn new(kind: StmtKind, span: Span) -> Self {
        Stmt { kind, span }
    }
}

impl fmt::Debug for Stmt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Stmt {
    fn span(&self) -> Span {
        self.span
    }
}

/// `lhs = rhs`. `lhs` must be a Var, Tuple, Index or Attribute.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Assign {
    pub lhs: ExprId,
    pub rhs: ExprId,
}

/// Two-way branch.
///
/// `merge` pairs each name's true-branch value (left) with its
/// false-branch value (right).
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct If {
    pub cond: ExprId,
    pub true_block: StmtRange,
    pub false_block: StmtRange,
    pub merge: PhiRange,
}

/// Loop while `cond` holds.
///
/// `merge` is the loop-head merge map: left is the value entering the loop,
/// right is the value flowing back along the backedge.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct While {
    pub cond: ExprId,
    pub body: StmtRange,
    pub merge: PhiRange,
}

/// `for var in range(start, stop, step)`, with a loop-head merge map like
/// [`While`].
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ForLoop {
    pub var: ExprId,
    pub start: ExprId,
    pub stop: ExprId,
    pub step: ExprId,
    pub body: StmtRange,
    pub merge: PhiRange,
}

/// Data-parallel loop calling `func` at every index within `bounds`.
///
/// Iterations are independent, so there is no loop-carried state and no
/// merge map.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ParFor {
    pub func: ExprId,
    pub bounds: ExprId,
}

/// Statement kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum StmtKind {
    Assign(Assign),
    /// Expression evaluated for effect.
    ExprStmt(ExprId),
    Return(ExprId),
    Comment(Name),
    If(If),
    While(While),
    ForLoop(ForLoop),
    ParFor(ParFor),
    /// Placeholder left by upstream error recovery.
    Error,
}

impl StmtKind {
    pub const fn name(&self) -> &'static str {
        match self {
            StmtKind::Assign(_) => "Assign",
            StmtKind::ExprStmt(_) => "ExprStmt",
            StmtKind::Return(_) => "Return",
            StmtKind::Comment(_) => "Comment",
            StmtKind::If(_) => "If",
            StmtKind::While(_) => "While",
            StmtKind::ForLoop(_) => "ForLoop",
            StmtKind::ParFor(_) => "ParFor",
            StmtKind::Error => "Error",
        }
    }

    /// The merge map attached to this statement, if it has one.
    pub const fn merge(&self) -> Option<PhiRange> {
        match self {
            StmtKind::If(If { merge, .. })
            | StmtKind::While(While { merge, .. })
            | StmtKind::ForLoop(ForLoop { merge, .. }) => Some(*merge),
            _ => None,
        }
    }
}
