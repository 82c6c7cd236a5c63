//! Fatal traversal faults.
//!
//! Every variant means the IR handed to this layer was built wrong upstream.
//! They are never recovered from here: every hook returns them with `?` and
//! the compiler driver aborts the offending function.

use std::fmt;

use crate::{ExprId, ExprRange, PhiRange, Span, StmtId};

/// The node a fault refers to.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub enum NodeRef {
    Expr(ExprId),
    Stmt(StmtId),
    ExprList(ExprRange),
    Merge(PhiRange),
}

impl fmt::Display for NodeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeRef::Expr(id) => write!(f, "expression #{}", id.raw()),
            NodeRef::Stmt(id) => write!(f, "statement #{}", id.raw()),
            NodeRef::ExprList(range) => write!(f, "expression list {range:?}"),
            NodeRef::Merge(range) => write!(f, "merge map {range:?}"),
        }
    }
}

/// Fatal fault raised while walking the IR.
#[derive(Clone, Eq, PartialEq, Debug, thiserror::Error)]
pub enum VisitError {
    /// The node's kind is outside the closed set the visitor dispatches on.
    #[error("unrecognized node kind for {node} at {span:?}")]
    UnrecognizedNodeKind { node: NodeRef, span: Span },

    /// An assignment target is not a Var, Tuple, Index or Attribute.
    #[error("LHS not implemented: {kind} target {id:?} at {span:?}")]
    UnsupportedLhsKind {
        kind: &'static str,
        id: ExprId,
        span: Span,
    },

    /// An id or range that does not resolve in the arena.
    #[error("dangling reference to {0}")]
    DanglingNode(NodeRef),
}

impl VisitError {
    /// The node the fault was raised for.
    pub fn node(&self) -> NodeRef {
        match self {
            VisitError::UnrecognizedNodeKind { node, .. } | VisitError::DanglingNode(node) => *node,
            VisitError::UnsupportedLhsKind { id, .. } => NodeRef::Expr(*id),
        }
    }
}

/// Result of every visitor hook.
pub type VisitResult<T> = Result<T, VisitError>;
