//! IR node model.
//!
//! - `expr`: expression nodes (`Expr`, `ExprKind`, per-kind payloads)
//! - `stmt`: statement nodes (`Stmt`, `StmtKind`, per-kind payloads)
//! - `merge`: phi entries making up merge maps
//! - `function`: function definitions
//! - `operators`: primitive operators and constant values
//!
//! Nodes are immutable once allocated and refer to each other by arena id.

mod expr;
mod function;
mod merge;
mod operators;
mod stmt;

pub use expr::{
    Alloc, AllocArray, ArrayView, Attribute, Call, Cast, Closure, ClosureElt, Expr, ExprKind,
    ExprTag, Index, IndexMap, IndexReduce, IndexScan, Map, PrimCall, Range, Reduce, Reshape, Slice,
    TupleProj,
};
pub use function::{Function, FunctionKind};
pub use merge::PhiNode;
pub use operators::{ConstValue, Prim};
pub use stmt::{Assign, ForLoop, If, ParFor, Stmt, StmtKind, While};

#[cfg(test)]
mod tests;
