//! Tern IR - explicit-merge intermediate representation
//!
//! This crate contains the IR every Tern compiler pass operates on after
//! control flow has been converted to explicit-merge (phi) form:
//! - Spans for source locations
//! - Names for interned identifiers
//! - Expression and statement nodes, including the data-parallel
//!   combinators (`Map`, `Reduce`, `Scan`, ...) and `ParFor`
//! - Merge maps attached to branches and loops
//! - Arena allocation for all of the above, and a builder over it
//! - Byte encoding of a whole arena (`cache` feature)
//! - The [`Visitor`] traversal protocol passes are built on
//!
//! # Design Philosophy
//!
//! - **Closed node set**: `ExprKind`/`StmtKind` are matched exhaustively, so
//!   a new node kind is a compile error in every dispatcher until handled.
//! - **Flatten Everything**: no `Box<Expr>`, children are `ExprId(u32)`
//!   indices and lists are `(start, len)` ranges into the arena.
//! - **Read-only traversal**: visitors never mutate the IR; analysis state
//!   lives in the visitor.
//!
//! Types that contain floats store them as u64 bits for Hash compatibility.

mod arena;
pub mod ast;
mod builder;
#[cfg(feature = "cache")]
mod cache;
mod error;
mod ids;
mod interner;
mod name;
mod span;
mod traits;
pub mod visitor;

pub use arena::IrArena;
pub use builder::IrBuilder;
#[cfg(feature = "cache")]
pub use cache::CacheError;
pub use ast::{
    Alloc, AllocArray, ArrayView, Assign, Attribute, Call, Cast, Closure, ClosureElt, ConstValue,
    Expr, ExprKind, ExprTag, ForLoop, Function, FunctionKind, If, Index, IndexMap, IndexReduce,
    IndexScan, Map, ParFor, PhiNode, Prim, PrimCall, Range, Reduce, Reshape, Slice, Stmt,
    StmtKind, TupleProj, While,
};
pub use error::{NodeRef, VisitError, VisitResult};
pub use ids::{ExprId, ExprRange, FnId, PhiId, PhiRange, StmtId, StmtRange, TypeId};
pub use interner::{InternError, SharedInterner, StringInterner};
pub use name::Name;
pub use span::{Span, SpanOverflow};
pub use traits::{Named, Spanned};
pub use visitor::Visitor;
