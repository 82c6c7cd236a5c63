//! Expression nodes.
//!
//! `ExprKind` is a closed sum: adding a kind breaks every exhaustive match
//! in the visitor until it is handled there too.

use std::fmt;

use smallvec::{smallvec, SmallVec};

use super::operators::{ConstValue, Prim};
use crate::{ExprId, ExprRange, FnId, IrArena, Name, Span, Spanned, TypeId, VisitResult};

/// An expression node.
#[derive(Clone, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
}

impl Expr {
    #[inline]
    pub fn new(kind: ExprKind, span: Span) -> Self {
        Expr { kind, span }
    }
}

impl fmt::Debug for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?} @ {:?}", self.kind, self.span)
    }
}

impl Spanned for Expr {
    fn span(&self) -> Span {
        self.span
    }
}

// Unary wrappers

/// `value.name`
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Attribute {
    pub value: ExprId,
    pub name: Name,
}

/// Conversion of `value` to `ty`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Cast {
    pub value: ExprId,
    pub ty: TypeId,
}

/// The `index`-th captured value of a closure.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ClosureElt {
    pub closure: ExprId,
    pub index: u32,
}

/// `tuple[index]` with a static index.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct TupleProj {
    pub tuple: ExprId,
    pub index: u32,
}

// Structural kinds

/// `value[index]`. Also a legal assignment target.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Index {
    pub value: ExprId,
    pub index: ExprId,
}

/// `start:stop:step`.
///
/// All three slots are mandatory. An omitted bound is a `Const(None)` node,
/// so there is never a missing child to skip.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Slice {
    pub start: ExprId,
    pub stop: ExprId,
    pub step: ExprId,
}

/// `range(start, stop, step)`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Range {
    pub start: ExprId,
    pub stop: ExprId,
    pub step: ExprId,
}

/// Primitive operator applied to `args`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct PrimCall {
    pub prim: Prim,
    pub args: ExprRange,
}

/// Call of an arbitrary callee expression.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Call {
    pub func: ExprId,
    pub args: ExprRange,
}

/// A function partially applied to captured `args`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Closure {
    pub func: ExprId,
    pub args: ExprRange,
}

// Allocation

/// Allocation of `count` scalars.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Alloc {
    pub count: ExprId,
    pub elt_ty: TypeId,
}

/// Allocation of an uninitialized array of the given shape.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct AllocArray {
    pub shape: ExprId,
    pub elt_ty: TypeId,
}

/// Array header over an existing data pointer.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrayView {
    pub data: ExprId,
    pub shape: ExprId,
    pub strides: ExprId,
    pub offset: ExprId,
    pub size: ExprId,
}

/// `reshape(array, shape)`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Reshape {
    pub array: ExprId,
    pub shape: ExprId,
}

// Parallel combinators

/// `map(func, args...)`, also used for `OuterMap`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Map {
    pub func: ExprId,
    pub args: ExprRange,
}

/// `reduce(func, args..., init=?)`, also used for `Scan`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Reduce {
    pub func: ExprId,
    pub init: Option<ExprId>,
    pub args: ExprRange,
}

/// Function evaluated at every index of `shape`.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexMap {
    pub func: ExprId,
    pub shape: ExprId,
}

/// Index-space reduction. Unlike [`Reduce`], `init` is mandatory.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexReduce {
    pub func: ExprId,
    pub combine: ExprId,
    pub shape: ExprId,
    pub init: ExprId,
}

/// Index-space prefix scan.
#[derive(Clone, Copy, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IndexScan {
    pub func: ExprId,
    pub init: Option<ExprId>,
    pub shape: ExprId,
}

/// Expression kinds.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ExprKind {
    // Leaves
    Var(Name),
    Const(ConstValue),
    UntypedFn(FnId),
    TypedFn(FnId),
    TypeValue(TypeId),

    // Unary wrappers
    Attribute(Attribute),
    Cast(Cast),
    ClosureElt(ClosureElt),
    TupleProj(TupleProj),

    // Structural
    Tuple(ExprRange),
    Struct(ExprRange),
    Array(ExprRange),
    Index(Index),
    Slice(Slice),
    Range(Range),
    PrimCall(PrimCall),
    Call(Call),
    Closure(Closure),

    // Allocation and array metadata
    Alloc(Alloc),
    AllocArray(AllocArray),
    ArrayView(ArrayView),
    Shape(ExprId),
    Strides(ExprId),
    Ravel(ExprId),
    Reshape(Reshape),

    // Parallel combinators
    Map(Map),
    OuterMap(Map),
    Reduce(Reduce),
    Scan(Reduce),
    IndexMap(IndexMap),
    IndexReduce(IndexReduce),
    IndexScan(IndexScan),

    /// Placeholder left by upstream error recovery. Not part of the IR
    /// proper: traversal rejects it with `UnrecognizedNodeKind`.
    Error,
}

/// Fieldless mirror of [`ExprKind`], for diagnostics and tallies.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, PartialOrd, Ord)]
pub enum ExprTag {
    Var,
    Const,
    UntypedFn,
    TypedFn,
    TypeValue,
    Attribute,
    Cast,
    ClosureElt,
    TupleProj,
    Tuple,
    Struct,
    Array,
    Index,
    Slice,
    Range,
    PrimCall,
    Call,
    Closure,
    Alloc,
    AllocArray,
    ArrayView,
    Shape,
    Strides,
    Ravel,
    Reshape,
    Map,
    OuterMap,
    Reduce,
    Scan,
    IndexMap,
    IndexReduce,
    IndexScan,
    Error,
}

impl ExprTag {
    pub const fn name(self) -> &'static str {
        match self {
            ExprTag::Var => "Var",
            ExprTag::Const => "Const",
            ExprTag::UntypedFn => "UntypedFn",
            ExprTag::TypedFn => "TypedFn",
            ExprTag::TypeValue => "TypeValue",
            ExprTag::Attribute => "Attribute",
            ExprTag::Cast => "Cast",
            ExprTag::ClosureElt => "ClosureElt",
            ExprTag::TupleProj => "TupleProj",
            ExprTag::Tuple => "Tuple",
            ExprTag::Struct => "Struct",
            ExprTag::Array => "Array",
            ExprTag::Index => "Index",
            ExprTag::Slice => "Slice",
            ExprTag::Range => "Range",
            ExprTag::PrimCall => "PrimCall",
            ExprTag::Call => "Call",
            ExprTag::Closure => "Closure",
            ExprTag::Alloc => "Alloc",
            ExprTag::AllocArray => "AllocArray",
            ExprTag::ArrayView => "ArrayView",
            ExprTag::Shape => "Shape",
            ExprTag::Strides => "Strides",
            ExprTag::Ravel => "Ravel",
            ExprTag::Reshape => "Reshape",
            ExprTag::Map => "Map",
            ExprTag::OuterMap => "OuterMap",
            ExprTag::Reduce => "Reduce",
            ExprTag::Scan => "Scan",
            ExprTag::IndexMap => "IndexMap",
            ExprTag::IndexReduce => "IndexReduce",
            ExprTag::IndexScan => "IndexScan",
            ExprTag::Error => "Error",
        }
    }

    /// True for kinds with no child expressions.
    pub const fn is_leaf(self) -> bool {
        matches!(
            self,
            ExprTag::Var
                | ExprTag::Const
                | ExprTag::UntypedFn
                | ExprTag::TypedFn
                | ExprTag::TypeValue
        )
    }

    /// True for kinds legal as an assignment target.
    pub const fn is_lhs(self) -> bool {
        matches!(
            self,
            ExprTag::Var | ExprTag::Tuple | ExprTag::Index | ExprTag::Attribute
        )
    }
}

impl fmt::Display for ExprTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl ExprKind {
    pub const fn tag(&self) -> ExprTag {
        match self {
            ExprKind::Var(_) => ExprTag::Var,
            ExprKind::Const(_) => ExprTag::Const,
            ExprKind::UntypedFn(_) => ExprTag::UntypedFn,
            ExprKind::TypedFn(_) => ExprTag::TypedFn,
            ExprKind::TypeValue(_) => ExprTag::TypeValue,
            ExprKind::Attribute(_) => ExprTag::Attribute,
            ExprKind::Cast(_) => ExprTag::Cast,
            ExprKind::ClosureElt(_) => ExprTag::ClosureElt,
            ExprKind::TupleProj(_) => ExprTag::TupleProj,
            ExprKind::Tuple(_) => ExprTag::Tuple,
            ExprKind::Struct(_) => ExprTag::Struct,
            ExprKind::Array(_) => ExprTag::Array,
            ExprKind::Index(_) => ExprTag::Index,
            ExprKind::Slice(_) => ExprTag::Slice,
            ExprKind::Range(_) => ExprTag::Range,
            ExprKind::PrimCall(_) => ExprTag::PrimCall,
            ExprKind::Call(_) => ExprTag::Call,
            ExprKind::Closure(_) => ExprTag::Closure,
            ExprKind::Alloc(_) => ExprTag::Alloc,
            ExprKind::AllocArray(_) => ExprTag::AllocArray,
            ExprKind::ArrayView(_) => ExprTag::ArrayView,
            ExprKind::Shape(_) => ExprTag::Shape,
            ExprKind::Strides(_) => ExprTag::Strides,
            ExprKind::Ravel(_) => ExprTag::Ravel,
            ExprKind::Reshape(_) => ExprTag::Reshape,
            ExprKind::Map(_) => ExprTag::Map,
            ExprKind::OuterMap(_) => ExprTag::OuterMap,
            ExprKind::Reduce(_) => ExprTag::Reduce,
            ExprKind::Scan(_) => ExprTag::Scan,
            ExprKind::IndexMap(_) => ExprTag::IndexMap,
            ExprKind::IndexReduce(_) => ExprTag::IndexReduce,
            ExprKind::IndexScan(_) => ExprTag::IndexScan,
            ExprKind::Error => ExprTag::Error,
        }
    }

    /// Direct children in default visit order.
    ///
    /// Optional `init` slots appear only when present. Expression lists are
    /// resolved through `arena`; one that does not resolve is
    /// [`VisitError::DanglingNode`](crate::VisitError::DanglingNode).
    pub fn children(&self, arena: &IrArena) -> VisitResult<SmallVec<[ExprId; 4]>> {
        let head_then = |head: ExprId, range: ExprRange| -> VisitResult<SmallVec<[ExprId; 4]>> {
            let mut out: SmallVec<[ExprId; 4]> = smallvec![head];
            out.extend_from_slice(arena.expr_list(range)?);
            Ok(out)
        };

        let children = match self {
            ExprKind::Var(_)
            | ExprKind::Const(_)
            | ExprKind::UntypedFn(_)
            | ExprKind::TypedFn(_)
            | ExprKind::TypeValue(_)
            | ExprKind::Error => SmallVec::new(),

            ExprKind::Attribute(Attribute { value, .. })
            | ExprKind::Cast(Cast { value, .. }) => smallvec![*value],
            ExprKind::ClosureElt(elt) => smallvec![elt.closure],
            ExprKind::TupleProj(proj) => smallvec![proj.tuple],

            ExprKind::Tuple(elts) | ExprKind::Struct(elts) | ExprKind::Array(elts) => {
                SmallVec::from_slice(arena.expr_list(*elts)?)
            }
            ExprKind::Index(index) => smallvec![index.value, index.index],
            ExprKind::Slice(Slice { start, stop, step })
            | ExprKind::Range(Range { start, stop, step }) => smallvec![*start, *stop, *step],
            ExprKind::PrimCall(call) => SmallVec::from_slice(arena.expr_list(call.args)?),
            ExprKind::Call(Call { func, args }) | ExprKind::Closure(Closure { func, args }) => {
                head_then(*func, *args)?
            }

            ExprKind::Alloc(alloc) => smallvec![alloc.count],
            ExprKind::AllocArray(alloc) => smallvec![alloc.shape],
            ExprKind::ArrayView(view) => {
                smallvec![view.data, view.shape, view.strides, view.offset, view.size]
            }
            ExprKind::Shape(array) | ExprKind::Strides(array) | ExprKind::Ravel(array) => {
                smallvec![*array]
            }
            ExprKind::Reshape(reshape) => smallvec![reshape.array, reshape.shape],

            ExprKind::Map(map) | ExprKind::OuterMap(map) => head_then(map.func, map.args)?,
            ExprKind::Reduce(reduce) | ExprKind::Scan(reduce) => {
                let mut out: SmallVec<[ExprId; 4]> = smallvec![reduce.func];
                out.extend(reduce.init);
                out.extend_from_slice(arena.expr_list(reduce.args)?);
                out
            }
            ExprKind::IndexMap(map) => smallvec![map.func, map.shape],
            ExprKind::IndexReduce(reduce) => {
                smallvec![reduce.func, reduce.combine, reduce.shape, reduce.init]
            }
            ExprKind::IndexScan(scan) => {
                let mut out: SmallVec<[ExprId; 4]> = smallvec![scan.func];
                out.extend(scan.init);
                out.push(scan.shape);
                out
            }
        };
        Ok(children)
    }
}
