//! IR Visitor Pattern
//!
//! Generic, read-only traversal of functions in explicit-merge form. Every
//! compiler pass that needs to look at a whole function body (type
//! inference, liveness, optimization, codegen) implements [`Visitor`] and
//! overrides only the hooks it cares about.
//!
//! # Design
//!
//! There is one hook per node kind, plus hooks for assignment targets and
//! for the merge points of branches and loops. Each hook defaults to a
//! `walk_*` function that visits the node's children in a fixed order. An
//! override that still wants the default recursion calls the matching
//! `walk_*` function itself; one that returns early prunes the subtree.
//!
//! The IR is never modified. Any state a pass accumulates lives in the
//! visitor value, so independent passes can run over different functions
//! concurrently.
//!
//! Expression hooks return `Self::Output`. Pure traversals use `()`.
//! Composite walkers return `Output::default()`, except `Cast` and
//! `TupleProj`, which pass their operand's result through.
//!
//! # Visit order
//!
//! Children are visited depth-first, left to right, in the field order of
//! the node. Later passes rely on this (e.g. "first definition wins"), so
//! the order is part of the contract:
//!
//! - `If`: cond, true block, false block, then the merge map.
//! - `While`: loop-start merge hook, cond, body, loop-repeat merge hook.
//! - `ForLoop`: var, start, loop-start merge hook, stop, body, step,
//!   loop-repeat merge hook.
//! - merge maps: entries in order, left alternative before right.
//! - `Reduce`/`Scan`: func, init (if present), args.
//! - `IndexScan`: func, init (if present), shape.
//!
//! Function references are leaves. Nothing here descends into another
//! function's body; a pass that wants to must track visited `FnId`s itself
//! to survive recursive functions.
//!
//! # Example
//!
//! ```text
//! struct CountVars {
//!     count: usize,
//! }
//!
//! impl<'ir> Visitor<'ir> for CountVars {
//!     type Output = ();
//!
//!     fn visit_var(&mut self, _name: Name, _arena: &'ir IrArena) -> VisitResult<()> {
//!         self.count += 1;
//!         Ok(())
//!     }
//! }
//! ```

mod walk;

pub use walk::{
    walk_alloc, walk_alloc_array, walk_array_meta, walk_array_view, walk_assign, walk_attribute,
    walk_block, walk_call, walk_cast, walk_children, walk_closure, walk_closure_elt,
    walk_elements, walk_expr_list, walk_expr_stmt, walk_fn, walk_for_loop, walk_if,
    walk_index, walk_index_map, walk_index_reduce, walk_index_scan, walk_map, walk_merge,
    walk_par_for, walk_phi, walk_prim_call, walk_range, walk_reduce, walk_reshape, walk_return,
    walk_slice, walk_tuple_proj, walk_while,
};

use tern_stack::ensure_sufficient_stack;

use crate::ast::{
    Alloc, AllocArray, ArrayView, Assign, Attribute, Call, Cast, Closure, ClosureElt, ConstValue,
    ExprKind, ForLoop, Function, If, Index, IndexMap, IndexReduce, IndexScan, Map, ParFor,
    PhiNode, PrimCall, Range, Reduce, Reshape, Slice, StmtKind, TupleProj, While,
};
use crate::{
    ExprId, ExprRange, FnId, IrArena, Name, NodeRef, PhiRange, StmtId, StmtRange, TypeId,
    VisitError, VisitResult,
};

/// IR visitor.
///
/// Override `visit_*` methods to attach behavior to specific nodes; call
/// the matching `walk_*` function to keep the default traversal.
pub trait Visitor<'ir> {
    /// Value produced by expression hooks.
    type Output: Default;

    // Entry points

    /// Visit a whole function body. The top-level entry point.
    fn visit_fn(&mut self, function: &'ir Function, arena: &'ir IrArena) -> VisitResult<()> {
        walk_fn(self, function, arena)
    }

    /// Visit a block's statements in order.
    fn visit_block(&mut self, block: StmtRange, arena: &'ir IrArena) -> VisitResult<()> {
        walk_block(self, block, arena)
    }

    /// Dispatch a statement to its kind's hook.
    fn visit_stmt(&mut self, id: StmtId, arena: &'ir IrArena) -> VisitResult<()> {
        dispatch_stmt(self, id, arena)
    }

    /// Dispatch an expression to its kind's hook.
    fn visit_expr(&mut self, id: ExprId, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        dispatch_expr(self, id, arena)
    }

    /// Visit each expression of a list, collecting the results.
    fn visit_expr_list(
        &mut self,
        list: ExprRange,
        arena: &'ir IrArena,
    ) -> VisitResult<Vec<Self::Output>> {
        walk_expr_list(self, list, arena)
    }

    /// Dispatch an assignment target to its kind's LHS hook.
    fn visit_lhs(&mut self, id: ExprId, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        dispatch_lhs(self, id, arena)
    }

    // Leaves

    fn visit_var(&mut self, _name: Name, _arena: &'ir IrArena) -> VisitResult<Self::Output> {
        Ok(Self::Output::default())
    }

    fn visit_const(
        &mut self,
        _value: &'ir ConstValue,
        _arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        Ok(Self::Output::default())
    }

    fn visit_untyped_fn(&mut self, _func: FnId, _arena: &'ir IrArena) -> VisitResult<Self::Output> {
        Ok(Self::Output::default())
    }

    fn visit_typed_fn(&mut self, _func: FnId, _arena: &'ir IrArena) -> VisitResult<Self::Output> {
        Ok(Self::Output::default())
    }

    fn visit_type_value(
        &mut self,
        _ty: TypeId,
        _arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        Ok(Self::Output::default())
    }

    // Unary wrappers

    fn visit_attribute(
        &mut self,
        attr: &'ir Attribute,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_attribute(self, attr, arena)
    }

    fn visit_cast(&mut self, cast: &'ir Cast, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_cast(self, cast, arena)
    }

    fn visit_closure_elt(
        &mut self,
        elt: &'ir ClosureElt,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_closure_elt(self, elt, arena)
    }

    fn visit_tuple_proj(
        &mut self,
        proj: &'ir TupleProj,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_tuple_proj(self, proj, arena)
    }

    // Structural

    fn visit_tuple(&mut self, elts: ExprRange, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_elements(self, elts, arena)
    }

    fn visit_struct(&mut self, args: ExprRange, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_elements(self, args, arena)
    }

    fn visit_array(&mut self, elts: ExprRange, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_elements(self, elts, arena)
    }

    fn visit_index(&mut self, index: &'ir Index, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_index(self, index, arena)
    }

    fn visit_slice(&mut self, slice: &'ir Slice, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_slice(self, slice, arena)
    }

    fn visit_range(&mut self, range: &'ir Range, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_range(self, range, arena)
    }

    fn visit_prim_call(
        &mut self,
        call: &'ir PrimCall,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_prim_call(self, call, arena)
    }

    fn visit_call(&mut self, call: &'ir Call, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_call(self, call, arena)
    }

    fn visit_closure(
        &mut self,
        closure: &'ir Closure,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_closure(self, closure, arena)
    }

    // Allocation and array metadata

    fn visit_alloc(&mut self, alloc: &'ir Alloc, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_alloc(self, alloc, arena)
    }

    fn visit_alloc_array(
        &mut self,
        alloc: &'ir AllocArray,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_alloc_array(self, alloc, arena)
    }

    fn visit_array_view(
        &mut self,
        view: &'ir ArrayView,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_array_view(self, view, arena)
    }

    fn visit_shape(&mut self, array: ExprId, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_array_meta(self, array, arena)
    }

    fn visit_strides(&mut self, array: ExprId, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_array_meta(self, array, arena)
    }

    fn visit_ravel(&mut self, array: ExprId, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_array_meta(self, array, arena)
    }

    fn visit_reshape(
        &mut self,
        reshape: &'ir Reshape,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_reshape(self, reshape, arena)
    }

    // Parallel combinators

    fn visit_map(&mut self, map: &'ir Map, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_map(self, map, arena)
    }

    fn visit_outer_map(&mut self, map: &'ir Map, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_map(self, map, arena)
    }

    fn visit_reduce(
        &mut self,
        reduce: &'ir Reduce,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_reduce(self, reduce, arena)
    }

    fn visit_scan(&mut self, scan: &'ir Reduce, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        walk_reduce(self, scan, arena)
    }

    fn visit_index_map(
        &mut self,
        map: &'ir IndexMap,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_index_map(self, map, arena)
    }

    fn visit_index_reduce(
        &mut self,
        reduce: &'ir IndexReduce,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_index_reduce(self, reduce, arena)
    }

    fn visit_index_scan(
        &mut self,
        scan: &'ir IndexScan,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        walk_index_scan(self, scan, arena)
    }

    // Assignment targets

    fn visit_lhs_var(&mut self, name: Name, arena: &'ir IrArena) -> VisitResult<Self::Output> {
        self.visit_var(name, arena)
    }

    /// Elements of a tuple target are visited as plain expressions.
    fn visit_lhs_tuple(
        &mut self,
        elts: ExprRange,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        self.visit_tuple(elts, arena)
    }

    fn visit_lhs_index(
        &mut self,
        index: &'ir Index,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        self.visit_index(index, arena)
    }

    fn visit_lhs_attribute(
        &mut self,
        attr: &'ir Attribute,
        arena: &'ir IrArena,
    ) -> VisitResult<Self::Output> {
        self.visit_attribute(attr, arena)
    }

    // Statements

    fn visit_assign(&mut self, assign: &'ir Assign, arena: &'ir IrArena) -> VisitResult<()> {
        walk_assign(self, assign, arena)
    }

    fn visit_expr_stmt(&mut self, value: ExprId, arena: &'ir IrArena) -> VisitResult<()> {
        walk_expr_stmt(self, value, arena)
    }

    fn visit_return(&mut self, value: ExprId, arena: &'ir IrArena) -> VisitResult<()> {
        walk_return(self, value, arena)
    }

    fn visit_comment(&mut self, _text: Name, _arena: &'ir IrArena) -> VisitResult<()> {
        Ok(())
    }

    fn visit_if(&mut self, stmt: &'ir If, arena: &'ir IrArena) -> VisitResult<()> {
        walk_if(self, stmt, arena)
    }

    fn visit_while(&mut self, stmt: &'ir While, arena: &'ir IrArena) -> VisitResult<()> {
        walk_while(self, stmt, arena)
    }

    fn visit_for_loop(&mut self, stmt: &'ir ForLoop, arena: &'ir IrArena) -> VisitResult<()> {
        walk_for_loop(self, stmt, arena)
    }

    fn visit_par_for(&mut self, stmt: &'ir ParFor, arena: &'ir IrArena) -> VisitResult<()> {
        walk_par_for(self, stmt, arena)
    }

    // Merge points

    /// Visit every entry of a merge map, in order.
    fn visit_merge(&mut self, merge: PhiRange, arena: &'ir IrArena) -> VisitResult<()> {
        walk_merge(self, merge, arena)
    }

    /// Visit one phi entry: left alternative, then right.
    fn visit_phi(&mut self, phi: &'ir PhiNode, arena: &'ir IrArena) -> VisitResult<()> {
        walk_phi(self, phi, arena)
    }

    /// Merge map at the join after an `If`.
    fn visit_merge_if(&mut self, merge: PhiRange, arena: &'ir IrArena) -> VisitResult<()> {
        self.visit_merge(merge, arena)
    }

    /// Loop-head merge map, seen on entry before the body has run.
    ///
    /// Only the left (entering) alternatives are meaningful here, so the
    /// default visits nothing.
    fn visit_merge_loop_start(&mut self, _merge: PhiRange, _arena: &'ir IrArena) -> VisitResult<()> {
        Ok(())
    }

    /// Loop-head merge map, seen again at the backedge after the body.
    fn visit_merge_loop_repeat(&mut self, merge: PhiRange, arena: &'ir IrArena) -> VisitResult<()> {
        self.visit_merge(merge, arena)
    }
}

// Dispatch

/// Route an expression to the hook for its kind.
///
/// Fails with [`VisitError::UnrecognizedNodeKind`] on an error placeholder
/// and [`VisitError::DanglingNode`] on an id the arena does not hold.
pub fn dispatch_expr<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    id: ExprId,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    let Some(expr) = arena.get_expr(id) else {
        tracing::debug!(?id, "dangling expression reference");
        return Err(VisitError::DanglingNode(NodeRef::Expr(id)));
    };

    ensure_sufficient_stack(move || match &expr.kind {
        ExprKind::Var(name) => visitor.visit_var(*name, arena),
        ExprKind::Const(value) => visitor.visit_const(value, arena),
        ExprKind::UntypedFn(func) => visitor.visit_untyped_fn(*func, arena),
        ExprKind::TypedFn(func) => visitor.visit_typed_fn(*func, arena),
        ExprKind::TypeValue(ty) => visitor.visit_type_value(*ty, arena),

        ExprKind::Attribute(attr) => visitor.visit_attribute(attr, arena),
        ExprKind::Cast(cast) => visitor.visit_cast(cast, arena),
        ExprKind::ClosureElt(elt) => visitor.visit_closure_elt(elt, arena),
        ExprKind::TupleProj(proj) => visitor.visit_tuple_proj(proj, arena),

        ExprKind::Tuple(elts) => visitor.visit_tuple(*elts, arena),
        ExprKind::Struct(args) => visitor.visit_struct(*args, arena),
        ExprKind::Array(elts) => visitor.visit_array(*elts, arena),
        ExprKind::Index(index) => visitor.visit_index(index, arena),
        ExprKind::Slice(slice) => visitor.visit_slice(slice, arena),
        ExprKind::Range(range) => visitor.visit_range(range, arena),
        ExprKind::PrimCall(call) => visitor.visit_prim_call(call, arena),
        ExprKind::Call(call) => visitor.visit_call(call, arena),
        ExprKind::Closure(closure) => visitor.visit_closure(closure, arena),

        ExprKind::Alloc(alloc) => visitor.visit_alloc(alloc, arena),
        ExprKind::AllocArray(alloc) => visitor.visit_alloc_array(alloc, arena),
        ExprKind::ArrayView(view) => visitor.visit_array_view(view, arena),
        ExprKind::Shape(array) => visitor.visit_shape(*array, arena),
        ExprKind::Strides(array) => visitor.visit_strides(*array, arena),
        ExprKind::Ravel(array) => visitor.visit_ravel(*array, arena),
        ExprKind::Reshape(reshape) => visitor.visit_reshape(reshape, arena),

        ExprKind::Map(map) => visitor.visit_map(map, arena),
        ExprKind::OuterMap(map) => visitor.visit_outer_map(map, arena),
        ExprKind::Reduce(reduce) => visitor.visit_reduce(reduce, arena),
        ExprKind::Scan(scan) => visitor.visit_scan(scan, arena),
        ExprKind::IndexMap(map) => visitor.visit_index_map(map, arena),
        ExprKind::IndexReduce(reduce) => visitor.visit_index_reduce(reduce, arena),
        ExprKind::IndexScan(scan) => visitor.visit_index_scan(scan, arena),

        ExprKind::Error => {
            tracing::debug!(?id, span = ?expr.span, "error placeholder reached the visitor");
            Err(VisitError::UnrecognizedNodeKind {
                node: NodeRef::Expr(id),
                span: expr.span,
            })
        }
    })
}

/// Route an assignment target to its LHS hook.
///
/// Only Var, Tuple, Index and Attribute are legal targets; anything else is
/// [`VisitError::UnsupportedLhsKind`].
pub fn dispatch_lhs<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    id: ExprId,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    let Some(expr) = arena.get_expr(id) else {
        tracing::debug!(?id, "dangling assignment target");
        return Err(VisitError::DanglingNode(NodeRef::Expr(id)));
    };

    match &expr.kind {
        ExprKind::Var(name) => visitor.visit_lhs_var(*name, arena),
        ExprKind::Tuple(elts) => visitor.visit_lhs_tuple(*elts, arena),
        ExprKind::Index(index) => visitor.visit_lhs_index(index, arena),
        ExprKind::Attribute(attr) => visitor.visit_lhs_attribute(attr, arena),
        ExprKind::Error => Err(VisitError::UnrecognizedNodeKind {
            node: NodeRef::Expr(id),
            span: expr.span,
        }),
        other => {
            let kind = other.tag().name();
            tracing::debug!(?id, kind, "unsupported assignment target");
            Err(VisitError::UnsupportedLhsKind {
                kind,
                id,
                span: expr.span,
            })
        }
    }
}

/// Route a statement to the hook for its kind.
pub fn dispatch_stmt<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    id: StmtId,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    let Some(stmt) = arena.get_stmt(id) else {
        tracing::debug!(?id, "dangling statement reference");
        return Err(VisitError::DanglingNode(NodeRef::Stmt(id)));
    };

    ensure_sufficient_stack(move || match &stmt.kind {
        StmtKind::Assign(assign) => visitor.visit_assign(assign, arena),
        StmtKind::ExprStmt(value) => visitor.visit_expr_stmt(*value, arena),
        StmtKind::Return(value) => visitor.visit_return(*value, arena),
        StmtKind::Comment(text) => visitor.visit_comment(*text, arena),
        StmtKind::If(branch) => visitor.visit_if(branch, arena),
        StmtKind::While(lp) => visitor.visit_while(lp, arena),
        StmtKind::ForLoop(lp) => visitor.visit_for_loop(lp, arena),
        StmtKind::ParFor(par) => visitor.visit_par_for(par, arena),
        StmtKind::Error => {
            tracing::debug!(?id, span = ?stmt.span, "error placeholder reached the visitor");
            Err(VisitError::UnrecognizedNodeKind {
                node: NodeRef::Stmt(id),
                span: stmt.span,
            })
        }
    })
}
