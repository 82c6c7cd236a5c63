//! Default structural traversal for every node kind.
//!
//! Each function visits a node's children in the order documented on the
//! [`Visitor`] module and returns `Output::default()` unless noted.

use super::Visitor;
use crate::ast::{
    Alloc, AllocArray, ArrayView, Assign, Attribute, Call, Cast, Closure, ClosureElt, ExprKind,
    ForLoop, Function, If, Index, IndexMap, IndexReduce, IndexScan, Map, ParFor, PhiNode,
    PrimCall, Range, Reduce, Reshape, Slice, TupleProj, While,
};
use crate::{ExprId, ExprRange, IrArena, PhiRange, StmtRange, VisitResult};

// Functions, blocks, statements

/// Walk a function body top to bottom.
pub fn walk_fn<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    function: &'ir Function,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    tracing::trace!(
        name = function.name.raw(),
        stmts = function.body.len(),
        "walking function body"
    );
    visitor.visit_block(function.body, arena)
}

/// Walk every statement of a block in order.
pub fn walk_block<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    block: StmtRange,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    for id in block.ids() {
        visitor.visit_stmt(id, arena)?;
    }
    Ok(())
}

/// Target first, then value.
pub fn walk_assign<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    assign: &'ir Assign,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_lhs(assign.lhs, arena)?;
    visitor.visit_expr(assign.rhs, arena)?;
    Ok(())
}

pub fn walk_expr_stmt<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    value: ExprId,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_expr(value, arena)?;
    Ok(())
}

pub fn walk_return<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    value: ExprId,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_expr(value, arena)?;
    Ok(())
}

/// Condition, true block, false block, merge map.
///
/// Both blocks are always walked, true before false; the order is static
/// and says nothing about which branch runs.
pub fn walk_if<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    stmt: &'ir If,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_expr(stmt.cond, arena)?;
    visitor.visit_block(stmt.true_block, arena)?;
    visitor.visit_block(stmt.false_block, arena)?;
    visitor.visit_merge_if(stmt.merge, arena)
}

/// Loop-start merge, condition, body, loop-repeat merge.
pub fn walk_while<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    stmt: &'ir While,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_merge_loop_start(stmt.merge, arena)?;
    visitor.visit_expr(stmt.cond, arena)?;
    visitor.visit_block(stmt.body, arena)?;
    visitor.visit_merge_loop_repeat(stmt.merge, arena)
}

/// Loop variable, start, loop-start merge, stop, body, step, loop-repeat
/// merge.
///
/// This mirrors when each value becomes available at run time: `start` is
/// known before the loop is entered, `stop` is checked at the head, and
/// `step` is applied after the body on the way back to the head.
pub fn walk_for_loop<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    stmt: &'ir ForLoop,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_lhs(stmt.var, arena)?;
    visitor.visit_expr(stmt.start, arena)?;
    visitor.visit_merge_loop_start(stmt.merge, arena)?;
    visitor.visit_expr(stmt.stop, arena)?;
    visitor.visit_block(stmt.body, arena)?;
    visitor.visit_expr(stmt.step, arena)?;
    visitor.visit_merge_loop_repeat(stmt.merge, arena)
}

/// Function, then bounds. There is no merge map to visit.
pub fn walk_par_for<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    stmt: &'ir ParFor,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_expr(stmt.func, arena)?;
    visitor.visit_expr(stmt.bounds, arena)?;
    Ok(())
}

// Merge maps

/// Every phi entry, in map order.
pub fn walk_merge<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    merge: PhiRange,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    for phi in arena.merge(merge)? {
        visitor.visit_phi(phi, arena)?;
    }
    Ok(())
}

/// Left alternative, then right.
pub fn walk_phi<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    phi: &'ir PhiNode,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    visitor.visit_expr(phi.left, arena)?;
    visitor.visit_expr(phi.right, arena)?;
    Ok(())
}

// Expressions

/// Visit each expression of a list, collecting the results.
pub fn walk_expr_list<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    list: ExprRange,
    arena: &'ir IrArena,
) -> VisitResult<Vec<V::Output>> {
    arena
        .expr_list(list)?
        .iter()
        .map(|&id| visitor.visit_expr(id, arena))
        .collect()
}

/// Visit each expression of a list, discarding the results.
fn walk_each<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    list: ExprRange,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    for &id in arena.expr_list(list)? {
        visitor.visit_expr(id, arena)?;
    }
    Ok(())
}

/// Visit the direct children reported by [`ExprKind::children`], in order.
///
/// Fallback for passes that want uniform recursion without naming kinds.
pub fn walk_children<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    kind: &'ir ExprKind,
    arena: &'ir IrArena,
) -> VisitResult<()> {
    for id in kind.children(arena)? {
        visitor.visit_expr(id, arena)?;
    }
    Ok(())
}

pub fn walk_attribute<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    attr: &'ir Attribute,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(attr.value, arena)?;
    Ok(V::Output::default())
}

/// Returns the operand's result.
pub fn walk_cast<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    cast: &'ir Cast,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(cast.value, arena)
}

pub fn walk_closure_elt<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    elt: &'ir ClosureElt,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(elt.closure, arena)?;
    Ok(V::Output::default())
}

/// Returns the tuple's result.
pub fn walk_tuple_proj<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    proj: &'ir TupleProj,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(proj.tuple, arena)
}

/// Elements left to right. Shared by `Tuple`, `Struct` and `Array`.
pub fn walk_elements<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    elts: ExprRange,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    walk_each(visitor, elts, arena)?;
    Ok(V::Output::default())
}

/// Value, then index.
pub fn walk_index<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    index: &'ir Index,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(index.value, arena)?;
    visitor.visit_expr(index.index, arena)?;
    Ok(V::Output::default())
}

/// Start, stop, step. None of the slots can be absent.
pub fn walk_slice<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    slice: &'ir Slice,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(slice.start, arena)?;
    visitor.visit_expr(slice.stop, arena)?;
    visitor.visit_expr(slice.step, arena)?;
    Ok(V::Output::default())
}

/// Start, stop, step.
pub fn walk_range<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    range: &'ir Range,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(range.start, arena)?;
    visitor.visit_expr(range.stop, arena)?;
    visitor.visit_expr(range.step, arena)?;
    Ok(V::Output::default())
}

/// Arguments only; the operator is a symbol, not an expression.
pub fn walk_prim_call<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    call: &'ir PrimCall,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    walk_each(visitor, call.args, arena)?;
    Ok(V::Output::default())
}

/// Callee, then arguments.
pub fn walk_call<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    call: &'ir Call,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(call.func, arena)?;
    walk_each(visitor, call.args, arena)?;
    Ok(V::Output::default())
}

/// Function, then captured arguments.
pub fn walk_closure<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    closure: &'ir Closure,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(closure.func, arena)?;
    walk_each(visitor, closure.args, arena)?;
    Ok(V::Output::default())
}

pub fn walk_alloc<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    alloc: &'ir Alloc,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(alloc.count, arena)?;
    Ok(V::Output::default())
}

pub fn walk_alloc_array<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    alloc: &'ir AllocArray,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(alloc.shape, arena)?;
    Ok(V::Output::default())
}

/// Data, shape, strides, offset, size.
pub fn walk_array_view<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    view: &'ir ArrayView,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(view.data, arena)?;
    visitor.visit_expr(view.shape, arena)?;
    visitor.visit_expr(view.strides, arena)?;
    visitor.visit_expr(view.offset, arena)?;
    visitor.visit_expr(view.size, arena)?;
    Ok(V::Output::default())
}

/// The array operand of `Shape`, `Strides` and `Ravel`.
pub fn walk_array_meta<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    array: ExprId,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(array, arena)?;
    Ok(V::Output::default())
}

/// Array, then shape.
pub fn walk_reshape<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    reshape: &'ir Reshape,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(reshape.array, arena)?;
    visitor.visit_expr(reshape.shape, arena)?;
    Ok(V::Output::default())
}

/// Function, then argument arrays. Shared by `Map` and `OuterMap`.
pub fn walk_map<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    map: &'ir Map,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(map.func, arena)?;
    walk_each(visitor, map.args, arena)?;
    Ok(V::Output::default())
}

/// Function, init if present, then arguments. Shared by `Reduce` and `Scan`.
///
/// Presence decides, not value: an init that is the constant `0` is still
/// visited.
pub fn walk_reduce<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    reduce: &'ir Reduce,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(reduce.func, arena)?;
    if let Some(init) = reduce.init {
        visitor.visit_expr(init, arena)?;
    }
    walk_each(visitor, reduce.args, arena)?;
    Ok(V::Output::default())
}

/// Function, then output shape.
pub fn walk_index_map<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    map: &'ir IndexMap,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(map.func, arena)?;
    visitor.visit_expr(map.shape, arena)?;
    Ok(V::Output::default())
}

/// Function, combiner, shape, init. All four, always.
pub fn walk_index_reduce<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    reduce: &'ir IndexReduce,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(reduce.func, arena)?;
    visitor.visit_expr(reduce.combine, arena)?;
    visitor.visit_expr(reduce.shape, arena)?;
    visitor.visit_expr(reduce.init, arena)?;
    Ok(V::Output::default())
}

/// Function, init if present, then shape.
pub fn walk_index_scan<'ir, V: Visitor<'ir> + ?Sized>(
    visitor: &mut V,
    scan: &'ir IndexScan,
    arena: &'ir IrArena,
) -> VisitResult<V::Output> {
    visitor.visit_expr(scan.func, arena)?;
    if let Some(init) = scan.init {
        visitor.visit_expr(init, arena)?;
    }
    visitor.visit_expr(scan.shape, arena)?;
    Ok(V::Output::default())
}
