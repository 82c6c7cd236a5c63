//! Arena storage for IR nodes.
//!
//! The construction stage allocates every node of a compilation unit into
//! one `IrArena`; traversal only ever reads from it. Lists are stored
//! flattened so that a block, an argument list or a merge map is a single
//! `(start, len)` range.

use crate::{
    Expr, ExprId, ExprRange, FnId, Function, NodeRef, PhiId, PhiNode, PhiRange, Stmt, StmtId,
    StmtRange, VisitError, VisitResult,
};

/// Convert a table length to a `u32` id.
///
/// # Panics
/// Panics if the table has outgrown 32-bit ids.
#[inline]
fn next_index(len: usize, table: &str) -> u32 {
    u32::try_from(len).unwrap_or_else(|_| panic!("IR arena {table} table exceeded u32::MAX"))
}

/// Backing storage for expressions, statements, merge maps and functions.
#[derive(Clone, Default, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct IrArena {
    exprs: Vec<Expr>,
    expr_lists: Vec<ExprId>,
    stmts: Vec<Stmt>,
    phis: Vec<PhiNode>,
    functions: Vec<Function>,
}

impl IrArena {
    pub fn new() -> Self {
        Self::default()
    }

    // Allocation

    pub fn alloc_expr(&mut self, expr: Expr) -> ExprId {
        let id = ExprId::new(next_index(self.exprs.len(), "expression"));
        self.exprs.push(expr);
        id
    }

    /// Store an ordered expression list.
    pub fn alloc_expr_list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        let start = next_index(self.expr_lists.len(), "expression list");
        self.expr_lists.extend(ids);
        let end = next_index(self.expr_lists.len(), "expression list");
        ExprRange::new(start, end - start)
    }

    /// Store a block. Statements are laid out contiguously in order, so
    /// nested blocks must be allocated before the statement containing them.
    pub fn alloc_block(&mut self, stmts: impl IntoIterator<Item = Stmt>) -> StmtRange {
        let start = next_index(self.stmts.len(), "statement");
        self.stmts.extend(stmts);
        let end = next_index(self.stmts.len(), "statement");
        StmtRange::new(start, end - start)
    }

    /// Store a merge map. Entry order is preserved and is the visit order.
    pub fn alloc_merge(&mut self, phis: impl IntoIterator<Item = PhiNode>) -> PhiRange {
        let start = next_index(self.phis.len(), "phi");
        self.phis.extend(phis);
        let end = next_index(self.phis.len(), "phi");
        PhiRange::new(start, end - start)
    }

    pub fn alloc_function(&mut self, function: Function) -> FnId {
        let id = FnId::new(next_index(self.functions.len(), "function"));
        self.functions.push(function);
        id
    }

    // Lookup

    #[inline]
    pub fn get_expr(&self, id: ExprId) -> Option<&Expr> {
        self.exprs.get(id.index())
    }

    /// Expression ids of a list, or `None` if the range runs past the arena.
    #[inline]
    pub fn get_expr_list(&self, range: ExprRange) -> Option<&[ExprId]> {
        self.expr_lists.get(range.indices())
    }

    /// Like [`get_expr_list`](Self::get_expr_list), failing with
    /// [`VisitError::DanglingNode`].
    pub fn expr_list(&self, range: ExprRange) -> VisitResult<&[ExprId]> {
        self.get_expr_list(range).ok_or_else(|| {
            tracing::debug!(?range, "dangling expression list");
            VisitError::DanglingNode(NodeRef::ExprList(range))
        })
    }

    #[inline]
    pub fn get_stmt(&self, id: StmtId) -> Option<&Stmt> {
        self.stmts.get(id.index())
    }

    /// Statements of a block, or `None` if the range runs past the arena.
    #[inline]
    pub fn get_block(&self, range: StmtRange) -> Option<&[Stmt]> {
        self.stmts.get(range.indices())
    }

    #[inline]
    pub fn get_phi(&self, id: PhiId) -> Option<&PhiNode> {
        self.phis.get(id.index())
    }

    /// Entries of a merge map, or `None` if the range runs past the arena.
    #[inline]
    pub fn get_merge(&self, range: PhiRange) -> Option<&[PhiNode]> {
        self.phis.get(range.indices())
    }

    /// Like [`get_merge`](Self::get_merge), failing with
    /// [`VisitError::DanglingNode`].
    pub fn merge(&self, range: PhiRange) -> VisitResult<&[PhiNode]> {
        self.get_merge(range).ok_or_else(|| {
            tracing::debug!(?range, "dangling merge map");
            VisitError::DanglingNode(NodeRef::Merge(range))
        })
    }

    #[inline]
    pub fn get_function(&self, id: FnId) -> Option<&Function> {
        self.functions.get(id.index())
    }

    /// All functions with their ids, in allocation order.
    pub fn functions(&self) -> impl Iterator<Item = (FnId, &Function)> {
        (0u32..)
            .zip(&self.functions)
            .map(|(raw, function)| (FnId::new(raw), function))
    }

    pub fn expr_count(&self) -> usize {
        self.exprs.len()
    }

    pub fn stmt_count(&self) -> usize {
        self.stmts.len()
    }
}
