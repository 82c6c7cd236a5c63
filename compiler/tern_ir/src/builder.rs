//! Hand construction of IR.
//!
//! The parser and merge-construction stages produce IR through this
//! builder; tests use it to write small functions inline. Everything it
//! allocates gets [`Span::DUMMY`] unless a span is given explicitly.

use crate::{
    ConstValue, Expr, ExprId, ExprKind, ExprRange, FnId, Function, FunctionKind, IrArena, Name,
    PhiNode, PhiRange, Prim, PrimCall, SharedInterner, Span, Stmt, StmtKind, StmtRange,
    StringInterner,
};

/// Builds an [`IrArena`] with names resolved through a shared interner.
pub struct IrBuilder {
    arena: IrArena,
    interner: SharedInterner,
}

impl IrBuilder {
    pub fn new(interner: SharedInterner) -> Self {
        IrBuilder {
            arena: IrArena::new(),
            interner,
        }
    }

    pub fn arena(&self) -> &IrArena {
        &self.arena
    }

    pub fn interner(&self) -> &SharedInterner {
        &self.interner
    }

    pub fn into_arena(self) -> IrArena {
        self.arena
    }

    pub fn name(&self, s: &str) -> Name {
        self.interner.intern(s)
    }

    // Expressions

    pub fn expr(&mut self, kind: ExprKind) -> ExprId {
        self.expr_at(kind, Span::DUMMY)
    }

    pub fn expr_at(&mut self, kind: ExprKind, span: Span) -> ExprId {
        self.arena.alloc_expr(Expr::new(kind, span))
    }

    pub fn list(&mut self, ids: impl IntoIterator<Item = ExprId>) -> ExprRange {
        self.arena.alloc_expr_list(ids)
    }

    pub fn var(&mut self, name: &str) -> ExprId {
        let name = self.name(name);
        self.expr(ExprKind::Var(name))
    }

    pub fn int(&mut self, value: i64) -> ExprId {
        self.expr(ExprKind::Const(ConstValue::Int(value)))
    }

    pub fn float(&mut self, value: f64) -> ExprId {
        self.expr(ExprKind::Const(ConstValue::float(value)))
    }

    pub fn bool(&mut self, value: bool) -> ExprId {
        self.expr(ExprKind::Const(ConstValue::Bool(value)))
    }

    /// The `None` constant, also used for unbounded slice slots.
    pub fn none(&mut self) -> ExprId {
        self.expr(ExprKind::Const(ConstValue::None))
    }

    pub fn tuple(&mut self, elts: impl IntoIterator<Item = ExprId>) -> ExprId {
        let elts = self.list(elts);
        self.expr(ExprKind::Tuple(elts))
    }

    pub fn array(&mut self, elts: impl IntoIterator<Item = ExprId>) -> ExprId {
        let elts = self.list(elts);
        self.expr(ExprKind::Array(elts))
    }

    pub fn prim(&mut self, prim: Prim, args: impl IntoIterator<Item = ExprId>) -> ExprId {
        let args = self.list(args);
        self.expr(ExprKind::PrimCall(PrimCall { prim, args }))
    }

    // Statements

    pub fn stmt(&self, kind: StmtKind) -> Stmt {
        Stmt::new(kind, Span::DUMMY)
    }

    pub fn comment(&self, text: &str) -> Stmt {
        self.stmt(StmtKind::Comment(self.name(text)))
    }

    pub fn block(&mut self, stmts: impl IntoIterator<Item = Stmt>) -> StmtRange {
        self.arena.alloc_block(stmts)
    }

    /// Merge map from `(name, left, right)` entries, in the given order.
    pub fn merge<'s>(
        &mut self,
        entries: impl IntoIterator<Item = (&'s str, ExprId, ExprId)>,
    ) -> PhiRange {
        let phis: Vec<PhiNode> = entries
            .into_iter()
            .map(|(name, left, right)| PhiNode::new(self.name(name), left, right))
            .collect();
        self.arena.alloc_merge(phis)
    }

    // Functions

    /// An untyped function over an already-allocated body. Not stored.
    pub fn function(&self, name: &str, params: &[&str], body: StmtRange) -> Function {
        Function {
            name: self.name(name),
            kind: FunctionKind::Untyped,
            params: params.iter().map(|p| self.name(p)).collect(),
            body,
            span: Span::DUMMY,
        }
    }

    /// Store a function so expressions can refer to it by id.
    pub fn define(&mut self, function: Function) -> FnId {
        self.arena.alloc_function(function)
    }
}

impl Default for IrBuilder {
    fn default() -> Self {
        Self::new(SharedInterner::new(StringInterner::new()))
    }
}
