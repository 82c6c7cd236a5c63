//! Byte encoding of a whole [`IrArena`] for the incremental cache.
//!
//! Names are stored as raw interner indices, so a decoded arena is only
//! meaningful against the interner that produced it.

use crate::IrArena;

/// Failure to encode or decode a cached arena.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("failed to serialize IR arena: {0}")]
    Encode(#[source] bincode::Error),
    #[error("failed to deserialize IR arena: {0}")]
    Decode(#[source] bincode::Error),
}

impl IrArena {
    pub fn to_bytes(&self) -> Result<Vec<u8>, CacheError> {
        let bytes = bincode::serialize(self).map_err(CacheError::Encode)?;
        tracing::debug!(
            exprs = self.expr_count(),
            stmts = self.stmt_count(),
            bytes = bytes.len(),
            "encoded IR arena"
        );
        Ok(bytes)
    }

    pub fn from_bytes(bytes: &[u8]) -> Result<Self, CacheError> {
        bincode::deserialize(bytes).map_err(CacheError::Decode)
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::CacheError;
    use crate::visitor::dispatch_expr;
    use crate::{
        Assign, ExprId, ExprKind, If, IrArena, IrBuilder, PhiRange, Prim, Reduce, StmtKind,
        VisitResult, Visitor, While,
    };

    #[derive(Default)]
    struct Seen {
        exprs: Vec<ExprId>,
    }

    impl<'ir> Visitor<'ir> for Seen {
        type Output = ();

        fn visit_expr(&mut self, id: ExprId, arena: &'ir IrArena) -> VisitResult<()> {
            self.exprs.push(id);
            dispatch_expr(self, id, arena)
        }
    }

    fn traverse(arena: &IrArena) -> Vec<ExprId> {
        let mut seen = Seen::default();
        for (_, function) in arena.functions() {
            seen.visit_fn(function, arena)
                .unwrap_or_else(|e| panic!("traversal failed: {e}"));
        }
        seen.exprs
    }

    #[test]
    fn test_arena_round_trip() {
        let mut b = IrBuilder::default();
        let x = b.var("x");
        let half = b.float(0.5);
        let scaled = b.prim(Prim::Mul, [x, half]);
        let acc = b.var("acc");
        let init = b.int(0);
        let args = b.list([x]);
        let combine = b.var("add");
        let total = b.expr(ExprKind::Reduce(Reduce {
            func: combine,
            init: Some(init),
            args,
        }));
        let assign = b.stmt(StmtKind::Assign(Assign {
            lhs: acc,
            rhs: total,
        }));
        let cond = b.bool(true);
        let then_block = b.block([b.comment("then")]);
        let else_block = b.block([]);
        let left = b.var("x");
        let merge = b.merge([("y", left, scaled)]);
        let branch = b.stmt(StmtKind::If(If {
            cond,
            true_block: then_block,
            false_block: else_block,
            merge,
        }));
        let spin = b.stmt(StmtKind::While(While {
            cond,
            body: else_block,
            merge: PhiRange::EMPTY,
        }));
        let body = b.block([assign, branch, spin]);
        let function = b.function("f", &["x"], body);
        b.define(function);
        let arena = b.into_arena();

        let bytes = arena
            .to_bytes()
            .unwrap_or_else(|e| panic!("serialize failed: {e}"));
        let decoded =
            IrArena::from_bytes(&bytes).unwrap_or_else(|e| panic!("deserialize failed: {e}"));

        assert_eq!(decoded, arena);
        assert_eq!(traverse(&decoded), traverse(&arena));
    }

    #[test]
    fn test_truncated_bytes_fail_to_decode() {
        let mut b = IrBuilder::default();
        let v = b.var("v");
        let body = b.block([b.stmt(StmtKind::Return(v))]);
        let function = b.function("g", &[], body);
        b.define(function);

        let bytes = b
            .arena()
            .to_bytes()
            .unwrap_or_else(|e| panic!("serialize failed: {e}"));
        let truncated = &bytes[..bytes.len() / 2];
        assert!(matches!(
            IrArena::from_bytes(truncated),
            Err(CacheError::Decode(_))
        ));
    }
}
