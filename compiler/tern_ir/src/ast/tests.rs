use pretty_assertions::assert_eq;
use smallvec::SmallVec;

use super::*;
use crate::{ExprId, ExprRange, IrBuilder, NodeRef, Span, Spanned, TypeId, VisitError};

#[test]
fn test_expr_kind_hash() {
    use std::collections::HashSet;
    let mut set = HashSet::new();

    set.insert(ExprKind::Const(ConstValue::Int(0)));
    set.insert(ExprKind::Const(ConstValue::Int(0)));
    set.insert(ExprKind::Const(ConstValue::float(0.5)));
    set.insert(ExprKind::Const(ConstValue::None));

    assert_eq!(set.len(), 3);
}

#[test]
fn test_expr_spanned() {
    let expr = Expr::new(ExprKind::Const(ConstValue::Bool(true)), Span::new(4, 8));
    assert_eq!(expr.span(), Span::new(4, 8));
}

#[test]
fn test_const_float_bits() {
    assert_eq!(ConstValue::float(0.0), ConstValue::Float(0.0f64.to_bits()));
    assert_ne!(ConstValue::float(0.0), ConstValue::float(-0.0));
    assert_eq!(ConstValue::float(2.5).as_f64(), Some(2.5));
    assert_eq!(ConstValue::Int(1).as_f64(), None);
}

#[test]
fn test_prim_arity() {
    assert_eq!(Prim::Neg.arity(), 1);
    assert_eq!(Prim::Add.arity(), 2);
    assert_eq!(Prim::LtE.to_string(), "less_equal");
}

#[test]
fn test_leaf_and_lhs_tags() {
    assert!(ExprTag::Var.is_leaf());
    assert!(ExprTag::TypeValue.is_leaf());
    assert!(!ExprTag::Tuple.is_leaf());

    for tag in [ExprTag::Var, ExprTag::Tuple, ExprTag::Index, ExprTag::Attribute] {
        assert!(tag.is_lhs(), "{tag} should be a legal target");
    }
    for tag in [ExprTag::Const, ExprTag::Call, ExprTag::Slice, ExprTag::Error] {
        assert!(!tag.is_lhs(), "{tag} should not be a legal target");
    }
}

#[test]
fn test_children_in_visit_order() {
    let mut b = IrBuilder::default();
    let data = b.var("data");
    let shape = b.var("shape");
    let strides = b.var("strides");
    let offset = b.int(0);
    let size = b.var("n");
    let view = ArrayView {
        data,
        shape,
        strides,
        offset,
        size,
    };

    let children = ExprKind::ArrayView(view).children(b.arena());
    assert_eq!(
        children.unwrap_or_default().as_slice(),
        &[data, shape, strides, offset, size]
    );
}

#[test]
fn test_children_optional_init() {
    let mut b = IrBuilder::default();
    let func = b.var("add");
    let init = b.int(0);
    let xs = b.var("xs");
    let args = b.list([xs]);

    let with_init = ExprKind::Reduce(Reduce {
        func,
        init: Some(init),
        args,
    });
    let without_init = ExprKind::Scan(Reduce {
        func,
        init: None,
        args,
    });

    assert_eq!(with_init.children(b.arena()).unwrap_or_default().as_slice(), &[func, init, xs]);
    assert_eq!(without_init.children(b.arena()).unwrap_or_default().as_slice(), &[func, xs]);

    let shape = b.var("shape");
    let scan = ExprKind::IndexScan(IndexScan {
        func,
        init: Some(init),
        shape,
    });
    assert_eq!(scan.children(b.arena()).unwrap_or_default().as_slice(), &[func, init, shape]);
}

#[test]
fn test_children_of_leaves_and_error() {
    let b = IrBuilder::default();
    let leaves = [
        ExprKind::Var(b.name("x")),
        ExprKind::Const(ConstValue::Int(3)),
        ExprKind::TypeValue(TypeId::new(1)),
        ExprKind::Error,
    ];
    for kind in leaves {
        assert_eq!(kind.children(b.arena()), Ok(SmallVec::new()), "{:?}", kind.tag());
    }
}

#[test]
fn test_children_with_dangling_list() {
    let mut b = IrBuilder::default();
    let f = b.var("f");
    let bad = ExprRange::new(0, 50);

    let expected = Err(VisitError::DanglingNode(NodeRef::ExprList(bad)));
    assert_eq!(ExprKind::Tuple(bad).children(b.arena()), expected);
    assert_eq!(
        ExprKind::Map(Map { func: f, args: bad }).children(b.arena()),
        expected
    );
    assert_eq!(
        ExprKind::Reduce(Reduce {
            func: f,
            init: None,
            args: bad,
        })
        .children(b.arena()),
        expected
    );
}

#[test]
fn test_children_call_like() {
    let mut b = IrBuilder::default();
    let f = b.var("f");
    let a = b.var("a");
    let c = b.var("c");
    let args = b.list([a, c]);

    let call = ExprKind::Call(Call { func: f, args });
    let prim = ExprKind::PrimCall(PrimCall {
        prim: Prim::Add,
        args,
    });
    assert_eq!(call.children(b.arena()).unwrap_or_default().as_slice(), &[f, a, c]);
    // The operator of a primitive call is not a child.
    assert_eq!(prim.children(b.arena()).unwrap_or_default().as_slice(), &[a, c]);
}

#[test]
fn test_stmt_merge_accessor() {
    let mut b = IrBuilder::default();
    let cond = b.bool(true);
    let l = b.int(1);
    let r = b.int(2);
    let merge = b.merge([("x", l, r)]);
    let empty = b.block([]);

    let branch = StmtKind::If(If {
        cond,
        true_block: empty,
        false_block: empty,
        merge,
    });
    let par = StmtKind::ParFor(ParFor {
        func: ExprId::new(0),
        bounds: ExprId::new(1),
    });

    assert_eq!(branch.merge(), Some(merge));
    assert_eq!(par.merge(), None);
    assert_eq!(branch.name(), "If");
}
