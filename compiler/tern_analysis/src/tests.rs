use pretty_assertions::assert_eq;
use tern_ir::{
    Assign, ExprKind, ExprRange, Function, If, Index, IrBuilder, Name, NodeRef, PhiRange, Prim,
    StmtKind, VisitError, While,
};

use crate::{check_merges, collect_vars, MergeProblem, VarSummary};

/// `i0 = 0; while i < n { i1 = i + 1 }; return i`, merging `i` from `i0`/`i1`.
fn counting_loop(b: &mut IrBuilder) -> Function {
    let i0 = b.var("i0");
    let zero = b.int(0);
    let init = b.stmt(StmtKind::Assign(Assign { lhs: i0, rhs: zero }));

    let i = b.var("i");
    let n = b.var("n");
    let cond = b.prim(Prim::Lt, [i, n]);
    let i1 = b.var("i1");
    let i_again = b.var("i");
    let one = b.int(1);
    let next = b.prim(Prim::Add, [i_again, one]);
    let body = b.block([b.stmt(StmtKind::Assign(Assign { lhs: i1, rhs: next }))]);
    let entry = b.var("i0");
    let backedge = b.var("i1");
    let merge = b.merge([("i", entry, backedge)]);
    let lp = b.stmt(StmtKind::While(While { cond, body, merge }));

    let result = b.var("i");
    let ret = b.stmt(StmtKind::Return(result));
    let outer = b.block([init, lp, ret]);
    b.function("count", &["n"], outer)
}

fn names(b: &IrBuilder, names: &[&str]) -> Vec<Name> {
    names.iter().map(|n| b.name(n)).collect()
}

// Variable collection

#[test]
fn test_loop_entry_reads_only_left_alternative() {
    let mut b = IrBuilder::default();
    let function = counting_loop(&mut b);

    let summary = collect_vars(&function, b.arena());
    assert_eq!(
        summary,
        Ok(VarSummary {
            defs: names(&b, &["n", "i0", "i", "i1"]),
            // `i1` is only read at the backedge, after the body.
            uses: names(&b, &["i0", "i", "n", "i1"]),
        })
    );
}

#[test]
fn test_free_variables() {
    let mut b = IrBuilder::default();
    let x = b.var("x");
    let g = b.var("g");
    let y = b.var("y");
    let sum = b.prim(Prim::Add, [g, y]);
    let body = b.block([b.stmt(StmtKind::Assign(Assign { lhs: x, rhs: sum }))]);
    let function = b.function("f", &["y"], body);

    let Ok(summary) = collect_vars(&function, b.arena()) else {
        panic!("collection failed");
    };
    assert!(summary.is_defined(b.name("x")));
    assert!(summary.is_used(b.name("g")));
    assert!(!summary.is_used(b.name("x")));
    assert_eq!(summary.free().collect::<Vec<_>>(), vec![b.name("g")]);
}

#[test]
fn test_tuple_target_defines_each_element() {
    let mut b = IrBuilder::default();
    let a = b.var("a");
    let c = b.var("c");
    let target = b.tuple([a, c]);
    let pair = b.var("pair");
    let body = b.block([b.stmt(StmtKind::Assign(Assign {
        lhs: target,
        rhs: pair,
    }))]);
    let function = b.function("split", &[], body);

    assert_eq!(
        collect_vars(&function, b.arena()),
        Ok(VarSummary {
            defs: names(&b, &["a", "c"]),
            uses: names(&b, &["pair"]),
        })
    );
}

#[test]
fn test_index_target_reads_its_operands() {
    let mut b = IrBuilder::default();
    let arr = b.var("arr");
    let k = b.var("k");
    let lhs = b.expr(ExprKind::Index(Index { value: arr, index: k }));
    let v = b.var("v");
    let body = b.block([b.stmt(StmtKind::Assign(Assign { lhs, rhs: v }))]);
    let function = b.function("store", &["arr", "k", "v"], body);

    assert_eq!(
        collect_vars(&function, b.arena()),
        Ok(VarSummary {
            defs: names(&b, &["arr", "k", "v"]),
            uses: names(&b, &["arr", "k", "v"]),
        })
    );
}

#[test]
fn test_constant_target_fails_collection() {
    let mut b = IrBuilder::default();
    let lhs = b.int(1);
    let rhs = b.var("v");
    let body = b.block([b.stmt(StmtKind::Assign(Assign { lhs, rhs }))]);
    let function = b.function("bad", &[], body);

    assert!(matches!(
        collect_vars(&function, b.arena()),
        Err(VisitError::UnsupportedLhsKind { kind: "Const", .. })
    ));
}

// Merge checking

#[test]
fn test_well_formed_merges() {
    let mut b = IrBuilder::default();
    let function = counting_loop(&mut b);
    assert_eq!(check_merges(&function, b.arena()), Ok(vec![]));
}

#[test]
fn test_duplicate_if_merge_entry() {
    let mut b = IrBuilder::default();
    let cond = b.var("c");
    let empty = b.block([]);
    let l1 = b.int(1);
    let r1 = b.int(2);
    let l2 = b.int(3);
    let r2 = b.int(4);
    let l3 = b.int(5);
    let r3 = b.int(6);
    let merge = b.merge([("x", l1, r1), ("y", l2, r2), ("x", l3, r3)]);
    let body = b.block([b.stmt(StmtKind::If(If {
        cond,
        true_block: empty,
        false_block: empty,
        merge,
    }))]);
    let function = b.function("branch", &["c"], body);

    assert_eq!(
        check_merges(&function, b.arena()),
        Ok(vec![MergeProblem::DuplicateName {
            name: b.name("x"),
            first: 0,
            second: 2,
            merge,
        }])
    );
}

#[test]
fn test_loop_merge_checked_once() {
    let mut b = IrBuilder::default();
    let cond = b.bool(false);
    let body = b.block([]);
    let a = b.var("a0");
    let a1 = b.var("a1");
    let a2 = b.var("a0");
    let a3 = b.var("a2");
    let merge = b.merge([("a", a, a1), ("a", a2, a3)]);
    let outer = b.block([b.stmt(StmtKind::While(While { cond, body, merge }))]);
    let function = b.function("spin", &[], outer);

    let problems = check_merges(&function, b.arena());
    assert_eq!(problems.map(|p| p.len()), Ok(1));
}

#[test]
fn test_every_function_in_arena() {
    let mut b = IrBuilder::default();
    let looped = counting_loop(&mut b);
    b.define(looped);

    let cond = b.bool(true);
    let empty = b.block([]);
    let l = b.int(0);
    let r = b.int(1);
    let merge = b.merge([("z", l, r), ("z", r, l)]);
    let body = b.block([b.stmt(StmtKind::If(If {
        cond,
        true_block: empty,
        false_block: empty,
        merge,
    }))]);
    let broken = b.function("broken", &[], body);
    b.define(broken);

    let counts: Vec<usize> = b
        .arena()
        .functions()
        .map(|(_, function)| check_merges(function, b.arena()).map_or(usize::MAX, |p| p.len()))
        .collect();
    assert_eq!(counts, vec![0, 1]);
}

#[test]
fn test_unrecognized_node_aborts_check() {
    let mut b = IrBuilder::default();
    let bad = b.expr(ExprKind::Error);
    let body = b.block([b.stmt(StmtKind::ExprStmt(bad))]);
    let function = b.function("broken", &[], body);

    assert!(matches!(
        check_merges(&function, b.arena()),
        Err(VisitError::UnrecognizedNodeKind { node: NodeRef::Expr(id), .. }) if id == bad
    ));
}

#[test]
fn test_dangling_merge_aborts_both_analyses() {
    let mut b = IrBuilder::default();
    let cond = b.var("c");
    let body = b.block([]);
    let bad = PhiRange::new(40, 2);
    let outer = b.block([b.stmt(StmtKind::While(While {
        cond,
        body,
        merge: bad,
    }))]);
    let function = b.function("spin", &["c"], outer);

    let expected = VisitError::DanglingNode(NodeRef::Merge(bad));
    assert_eq!(check_merges(&function, b.arena()), Err(expected.clone()));
    assert_eq!(collect_vars(&function, b.arena()), Err(expected));
}

#[test]
fn test_dangling_tuple_target_aborts_collection() {
    let mut b = IrBuilder::default();
    let bad = ExprRange::new(10, 3);
    let lhs = b.expr(ExprKind::Tuple(bad));
    let rhs = b.var("pair");
    let body = b.block([b.stmt(StmtKind::Assign(Assign { lhs, rhs }))]);
    let function = b.function("split", &[], body);

    assert_eq!(
        collect_vars(&function, b.arena()),
        Err(VisitError::DanglingNode(NodeRef::ExprList(bad)))
    );
}
