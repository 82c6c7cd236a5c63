//! Defined and used variable names of a function.

use rustc_hash::FxHashSet;
use tern_ir::visitor::{walk_fn, walk_phi};
use tern_ir::{ExprRange, Function, IrArena, Name, PhiNode, PhiRange, VisitResult, Visitor};

/// Names a function defines and reads, each listed once.
///
/// Order is first occurrence in visit order, so the first entry for a name
/// is its earliest definition (or read).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VarSummary {
    /// Parameters, assignment targets and merged names.
    pub defs: Vec<Name>,
    /// Variables read anywhere in the body, including merge alternatives.
    pub uses: Vec<Name>,
}

impl VarSummary {
    pub fn is_defined(&self, name: Name) -> bool {
        self.defs.contains(&name)
    }

    pub fn is_used(&self, name: Name) -> bool {
        self.uses.contains(&name)
    }

    /// Names read but never defined in this function (free variables).
    pub fn free(&self) -> impl Iterator<Item = Name> + '_ {
        self.uses.iter().copied().filter(|name| !self.is_defined(*name))
    }
}

/// Collect the defined and used names of `function`.
pub fn collect_vars(function: &Function, arena: &IrArena) -> VisitResult<VarSummary> {
    let mut collector = VarCollector::default();
    collector.visit_fn(function, arena)?;

    tracing::debug!(
        function = function.name.raw(),
        defs = collector.summary.defs.len(),
        uses = collector.summary.uses.len(),
        "variables collected"
    );
    Ok(collector.summary)
}

#[derive(Default)]
struct VarCollector {
    summary: VarSummary,
    defined: FxHashSet<Name>,
    used: FxHashSet<Name>,
}

impl VarCollector {
    fn def(&mut self, name: Name) {
        if self.defined.insert(name) {
            self.summary.defs.push(name);
        }
    }

    fn read(&mut self, name: Name) {
        if self.used.insert(name) {
            self.summary.uses.push(name);
        }
    }
}

impl<'ir> Visitor<'ir> for VarCollector {
    type Output = ();

    fn visit_fn(&mut self, function: &'ir Function, arena: &'ir IrArena) -> VisitResult<()> {
        for &param in &function.params {
            self.def(param);
        }
        walk_fn(self, function, arena)
    }

    fn visit_var(&mut self, name: Name, _arena: &'ir IrArena) -> VisitResult<()> {
        self.read(name);
        Ok(())
    }

    fn visit_lhs_var(&mut self, name: Name, _arena: &'ir IrArena) -> VisitResult<()> {
        self.def(name);
        Ok(())
    }

    // Destructuring defines every element.
    fn visit_lhs_tuple(&mut self, elts: ExprRange, arena: &'ir IrArena) -> VisitResult<()> {
        for &elt in arena.expr_list(elts)? {
            self.visit_lhs(elt, arena)?;
        }
        Ok(())
    }

    fn visit_phi(&mut self, phi: &'ir PhiNode, arena: &'ir IrArena) -> VisitResult<()> {
        self.def(phi.name);
        walk_phi(self, phi, arena)
    }

    // On entry the backedge values do not exist yet.
    fn visit_merge_loop_start(&mut self, merge: PhiRange, arena: &'ir IrArena) -> VisitResult<()> {
        for phi in arena.merge(merge)? {
            self.def(phi.name);
            self.visit_expr(phi.left, arena)?;
        }
        Ok(())
    }
}
