//! Analyses for the Tern compiler.
//!
//! Each analysis is a [`Visitor`](tern_ir::Visitor) over a single function
//! in explicit-merge form:
//!
//! - **Merge checking** ([`check_merges`]) reports merge maps that bind
//!   the same name twice.
//! - **Variable collection** ([`collect_vars`]) lists the names a function
//!   defines and reads, in first-occurrence order.
//!
//! Neither descends into functions referenced from the body. Run them per
//! function, e.g. over [`IrArena::functions`](tern_ir::IrArena::functions).

mod merge_check;
mod vars;

pub use merge_check::{check_merges, MergeProblem};
pub use vars::{collect_vars, VarSummary};

#[cfg(test)]
mod tests;
