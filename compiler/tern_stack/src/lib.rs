//! Stack growth for recursive IR walks.
//!
//! Expression and statement dispatch in `tern_ir` recurses once per tree
//! level. Real programs stay shallow, but generated or adversarial IR can
//! nest thousands of levels deep. Every recursive entry point goes through
//! [`ensure_sufficient_stack`], which extends the stack on demand.
//!
//! On native targets the extension is done by `stacker`. On wasm32 the
//! closure runs directly.

/// Remaining stack below which a new segment is allocated (128KB).
const RED_ZONE: usize = 128 * 1024;

/// Size of each newly allocated stack segment (2MB).
const SEGMENT_SIZE: usize = 2 * 1024 * 1024;

/// Run `f`, first growing the stack if fewer than [`RED_ZONE`] bytes remain.
///
/// ```text
/// fn visit_expr(&mut self, id: ExprId, arena: &IrArena) -> VisitResult<()> {
///     ensure_sufficient_stack(|| dispatch_expr(self, id, arena))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, SEGMENT_SIZE, f)
}

/// wasm32: run `f` directly.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}
