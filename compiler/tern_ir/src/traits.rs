//! Single-capability accessor traits.

use super::{Name, Span};

/// Has a source span.
pub trait Spanned {
    fn span(&self) -> Span;
}

/// Has a name.
pub trait Named {
    fn name(&self) -> Name;
}
