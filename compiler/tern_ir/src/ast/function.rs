//! Function definitions.

use crate::{Name, Named, Span, Spanned, StmtRange};

/// Whether a function body has been through type inference.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug, Default)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum FunctionKind {
    #[default]
    Untyped,
    Typed,
}

/// A function in explicit-merge form.
///
/// Closures and calls refer to functions by [`FnId`](crate::FnId); the
/// visitor treats those references as leaves and never enters `body` on its
/// own.
#[derive(Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub struct Function {
    pub name: Name,
    pub kind: FunctionKind,
    pub params: Vec<Name>,
    pub body: StmtRange,
    pub span: Span,
}

impl Named for Function {
    fn name(&self) -> Name {
        self.name
    }
}

impl Spanned for Function {
    fn span(&self) -> Span {
        self.span
    }
}
