//! Primitive operators and constant values.

use std::fmt;

/// Operator of a [`PrimCall`](super::PrimCall).
///
/// A primitive is a raw symbol, not an expression; visitors never descend
/// into it.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum Prim {
    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Neg,
    Abs,
    Sqrt,
    Exp,
    Log,
    Power,
    Min,
    Max,
    // Comparison
    Eq,
    NotEq,
    Lt,
    LtE,
    Gt,
    GtE,
    // Logical
    And,
    Or,
    Not,
}

impl Prim {
    /// Number of operands the operator takes.
    pub const fn arity(self) -> usize {
        match self {
            Prim::Neg | Prim::Abs | Prim::Sqrt | Prim::Exp | Prim::Log | Prim::Not => 1,
            _ => 2,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            Prim::Add => "add",
            Prim::Sub => "sub",
            Prim::Mul => "mul",
            Prim::Div => "div",
            Prim::Mod => "mod",
            Prim::Neg => "neg",
            Prim::Abs => "abs",
            Prim::Sqrt => "sqrt",
            Prim::Exp => "exp",
            Prim::Log => "log",
            Prim::Power => "power",
            Prim::Min => "minimum",
            Prim::Max => "maximum",
            Prim::Eq => "equal",
            Prim::NotEq => "not_equal",
            Prim::Lt => "less",
            Prim::LtE => "less_equal",
            Prim::Gt => "greater",
            Prim::GtE => "greater_equal",
            Prim::And => "logical_and",
            Prim::Or => "logical_or",
            Prim::Not => "logical_not",
        }
    }
}

impl fmt::Display for Prim {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.symbol())
    }
}

/// Value of a constant leaf.
///
/// Floats are stored as raw bits so `ConstValue` stays `Eq + Hash`.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
#[cfg_attr(feature = "cache", derive(serde::Serialize, serde::Deserialize))]
pub enum ConstValue {
    Int(i64),
    Float(u64),
    Bool(bool),
    /// Absent value. Doubles as the "unbounded" slice sentinel.
    None,
}

impl ConstValue {
    #[inline]
    pub fn float(value: f64) -> Self {
        ConstValue::Float(value.to_bits())
    }

    /// The float value, if this is a float constant.
    #[inline]
    pub fn as_f64(self) -> Option<f64> {
        match self {
            ConstValue::Float(bits) => Some(f64::from_bits(bits)),
            _ => None,
        }
    }
}
