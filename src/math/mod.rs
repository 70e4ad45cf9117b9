//! Mathematical expressions.
//!
//! SED-ML carries math as MathML content markup. This module holds the
//! in-memory form of such expressions ([`Math`]) together with an infix
//! rendering ([`formula_to_string`]) and a parser for the same infix syntax
//! ([`parse_formula`]). Reading and writing the MathML itself lives in the
//! `xml` module.

pub mod formula;
pub mod parse;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use formula::formula_to_string;
pub use parse::{FormulaError, parse_formula};

/// An expression tree.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Math {
    Integer(i64),
    Real(f64),
    Rational(i64, i64),
    ENotation { mantissa: f64, exponent: i64 },
    /// A reference to a variable or parameter (`<ci>`).
    Identifier(String),
    /// A `<csymbol>` with its definition URL.
    Symbol { definition_url: String, name: String },
    Constant(Constant),
    /// An operator applied to arguments.
    ///
    /// For `log` with a `<logbase>` and `root` with a `<degree>` the
    /// qualifier is the first argument.
    Apply { op: Operator, args: Vec<Math> },
    Piecewise {
        /// `(value, condition)` pairs.
        pieces: Vec<(Math, Math)>,
        otherwise: Option<Box<Math>>,
    },
}

impl Math {
    pub fn ident(name: impl Into<String>) -> Self {
        Math::Identifier(name.into())
    }

    pub fn apply(op: Operator, args: Vec<Math>) -> Self {
        Math::Apply { op, args }
    }

    pub fn binary(op: Operator, left: Math, right: Math) -> Self {
        Math::Apply {
            op,
            args: vec![left, right],
        }
    }

    /// Names of all `<ci>` identifiers in the expression, in order of appearance.
    pub fn identifiers(&self) -> Vec<&str> {
        let mut names = Vec::new();
        self.collect_identifiers(&mut names);
        names
    }

    fn collect_identifiers<'a>(&'a self, names: &mut Vec<&'a str>) {
        match self {
            Math::Identifier(name) => names.push(name),
            Math::Apply { args, .. } => args.iter().for_each(|a| a.collect_identifiers(names)),
            Math::Piecewise { pieces, otherwise } => {
                for (value, condition) in pieces {
                    value.collect_identifiers(names);
                    condition.collect_identifiers(names);
                }
                if let Some(otherwise) = otherwise {
                    otherwise.collect_identifiers(names);
                }
            }
            _ => {}
        }
    }
}

impl fmt::Display for Math {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&formula_to_string(self))
    }
}

/// MathML constant elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Constant {
    Pi,
    ExponentialE,
    True,
    False,
    Infinity,
    NotANumber,
}

impl Constant {
    pub fn mathml_name(&self) -> &'static str {
        match self {
            Constant::Pi => "pi",
            Constant::ExponentialE => "exponentiale",
            Constant::True => "true",
            Constant::False => "false",
            Constant::Infinity => "infinity",
            Constant::NotANumber => "notanumber",
        }
    }

    pub fn from_mathml_name(name: &str) -> Option<Self> {
        let constant = match name {
            "pi" => Constant::Pi,
            "exponentiale" => Constant::ExponentialE,
            "true" => Constant::True,
            "false" => Constant::False,
            "infinity" => Constant::Infinity,
            "notanumber" => Constant::NotANumber,
            _ => return None,
        };
        Some(constant)
    }

    /// The spelling used in infix formulas.
    pub fn formula_name(&self) -> &'static str {
        match self {
            Constant::Infinity => "INF",
            Constant::NotANumber => "NaN",
            other => other.mathml_name(),
        }
    }

    /// Recognises formula keywords, including the MathML spellings.
    pub fn from_formula_name(name: &str) -> Option<Self> {
        match name {
            "INF" | "inf" | "Inf" | "infinity" => Some(Constant::Infinity),
            "NaN" | "nan" | "notanumber" => Some(Constant::NotANumber),
            other => Self::from_mathml_name(other),
        }
    }
}

/// Operators that can appear as the first child of `<apply>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Operator {
    Plus,
    Minus,
    Times,
    Divide,
    Power,
    Root,
    Abs,
    Exp,
    Ln,
    Log,
    Floor,
    Ceiling,
    Factorial,
    Rem,
    Quotient,
    Sin,
    Cos,
    Tan,
    Sec,
    Csc,
    Cot,
    Sinh,
    Cosh,
    Tanh,
    Sech,
    Csch,
    Coth,
    Arcsin,
    Arccos,
    Arctan,
    Arcsec,
    Arccsc,
    Arccot,
    Arcsinh,
    Arccosh,
    Arctanh,
    Arcsech,
    Arccsch,
    Arccoth,
    Eq,
    Neq,
    Gt,
    Lt,
    Geq,
    Leq,
    And,
    Or,
    Xor,
    Not,
    Min,
    Max,
    Sum,
    Product,
    /// A user function, `<apply><ci>f</ci>...</apply>`.
    Call(String),
}

/// Every operator with a MathML element of its own.
const NAMED_OPERATORS: &[Operator] = &[
    Operator::Plus,
    Operator::Minus,
    Operator::Times,
    Operator::Divide,
    Operator::Power,
    Operator::Root,
    Operator::Abs,
    Operator::Exp,
    Operator::Ln,
    Operator::Log,
    Operator::Floor,
    Operator::Ceiling,
    Operator::Factorial,
    Operator::Rem,
    Operator::Quotient,
    Operator::Sin,
    Operator::Cos,
    Operator::Tan,
    Operator::Sec,
    Operator::Csc,
    Operator::Cot,
    Operator::Sinh,
    Operator::Cosh,
    Operator::Tanh,
    Operator::Sech,
    Operator::Csch,
    Operator::Coth,
    Operator::Arcsin,
    Operator::Arccos,
    Operator::Arctan,
    Operator::Arcsec,
    Operator::Arccsc,
    Operator::Arccot,
    Operator::Arcsinh,
    Operator::Arccosh,
    Operator::Arctanh,
    Operator::Arcsech,
    Operator::Arccsch,
    Operator::Arccoth,
    Operator::Eq,
    Operator::Neq,
    Operator::Gt,
    Operator::Lt,
    Operator::Geq,
    Operator::Leq,
    Operator::And,
    Operator::Or,
    Operator::Xor,
    Operator::Not,
    Operator::Min,
    Operator::Max,
    Operator::Sum,
    Operator::Product,
];

impl Operator {
    /// The MathML element name, or the function name for [`Operator::Call`].
    pub fn mathml_name(&self) -> &str {
        match self {
            Operator::Plus => "plus",
            Operator::Minus => "minus",
            Operator::Times => "times",
            Operator::Divide => "divide",
            Operator::Power => "power",
            Operator::Root => "root",
            Operator::Abs => "abs",
            Operator::Exp => "exp",
            Operator::Ln => "ln",
            Operator::Log => "log",
            Operator::Floor => "floor",
            Operator::Ceiling => "ceiling",
            Operator::Factorial => "factorial",
            Operator::Rem => "rem",
            Operator::Quotient => "quotient",
            Operator::Sin => "sin",
            Operator::Cos => "cos",
            Operator::Tan => "tan",
            Operator::Sec => "sec",
            Operator::Csc => "csc",
            Operator::Cot => "cot",
            Operator::Sinh => "sinh",
            Operator::Cosh => "cosh",
            Operator::Tanh => "tanh",
            Operator::Sech => "sech",
            Operator::Csch => "csch",
            Operator::Coth => "coth",
            Operator::Arcsin => "arcsin",
            Operator::Arccos => "arccos",
            Operator::Arctan => "arctan",
            Operator::Arcsec => "arcsec",
            Operator::Arccsc => "arccsc",
            Operator::Arccot => "arccot",
            Operator::Arcsinh => "arcsinh",
            Operator::Arccosh => "arccosh",
            Operator::Arctanh => "arctanh",
            Operator::Arcsech => "arcsech",
            Operator::Arccsch => "arccsch",
            Operator::Arccoth => "arccoth",
            Operator::Eq => "eq",
            Operator::Neq => "neq",
            Operator::Gt => "gt",
            Operator::Lt => "lt",
            Operator::Geq => "geq",
            Operator::Leq => "leq",
            Operator::And => "and",
            Operator::Or => "or",
            Operator::Xor => "xor",
            Operator::Not => "not",
            Operator::Min => "min",
            Operator::Max => "max",
            Operator::Sum => "sum",
            Operator::Product => "product",
            Operator::Call(name) => name,
        }
    }

    /// Looks up a MathML operator element. Returns `None` for anything that
    /// is not an operator (including `ci`).
    pub fn from_mathml_name(name: &str) -> Option<Self> {
        NAMED_OPERATORS
            .iter()
            .find(|op| op.mathml_name() == name)
            .cloned()
    }

    /// The name used when the operator is written as a function in a formula.
    pub fn function_name(&self) -> &str {
        match self {
            Operator::Ceiling => "ceil",
            Operator::Root => "root",
            other => other.mathml_name(),
        }
    }

    /// Maps a function name in a formula to an operator; unknown names
    /// become user function calls.
    pub fn from_function_name(name: &str) -> Self {
        let alias = match name {
            "ceil" => Some(Operator::Ceiling),
            "sqrt" | "root" => Some(Operator::Root),
            "log10" => Some(Operator::Log),
            "pow" => Some(Operator::Power),
            "asin" => Some(Operator::Arcsin),
            "acos" => Some(Operator::Arccos),
            "atan" => Some(Operator::Arctan),
            "asinh" => Some(Operator::Arcsinh),
            "acosh" => Some(Operator::Arccosh),
            "atanh" => Some(Operator::Arctanh),
            _ => None,
        };
        alias
            .or_else(|| Self::from_mathml_name(name))
            .unwrap_or_else(|| Operator::Call(name.to_string()))
    }

    pub fn is_relational(&self) -> bool {
        matches!(
            self,
            Operator::Eq | Operator::Neq | Operator::Gt | Operator::Lt | Operator::Geq | Operator::Leq
        )
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.mathml_name())
    }
}
