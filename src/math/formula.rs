//! Infix rendering of [`Math`] trees.

use itertools::Itertools;

use crate::math::{Math, Operator};

const ADDITIVE: u8 = 1;
const MULTIPLICATIVE: u8 = 2;
const UNARY: u8 = 3;
const POWER: u8 = 4;
const ATOM: u8 = 5;

/// Renders an expression as an infix formula, e.g. `S1 + 2 * k`.
///
/// Arithmetic is written infix. Relations and logic are written as calls
/// (`gt(x, 0)`, `and(a, b)`, `not(c)`) and a base 10 logarithm as
/// `log10(x)`, the way SBML L1 formulas spell them. The output is accepted
/// by [`parse_formula`](crate::math::parse_formula).
pub fn formula_to_string(math: &Math) -> String {
    let mut out = String::new();
    write_math(math, 0, &mut out);
    out
}

fn write_math(math: &Math, parent: u8, out: &mut String) {
    let own = precedence(math);
    let wrap = own < parent;
    if wrap {
        out.push('(');
    }
    match math {
        Math::Integer(value) => out.push_str(&value.to_string()),
        Math::Real(value) => out.push_str(&format_real(*value)),
        Math::Rational(numerator, denominator) => {
            out.push_str(&format!("({}/{})", numerator, denominator))
        }
        Math::ENotation { mantissa, exponent } => {
            out.push_str(&format!("{}e{}", format_real(*mantissa), exponent))
        }
        Math::Identifier(name) => out.push_str(name),
        Math::Symbol { name, .. } => out.push_str(name),
        Math::Constant(constant) => out.push_str(constant.formula_name()),
        Math::Apply { op, args } => write_apply(op, args, out),
        Math::Piecewise { pieces, otherwise } => {
            let mut args: Vec<&Math> = Vec::new();
            for (value, condition) in pieces {
                args.push(value);
                args.push(condition);
            }
            if let Some(otherwise) = otherwise {
                args.push(otherwise);
            }
            write_call("piecewise", args.into_iter(), out);
        }
    }
    if wrap {
        out.push(')');
    }
}

fn write_apply(op: &Operator, args: &[Math], out: &mut String) {
    match (op, args.len()) {
        (Operator::Minus, 1) => {
            out.push('-');
            write_math(&args[0], UNARY, out);
        }
        (Operator::Plus, 1) => write_math(&args[0], UNARY, out),
        (Operator::Power, 2) => {
            write_math(&args[0], POWER + 1, out);
            out.push('^');
            write_math(&args[1], POWER, out);
        }
        (Operator::Log, 1) => write_call("log10", args.iter(), out),
        (Operator::Log, 2) if is_ten(&args[0]) => write_call("log10", args[1..].iter(), out),
        (Operator::Root, 1) => write_call("sqrt", args.iter(), out),
        (op, n) => match infix_symbol(op) {
            Some((symbol, prec)) if n >= 2 => {
                for (index, arg) in args.iter().enumerate() {
                    if index > 0 {
                        out.push_str(symbol);
                    }
                    write_math(arg, if index == 0 { prec } else { prec + 1 }, out);
                }
            }
            _ => write_call(op.function_name(), args.iter(), out),
        },
    }
}

fn write_call<'a>(name: &str, args: impl Iterator<Item = &'a Math>, out: &mut String) {
    out.push_str(name);
    out.push('(');
    out.push_str(&args.map(formula_to_string).join(", "));
    out.push(')');
}

fn infix_symbol(op: &Operator) -> Option<(&'static str, u8)> {
    let entry = match op {
        Operator::Plus => (" + ", ADDITIVE),
        Operator::Minus => (" - ", ADDITIVE),
        Operator::Times => (" * ", MULTIPLICATIVE),
        Operator::Divide => (" / ", MULTIPLICATIVE),
        _ => return None,
    };
    Some(entry)
}

fn is_ten(math: &Math) -> bool {
    match math {
        Math::Integer(value) => *value == 10,
        Math::Real(value) => *value == 10.0,
        _ => false,
    }
}

fn precedence(math: &Math) -> u8 {
    match math {
        Math::Integer(value) if *value < 0 => UNARY,
        Math::Real(value) if value.is_sign_negative() => UNARY,
        Math::ENotation { mantissa, .. } if mantissa.is_sign_negative() => UNARY,
        Math::Apply { op, args } => match (op, args.len()) {
            (Operator::Minus, 1) | (Operator::Plus, 1) => UNARY,
            (Operator::Power, 2) => POWER,
            (Operator::Log, _) | (Operator::Root, 1) => ATOM,
            (op, n) if n >= 2 => infix_symbol(op).map_or(ATOM, |(_, prec)| prec),
            _ => ATOM,
        },
        _ => ATOM,
    }
}

/// Whole numbers print without a fractional part, like `2` rather than `2.0`.
pub(crate) fn format_real(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        if value > 0.0 { "INF" } else { "-INF" }.to_string()
    } else {
        format!("{}", value)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::Constant;

    fn ci(name: &str) -> Math {
        Math::ident(name)
    }

    #[test]
    fn test_simple_identifier() {
        assert_eq!(formula_to_string(&ci("S1")), "S1");
    }

    #[test]
    fn test_precedence() {
        let math = Math::binary(
            Operator::Times,
            Math::binary(Operator::Plus, ci("a"), ci("b")),
            ci("c"),
        );
        assert_eq!(formula_to_string(&math), "(a + b) * c");

        let math = Math::binary(
            Operator::Plus,
            ci("a"),
            Math::binary(Operator::Times, ci("b"), ci("c")),
        );
        assert_eq!(formula_to_string(&math), "a + b * c");
    }

    #[test]
    fn test_right_operand_of_minus_is_parenthesised() {
        let math = Math::binary(
            Operator::Minus,
            ci("a"),
            Math::binary(Operator::Minus, ci("b"), ci("c")),
        );
        assert_eq!(formula_to_string(&math), "a - (b - c)");
    }

    #[test]
    fn test_power_and_unary() {
        let math = Math::binary(
            Operator::Power,
            Math::apply(Operator::Minus, vec![ci("x")]),
            Math::Integer(2),
        );
        assert_eq!(formula_to_string(&math), "(-x)^2");

        let math = Math::apply(
            Operator::Minus,
            vec![Math::binary(Operator::Power, ci("x"), Math::Integer(2))],
        );
        assert_eq!(formula_to_string(&math), "-x^2");
    }

    #[test]
    fn test_functions() {
        let math = Math::apply(Operator::Sin, vec![ci("t")]);
        assert_eq!(formula_to_string(&math), "sin(t)");

        let math = Math::apply(Operator::Log, vec![Math::Integer(2), ci("x")]);
        assert_eq!(formula_to_string(&math), "log(2, x)");

        let math = Math::apply(Operator::Log, vec![Math::Integer(10), ci("u")]);
        assert_eq!(formula_to_string(&math), "log10(u)");

        let math = Math::apply(Operator::Root, vec![ci("x")]);
        assert_eq!(formula_to_string(&math), "sqrt(x)");

        let math = Math::apply(Operator::Call("f".into()), vec![ci("x"), ci("y")]);
        assert_eq!(formula_to_string(&math), "f(x, y)");
    }

    #[test]
    fn test_logic_and_relations() {
        let math = Math::binary(
            Operator::And,
            Math::binary(Operator::Gt, ci("x"), Math::Integer(0)),
            Math::apply(Operator::Not, vec![Math::Constant(Constant::False)]),
        );
        assert_eq!(formula_to_string(&math), "and(gt(x, 0), not(false))");

        let math = Math::apply(
            Operator::Or,
            vec![
                Math::binary(Operator::Eq, ci("a"), ci("b")),
                Math::binary(Operator::Leq, ci("c"), Math::Integer(1)),
                ci("d"),
            ],
        );
        assert_eq!(formula_to_string(&math), "or(eq(a, b), leq(c, 1), d)");
    }

    #[test]
    fn test_piecewise() {
        let math = Math::Piecewise {
            pieces: vec![(Math::Integer(1), Math::binary(Operator::Lt, ci("t"), Math::Integer(5)))],
            otherwise: Some(Box::new(Math::Integer(0))),
        };
        assert_eq!(formula_to_string(&math), "piecewise(1, lt(t, 5), 0)");
    }

    #[test]
    fn test_numbers() {
        assert_eq!(formula_to_string(&Math::Real(2.5)), "2.5");
        assert_eq!(formula_to_string(&Math::Real(3.0)), "3");
        assert_eq!(
            formula_to_string(&Math::ENotation { mantissa: 1.5, exponent: -3 }),
            "1.5e-3"
        );
        assert_eq!(formula_to_string(&Math::Rational(1, 3)), "(1/3)");
        assert_eq!(formula_to_string(&Math::Constant(Constant::Infinity)), "INF");
    }
}
