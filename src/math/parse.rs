//! Parser for infix formulas such as `S1 * (k + 2)`.
//!
//! Operator precedence, lowest first: `||`, `&&`, relations
//! (`==`, `!=`, `<`, `>`, `<=`, `>=`), `+ -`, `* /`, unary `- + !`, `^`.
//! `^` is right-associative, everything else associates to the left.
//! Relations and logic are also accepted as calls, e.g. `gt(x, 0)` or
//! `and(a, b)`, which is how [`formula_to_string`](crate::math::formula_to_string)
//! writes them.

use nom::{
    IResult, Parser,
    branch::alt,
    bytes::complete::tag,
    character::complete::{alpha1, alphanumeric1, char, multispace0},
    combinator::{map, map_opt, recognize, value, verify},
    multi::{many0, separated_list0},
    number::complete::recognize_float,
    sequence::{delimited, pair, preceded},
};
use thiserror::Error;

use crate::math::{Constant, Math, Operator};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FormulaError {
    #[error("empty formula")]
    Empty,
    #[error("syntax error at position {position}: unexpected '{found}'")]
    Syntax { position: usize, found: String },
    #[error("unexpected trailing input at position {position}: '{rest}'")]
    TrailingInput { position: usize, rest: String },
}

/// Parses an infix formula into an expression tree.
pub fn parse_formula(input: &str) -> Result<Math, FormulaError> {
    if input.trim().is_empty() {
        return Err(FormulaError::Empty);
    }
    match expression(input) {
        Ok(("", math)) => Ok(math),
        Ok((rest, _)) => Err(FormulaError::TrailingInput {
            position: input.len() - rest.len(),
            rest: rest.to_string(),
        }),
        Err(nom::Err::Error(e)) | Err(nom::Err::Failure(e)) => Err(FormulaError::Syntax {
            position: input.len() - e.input.len(),
            found: e.input.chars().take(10).collect(),
        }),
        Err(nom::Err::Incomplete(_)) => Err(FormulaError::Syntax {
            position: input.len(),
            found: String::new(),
        }),
    }
}

/// Parse whitespace (spaces, tabs, newlines)
fn ws<'a, P, O>(inner: P) -> impl Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>
where
    P: Parser<&'a str, Output = O, Error = nom::error::Error<&'a str>>,
{
    delimited(multispace0, inner, multispace0)
}

fn identifier(input: &str) -> IResult<&str, &str> {
    recognize(pair(
        alt((alpha1, tag("_"))),
        many0(alt((alphanumeric1, tag("_")))),
    ))
    .parse(input)
}

/// `12`, `1.5`, `.5`, `2.`, `6.02e23`
///
/// Signs are left to the unary operators, so `-2` is `-(2)`.
fn number(input: &str) -> IResult<&str, Math> {
    map_opt(
        verify(recognize_float, |text: &str| !text.starts_with(['+', '-'])),
        number_literal,
    )
    .parse(input)
}

fn number_literal(text: &str) -> Option<Math> {
    if let Some(split) = text.find(['e', 'E']) {
        let mantissa = text[..split].parse().ok()?;
        let exponent = text[split + 1..].parse().ok()?;
        return Some(Math::ENotation { mantissa, exponent });
    }
    if text.contains('.') {
        return text.parse().ok().map(Math::Real);
    }
    match text.parse::<i64>() {
        Ok(value) => Some(Math::Integer(value)),
        Err(_) => text.parse().ok().map(Math::Real),
    }
}

fn arguments(input: &str) -> IResult<&str, Vec<Math>> {
    delimited(
        ws(char('(')),
        separated_list0(ws(char(',')), expression),
        ws(char(')')),
    )
    .parse(input)
}

/// A function call, a keyword constant or a plain identifier.
fn named(input: &str) -> IResult<&str, Math> {
    let (input, name) = identifier(input)?;
    if let Ok((rest, args)) = arguments(input) {
        return Ok((rest, call(name, args)));
    }
    let math = match Constant::from_formula_name(name) {
        Some(constant) => Math::Constant(constant),
        None => Math::Identifier(name.to_string()),
    };
    Ok((input, math))
}

fn call(name: &str, mut args: Vec<Math>) -> Math {
    if name == "piecewise" {
        let otherwise = if args.len() % 2 == 1 {
            args.pop().map(Box::new)
        } else {
            None
        };
        let mut pieces = Vec::with_capacity(args.len() / 2);
        let mut iter = args.into_iter();
        while let (Some(value), Some(condition)) = (iter.next(), iter.next()) {
            pieces.push((value, condition));
        }
        return Math::Piecewise { pieces, otherwise };
    }
    Math::Apply {
        op: Operator::from_function_name(name),
        args,
    }
}

fn parentheses(input: &str) -> IResult<&str, Math> {
    delimited(ws(char('(')), expression, ws(char(')'))).parse(input)
}

fn primary(input: &str) -> IResult<&str, Math> {
    ws(alt((number, named, parentheses))).parse(input)
}

/// Exponentiation binds tighter than unary minus: `-x^2` is `-(x^2)`.
fn power(input: &str) -> IResult<&str, Math> {
    let (input, base) = primary(input)?;

    if let Ok((input, _)) = ws(char('^')).parse(input) {
        let (input, exponent) = unary(input)?;
        Ok((input, Math::binary(Operator::Power, base, exponent)))
    } else {
        Ok((input, base))
    }
}

fn unary(input: &str) -> IResult<&str, Math> {
    alt((
        map(preceded(ws(char('-')), unary), |m| {
            Math::apply(Operator::Minus, vec![m])
        }),
        preceded(ws(char('+')), unary),
        map(preceded(ws(char('!')), unary), |m| {
            Math::apply(Operator::Not, vec![m])
        }),
        power,
    ))
    .parse(input)
}

/// Folds a left-associative chain of `operand (op operand)*`.
fn left_assoc<'a>(
    input: &'a str,
    operand: fn(&'a str) -> IResult<&'a str, Math>,
    operator: fn(&'a str) -> IResult<&'a str, Operator>,
) -> IResult<&'a str, Math> {
    let (mut input, mut left) = operand(input)?;

    while let Ok((rest, op)) = operator(input) {
        let (rest, right) = operand(rest)?;
        input = rest;
        left = Math::binary(op, left, right);
    }

    Ok((input, left))
}

fn multiplicative(input: &str) -> IResult<&str, Math> {
    left_assoc(input, unary, |i| {
        alt((
            value(Operator::Times, ws(char('*'))),
            value(Operator::Divide, ws(char('/'))),
        ))
        .parse(i)
    })
}

fn additive(input: &str) -> IResult<&str, Math> {
    left_assoc(input, multiplicative, |i| {
        alt((
            value(Operator::Plus, ws(char('+'))),
            value(Operator::Minus, ws(char('-'))),
        ))
        .parse(i)
    })
}

fn relational(input: &str) -> IResult<&str, Math> {
    left_assoc(input, additive, |i| {
        alt((
            value(Operator::Eq, ws(tag("=="))),
            value(Operator::Neq, ws(tag("!="))),
            value(Operator::Leq, ws(tag("<="))),
            value(Operator::Geq, ws(tag(">="))),
            value(Operator::Lt, ws(char('<'))),
            value(Operator::Gt, ws(char('>'))),
        ))
        .parse(i)
    })
}

fn logical_and(input: &str) -> IResult<&str, Math> {
    left_assoc(input, relational, |i| {
        value(Operator::And, ws(tag("&&"))).parse(i)
    })
}

fn logical_or(input: &str) -> IResult<&str, Math> {
    left_assoc(input, logical_and, |i| {
        value(Operator::Or, ws(tag("||"))).parse(i)
    })
}

/// Parse a complete expression, surrounding whitespace included.
pub fn expression(input: &str) -> IResult<&str, Math> {
    ws(logical_or).parse(input)
}
