//! Infix formulas: parsing, printing and their agreement.

use proptest::prelude::*;
use sedml::math::{Constant, Math, Operator, formula_to_string, parse_formula};

fn ci(name: &str) -> Math {
    Math::ident(name)
}

#[test]
fn test_parse_documented_examples() {
    assert_eq!(
        parse_formula("S1 + 2 * k").unwrap(),
        Math::binary(
            Operator::Plus,
            ci("S1"),
            Math::binary(Operator::Times, Math::Integer(2), ci("k"))
        )
    );
    assert_eq!(
        parse_formula("-x^2").unwrap(),
        Math::apply(
            Operator::Minus,
            vec![Math::binary(Operator::Power, ci("x"), Math::Integer(2))]
        )
    );
    assert_eq!(
        parse_formula("6.02e23").unwrap(),
        Math::ENotation {
            mantissa: 6.02,
            exponent: 23
        }
    );
    assert_eq!(parse_formula("pi").unwrap(), Math::Constant(Constant::Pi));
}

#[test]
fn test_relations_and_logic_print_as_calls() {
    let math = parse_formula("x > 0.5 && y <= 2").unwrap();
    assert_eq!(formula_to_string(&math), "and(gt(x, 0.5), leq(y, 2))");
    assert_eq!(parse_formula("and(gt(x, 0.5), leq(y, 2))").unwrap(), math);

    let math = parse_formula("log(10, u)").unwrap();
    assert_eq!(formula_to_string(&math), "log10(u)");
}

#[test]
fn test_parse_errors() {
    for input in ["", "1 +", "(a", "a b", "f(1,"] {
        assert!(parse_formula(input).is_err(), "'{}' should not parse", input);
    }
}

#[test]
fn test_identifiers_are_collected() {
    let math = parse_formula("piecewise(a, t > 5, b * c)").unwrap();
    let mut names = math.identifiers();
    names.sort();
    assert_eq!(names, vec!["a", "b", "c", "t"]);
}

fn leaf() -> impl Strategy<Value = Math> {
    prop_oneof![
        (0i64..1000).prop_map(Math::Integer),
        (0i64..1000, 1u8..8)
            .prop_map(|(whole, eighths)| Math::Real(whole as f64 + f64::from(eighths) / 8.0)),
        "x[0-9]".prop_map(Math::Identifier),
    ]
}

fn expression() -> impl Strategy<Value = Math> {
    leaf().prop_recursive(5, 48, 2, |inner| {
        let binary_op = prop_oneof![
            Just(Operator::Plus),
            Just(Operator::Minus),
            Just(Operator::Times),
            Just(Operator::Divide),
            Just(Operator::Power),
            Just(Operator::Gt),
            Just(Operator::Eq),
            Just(Operator::And),
        ];
        prop_oneof![
            (binary_op, inner.clone(), inner.clone())
                .prop_map(|(op, left, right)| Math::binary(op, left, right)),
            inner.clone().prop_map(|m| Math::apply(Operator::Minus, vec![m])),
            inner.prop_map(|m| Math::apply(Operator::Sin, vec![m])),
        ]
    })
}

proptest! {
    #[test]
    fn printed_formulas_parse_to_the_same_tree(math in expression()) {
        let text = formula_to_string(&math);
        let parsed = parse_formula(&text);
        prop_assert!(parsed.is_ok(), "'{}' did not parse", text);
        prop_assert_eq!(parsed.unwrap(), math, "via '{}'", text);
    }

    #[test]
    fn integers_print_as_themselves(value in 0i64..i64::MAX) {
        prop_assert_eq!(formula_to_string(&Math::Integer(value)), value.to_string());
        prop_assert_eq!(parse_formula(&value.to_string()).unwrap(), Math::Integer(value));
    }
}
