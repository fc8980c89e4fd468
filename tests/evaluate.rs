use pretty_assertions::assert_eq;
use proptest::prelude::*;
use stackcalc::calc_engine::{Calculator, DEFAULT_MAX_DEPTH};
use stackcalc::{evaluate, CalcError, EvaluationTrace};
use std::sync::Once;

static INIT: Once = Once::new();
fn setup_test_logger() {
    INIT.call_once(|| {
        let _ = env_logger::builder().is_test(true).try_init();
    });
}

#[test]
fn documented_examples() {
    setup_test_logger();
    assert_eq!(evaluate("2+3*4"), Ok(14.0));
    assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
    assert_eq!(evaluate("2^3^2"), Ok(512.0));
    assert_eq!(evaluate("--5"), Ok(5.0));
    assert_eq!(evaluate("10/0"), Err(CalcError::DivisionByZero));
    assert_eq!(evaluate("10%0"), Err(CalcError::ModuloByZero));
    assert!(matches!(
        evaluate("(1+2"),
        Err(CalcError::UnbalancedParentheses { .. })
    ));
    assert!(matches!(
        evaluate("1.2.3"),
        Err(CalcError::MalformedLiteral { .. })
    ));
}

#[test]
fn error_messages_are_readable() {
    setup_test_logger();
    let message = |input: &str| evaluate(input).unwrap_err().to_string();

    assert_eq!(message("10/0"), "division by zero");
    assert_eq!(message("10%0"), "modulo by zero");
    assert_eq!(message("(1+2"), "unbalanced or unexpected parentheses (at 0)");
    assert_eq!(
        message("1.2.3"),
        "could not parse token '1.2.3', expect <int> or <float>"
    );
    assert_eq!(
        message("1 + x"),
        "unexpected expression, could not parse 'x' (at 2)"
    );
}

#[test]
fn mixed_expression() {
    setup_test_logger();
    let result = evaluate(" -(2.5 * 4) + 3 ^ 2 % 5 - -1 ").unwrap();
    // -(10) + (9 % 5) + 1
    assert_eq!(result, -5.0);
}

#[test]
fn fractional_power_and_remainder() {
    setup_test_logger();
    assert_eq!(evaluate("2^-1"), Ok(0.5));
    // 0.5^2 binds first
    assert_eq!(evaluate("4^0.5^2"), Ok(4f64.powf(0.25)));
    assert_eq!(evaluate("-7.5%2"), Ok(-1.5));
}

#[test]
fn whitespace_is_removed_before_numbers_are_scanned() {
    setup_test_logger();
    assert_eq!(evaluate("1 2"), Ok(12.0));
    assert_eq!(evaluate("1 2 . 5 + 1"), Ok(13.5));
    assert_eq!(
        evaluate("(1)2"),
        Err(CalcError::TrailingInput { position: 3, found: '2' })
    );
}

#[test]
fn only_ascii_whitespace_is_ignored() {
    setup_test_logger();
    assert_eq!(
        evaluate("1+\u{a0}2"),
        Err(CalcError::UnexpectedToken { position: 2, found: Some('\u{a0}') })
    );
    assert_eq!(
        evaluate("2\u{a0}+3"),
        Err(CalcError::TrailingInput { position: 1, found: '\u{a0}' })
    );
}

#[test]
fn configured_depth_applies_to_every_call() {
    setup_test_logger();
    let calc = Calculator::new().with_max_depth(1);
    assert_eq!(calc.evaluate("(1)+(2)"), Ok(3.0));
    assert_eq!(
        calc.evaluate("((1))"),
        Err(CalcError::NestingTooDeep { limit: 1 })
    );
    assert_eq!(Calculator::default().max_depth(), DEFAULT_MAX_DEPTH);
}

#[test]
fn traced_evaluation_matches_plain_evaluation() {
    setup_test_logger();
    let calc = Calculator::new();
    let input = "1+2*3-4/2^2";

    let mut trace = EvaluationTrace::new(true);
    assert_eq!(calc.evaluate_traced(input, &mut trace), calc.evaluate(input));

    let operations: Vec<&str> = trace.steps.iter().map(|s| s.operation.as_str()).collect();
    assert_eq!(operations, vec!["2 * 3", "1 + 6", "2 ^ 2", "4 / 4", "7 - 1"]);
}

#[test]
fn failed_evaluation_leaves_no_state_behind() {
    setup_test_logger();
    let calc = Calculator::new();
    assert!(calc.evaluate("(1+").is_err());
    assert_eq!(calc.evaluate("1+1"), Ok(2.0));
}

fn op_symbol() -> impl Strategy<Value = char> {
    prop_oneof![Just('+'), Just('-'), Just('*'), Just('/')]
}

/// Left-to-right evaluation of a flat `a op b op c ...` chain with the
/// usual two precedence levels.
fn reference(first: i64, rest: &[(char, i64)]) -> Option<f64> {
    let mut sum = 0.0;
    let mut term = first as f64;
    let mut sign = 1.0;

    for &(op, n) in rest {
        let n = n as f64;
        match op {
            '*' => term *= n,
            '/' => {
                if n == 0.0 {
                    return None;
                }
                term /= n;
            }
            '+' | '-' => {
                sum += sign * term;
                sign = if op == '+' { 1.0 } else { -1.0 };
                term = n;
            }
            _ => unreachable!(),
        }
    }
    Some(sum + sign * term)
}

proptest! {
    #[test]
    fn integer_chains_match_reference(
        first in 0i64..1000,
        rest in prop::collection::vec((op_symbol(), 0i64..1000), 0..8),
    ) {
        let mut input = first.to_string();
        for (op, n) in &rest {
            input.push(*op);
            input.push_str(&n.to_string());
        }

        match reference(first, &rest) {
            Some(expected) => {
                let actual = evaluate(&input).unwrap();
                prop_assert!(
                    (actual - expected).abs() <= 1e-9 * expected.abs().max(1.0),
                    "{} = {} but reference gave {}", input, actual, expected
                );
            }
            None => prop_assert_eq!(evaluate(&input), Err(CalcError::DivisionByZero)),
        }
    }

    #[test]
    fn whitespace_does_not_matter(
        a in 0u32..10_000,
        b in 1u32..10_000,
        op in op_symbol(),
        pad in "[ \t]{0,3}",
    ) {
        let tight = format!("{a}{op}{b}");
        let loose = format!("{pad}{a}{pad}{op}{pad}{b}{pad}");
        prop_assert_eq!(evaluate(&tight), evaluate(&loose));
    }

    #[test]
    fn evaluation_is_idempotent(input in "[0-9+*/%^().-]{0,12}") {
        // Debug output so NaN results compare equal to themselves
        let first = format!("{:?}", evaluate(&input));
        let second = format!("{:?}", evaluate(&input));
        prop_assert_eq!(first, second);
    }

    #[test]
    fn parenthesising_a_number_is_identity(n in 0u32..1_000_000, depth in 0usize..20) {
        let input = format!("{}{n}{}", "(".repeat(depth), ")".repeat(depth));
        prop_assert_eq!(evaluate(&input), Ok(n as f64));
    }
}
