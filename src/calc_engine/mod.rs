//! Character-driven arithmetic evaluation.
//!
//! There is no tokenizer and no tree: a cursor walks the whitespace-free
//! text, operands are read on demand and every operator is folded against
//! an explicit stack as soon as its precedence allows.

mod error;
mod literal;
mod operator;
mod preprocess;
mod trace;

use log::{debug, trace};

pub use error::CalcError;
pub use literal::scan_number;
pub use operator::{Associativity, Operator};
pub use preprocess::preprocess;
pub use trace::{EvaluationTrace, Step};

/// How many parentheses may be open at once before evaluation gives up.
pub const DEFAULT_MAX_DEPTH: usize = 256;

pub fn evaluate(text: &str) -> Result<f64, CalcError> {
    Calculator::default().evaluate(text)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Calculator {
    max_depth: usize,
}

impl Default for Calculator {
    fn default() -> Self {
        Calculator::new()
    }
}

impl Calculator {
    pub fn new() -> Self {
        Calculator {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }

    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    pub fn max_depth(&self) -> usize {
        self.max_depth
    }

    pub fn evaluate(&self, text: &str) -> Result<f64, CalcError> {
        let mut trace = EvaluationTrace::new(false);
        self.evaluate_traced(text, &mut trace)
    }

    pub fn evaluate_traced(
        &self,
        text: &str,
        trace: &mut EvaluationTrace,
    ) -> Result<f64, CalcError> {
        debug!("evaluating {text:?}");
        let text = preprocess(text)?;

        let mut evaluator = Evaluator {
            text: &text,
            cursor: 0,
            depth: 0,
            max_depth: self.max_depth,
            trace,
        };
        let value = evaluator.expression()?;

        if let Some(&found) = text.get(evaluator.cursor) {
            return Err(CalcError::TrailingInput {
                position: evaluator.cursor,
                found,
            });
        }

        debug!("result {value}");
        Ok(value)
    }
}

/// An operator waiting for its right operand.
#[derive(Debug, Clone, Copy)]
struct Pending {
    op: Operator,
    lhs: f64,
}

struct Evaluator<'a> {
    text: &'a [char],
    cursor: usize,
    depth: usize,
    max_depth: usize,
    trace: &'a mut EvaluationTrace,
}

impl Evaluator<'_> {
    fn peek(&self) -> Option<char> {
        self.text.get(self.cursor).copied()
    }

    /// Evaluates until the next character is neither an operator nor
    /// part of an operand, leaving the cursor on it.
    fn expression(&mut self) -> Result<f64, CalcError> {
        let mut stack = vec![Pending {
            op: Operator::Floor,
            lhs: 0.0,
        }];
        let mut acc = self.value()?;

        loop {
            let op = self.operator();

            while let Some(&Pending { op: top, lhs }) = stack.last() {
                if !op.folds(top) {
                    break;
                }
                stack.pop();

                match top {
                    Operator::Floor => return Ok(acc),
                    _ => {
                        let result = top.apply(lhs, acc)?;
                        trace!("fold {lhs} {top:?} {acc} -> {result}");
                        self.trace.fold(top, lhs, acc, result);
                        acc = result;
                    }
                }
            }

            trace!("push {op:?} over {acc} (stack depth {})", stack.len());
            stack.push(Pending { op, lhs: acc });
            acc = self.value()?;
        }
    }

    fn operator(&mut self) -> Operator {
        match self.peek().and_then(Operator::from_char) {
            Some(op) => {
                self.cursor += 1;
                op
            }
            None => Operator::Floor,
        }
    }

    /// One operand with any number of leading signs.
    fn value(&mut self) -> Result<f64, CalcError> {
        let mut negate = false;
        loop {
            match self.peek() {
                Some('+') => self.cursor += 1,
                Some('-') => {
                    negate = !negate;
                    self.cursor += 1;
                }
                _ => break,
            }
        }

        let operand = self.operand()?;
        if !negate {
            return Ok(operand);
        }

        let result = -operand;
        self.trace.negate(operand, result);
        Ok(result)
    }

    fn operand(&mut self) -> Result<f64, CalcError> {
        match self.peek() {
            Some(c) if c.is_ascii_digit() => {
                let (value, end) = scan_number(self.text, self.cursor)?;
                self.cursor = end;
                Ok(value)
            }
            Some('(') => self.parenthesized(),
            found => Err(CalcError::UnexpectedToken {
                position: self.cursor,
                found,
            }),
        }
    }

    fn parenthesized(&mut self) -> Result<f64, CalcError> {
        if self.depth >= self.max_depth {
            return Err(CalcError::NestingTooDeep {
                limit: self.max_depth,
            });
        }

        let open = self.cursor;
        self.cursor += 1;
        self.depth += 1;
        trace!("sub-expression at {open}, depth {}", self.depth);

        let value = self.expression()?;
        self.depth -= 1;

        match self.peek() {
            Some(')') => {
                self.cursor += 1;
                Ok(value)
            }
            found => Err(CalcError::MissingCloseParen {
                position: self.cursor,
                found,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn precedence() {
        assert_eq!(evaluate("2+3*4"), Ok(14.0));
        assert_eq!(evaluate("2*3+4"), Ok(10.0));
        assert_eq!(evaluate("2+3*4^2"), Ok(50.0));
        assert_eq!(evaluate("10-4%3"), Ok(9.0));
    }

    #[test]
    fn parentheses_override_precedence() {
        assert_eq!(evaluate("(2+3)*4"), Ok(20.0));
        assert_eq!(evaluate("((((7))))"), Ok(7.0));
        assert_eq!(evaluate("2*(3+(4-1))/3"), Ok(4.0));
    }

    #[test]
    fn left_associative_chains() {
        assert_eq!(evaluate("10-3-2"), Ok(5.0));
        assert_eq!(evaluate("64/4/2"), Ok(8.0));
        assert_eq!(evaluate("2*9%4"), Ok(2.0));
    }

    #[test]
    fn power_is_right_associative() {
        assert_eq!(evaluate("2^3^2"), Ok(512.0));
        assert_eq!(evaluate("(2^3)^2"), Ok(64.0));
        assert_eq!(evaluate("2^3*2"), Ok(16.0));
    }

    #[test]
    fn unary_signs() {
        assert_eq!(evaluate("--5"), Ok(5.0));
        assert_eq!(evaluate("-5"), Ok(-5.0));
        assert_eq!(evaluate("+-+5"), Ok(-5.0));
        assert_eq!(evaluate("3--2"), Ok(5.0));
        assert_eq!(evaluate("2*-3"), Ok(-6.0));
        assert_eq!(evaluate("-(1+2)"), Ok(-3.0));
        // the sign binds to the operand, not the power
        assert_eq!(evaluate("-2^2"), Ok(4.0));
    }

    #[test]
    fn decimals() {
        assert_eq!(evaluate("1.5*2"), Ok(3.0));
        assert_eq!(evaluate("0.25+0.5"), Ok(0.75));
    }

    #[test]
    fn whitespace_is_ignored() {
        assert_eq!(evaluate("2 + 3"), evaluate("2+3"));
        assert_eq!(evaluate(" ( 1 +\t2 ) * 3 "), Ok(9.0));
    }

    #[test]
    fn zero_divisors() {
        assert_eq!(evaluate("10/0"), Err(CalcError::DivisionByZero));
        assert_eq!(evaluate("10%0"), Err(CalcError::ModuloByZero));
        assert_eq!(evaluate("1/(2-2)"), Err(CalcError::DivisionByZero));
    }

    #[test]
    fn unbalanced_is_caught_before_evaluation() {
        // would otherwise be a division by zero
        assert_eq!(
            evaluate("(1/0"),
            Err(CalcError::UnbalancedParentheses { position: 0 })
        );
        assert_eq!(
            evaluate("(1+2"),
            Err(CalcError::UnbalancedParentheses { position: 0 })
        );
    }

    #[test]
    fn malformed_literal() {
        assert_eq!(
            evaluate("1.2.3"),
            Err(CalcError::MalformedLiteral { literal: "1.2.3".into() })
        );
        assert_eq!(
            evaluate("4+1..2"),
            Err(CalcError::MalformedLiteral { literal: "1..2".into() })
        );
    }

    #[test]
    fn unexpected_tokens() {
        assert_eq!(
            evaluate(""),
            Err(CalcError::UnexpectedToken { position: 0, found: None })
        );
        assert_eq!(
            evaluate("2+"),
            Err(CalcError::UnexpectedToken { position: 2, found: None })
        );
        assert_eq!(
            evaluate("2**3"),
            Err(CalcError::UnexpectedToken { position: 2, found: Some('*') })
        );
        assert_eq!(
            evaluate(".5"),
            Err(CalcError::UnexpectedToken { position: 0, found: Some('.') })
        );
        assert_eq!(
            evaluate("()"),
            Err(CalcError::UnexpectedToken { position: 1, found: Some(')') })
        );
    }

    #[test]
    fn sub_expression_must_end_at_close_paren() {
        assert_eq!(
            evaluate("(2a)"),
            Err(CalcError::MissingCloseParen { position: 2, found: Some('a') })
        );
    }

    #[test]
    fn trailing_input() {
        assert_eq!(
            evaluate("2a"),
            Err(CalcError::TrailingInput { position: 1, found: 'a' })
        );
        assert_eq!(
            evaluate("(1)(2)"),
            Err(CalcError::TrailingInput { position: 3, found: '(' })
        );
    }

    #[test]
    fn nesting_limit() {
        let calc = Calculator::new().with_max_depth(2);
        assert_eq!(calc.max_depth(), 2);
        assert_eq!(calc.evaluate("((1))"), Ok(1.0));
        assert_eq!(
            calc.evaluate("(((1)))"),
            Err(CalcError::NestingTooDeep { limit: 2 })
        );

        let deep = format!("{}1{}", "(".repeat(DEFAULT_MAX_DEPTH), ")".repeat(DEFAULT_MAX_DEPTH));
        assert_eq!(evaluate(&deep), Ok(1.0));
        let deeper = format!("({deep})");
        assert_eq!(
            evaluate(&deeper),
            Err(CalcError::NestingTooDeep { limit: DEFAULT_MAX_DEPTH })
        );
    }

    #[test]
    fn trace_records_folds_in_order() {
        let mut trace = EvaluationTrace::new(true);
        let result = Calculator::new().evaluate_traced("2+3*-4", &mut trace);
        assert_eq!(result, Ok(-10.0));

        let steps: Vec<String> = trace.steps.iter().map(|s| s.to_string()).collect();
        assert_eq!(steps, vec!["-(4) = -4", "3 * -4 = -12", "2 + -12 = -10"]);
    }

    #[test]
    fn repeated_evaluation_is_stable() {
        let calc = Calculator::new();
        let first = calc.evaluate("7%3+2^0.5");
        for _ in 0..3 {
            assert_eq!(calc.evaluate("7%3+2^0.5"), first);
        }
    }
}
