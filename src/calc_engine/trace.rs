use std::fmt;

use super::operator::Operator;

#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub operation: String,
    pub result: f64,
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} = {}", self.operation, self.result)
    }
}

/// Records nothing unless `detailed_mode` is set.
#[derive(Debug, Default)]
pub struct EvaluationTrace {
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
}

impl EvaluationTrace {
    pub fn new(detailed_mode: bool) -> Self {
        EvaluationTrace {
            steps: Vec::new(),
            detailed_mode,
        }
    }

    pub fn add_step(&mut self, operation: String, result: f64) {
        if self.detailed_mode {
            self.steps.push(Step { operation, result });
        }
    }

    pub(crate) fn fold(&mut self, op: Operator, lhs: f64, rhs: f64, result: f64) {
        if self.detailed_mode {
            let symbol = op.symbol().unwrap_or('?');
            self.add_step(format!("{lhs} {symbol} {rhs}"), result);
        }
    }

    pub(crate) fn negate(&mut self, operand: f64, result: f64) {
        if self.detailed_mode {
            self.add_step(format!("-({operand})"), result);
        }
    }
}
