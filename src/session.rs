//! What the interactive front-ends do with a submitted line.

use std::time::{Duration, Instant};

use crate::calc_engine::{CalcError, Calculator, EvaluationTrace, Step};

const DETAILS: &str = "details";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Request<'a> {
    Quit,
    Clear,
    Help,
    /// `details` with nothing to evaluate.
    MissingExpression,
    Evaluate { expression: &'a str, detailed: bool },
}

/// Classifies a submitted line. Blank lines yield `None`.
///
/// `details` may be written before or after the expression.
pub fn parse_request(line: &str) -> Option<Request<'_>> {
    let input = line.trim();
    if input.is_empty() {
        return None;
    }

    let request = match input.to_ascii_lowercase().as_str() {
        "quit" | "exit" | "q" => Request::Quit,
        "clear" | "reset" => Request::Clear,
        "help" => Request::Help,
        DETAILS => Request::MissingExpression,
        _ => match strip_details(input) {
            Some(expression) if expression.is_empty() => Request::MissingExpression,
            Some(expression) => Request::Evaluate {
                expression,
                detailed: true,
            },
            None => Request::Evaluate {
                expression: input,
                detailed: false,
            },
        },
    };
    Some(request)
}

fn strip_details(input: &str) -> Option<&str> {
    let n = DETAILS.len();

    let prefixed = input
        .get(..n)
        .filter(|head| head.eq_ignore_ascii_case(DETAILS))
        .and_then(|_| input.get(n..))
        .filter(|rest| rest.starts_with(char::is_whitespace));
    if let Some(rest) = prefixed {
        return Some(rest.trim());
    }

    let split = input.len().checked_sub(n)?;
    input
        .get(split..)
        .filter(|tail| tail.eq_ignore_ascii_case(DETAILS))
        .and_then(|_| input.get(..split))
        .filter(|rest| rest.ends_with(char::is_whitespace))
        .map(str::trim)
}

#[derive(Debug, Clone)]
pub struct HistoryEntry {
    pub input: String,
    pub result: Result<f64, CalcError>,
    pub steps: Vec<Step>,
    pub detailed_mode: bool,
    pub duration: Duration,
}

impl HistoryEntry {
    pub fn evaluate(calc: &Calculator, expression: &str, detailed_mode: bool) -> Self {
        let start_time = Instant::now();
        let mut trace = EvaluationTrace::new(detailed_mode);
        let result = calc.evaluate_traced(expression, &mut trace);
        let duration = start_time.elapsed();

        if let Err(e) = &result {
            log::info!("{expression:?}: {e}");
        }

        HistoryEntry {
            input: expression.to_string(),
            result,
            steps: trace.steps,
            detailed_mode,
            duration,
        }
    }
}
