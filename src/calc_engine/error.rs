use std::fmt;

use thiserror::Error;

/// Everything that can stop an evaluation.
///
/// Positions are char offsets into the expression after whitespace has
/// been stripped, which is the text the cursor actually walks.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum CalcError {
    #[error("unbalanced or unexpected parentheses (at {position})")]
    UnbalancedParentheses { position: usize },

    #[error("could not parse token '{literal}', expect <int> or <float>")]
    MalformedLiteral { literal: String },

    #[error("unexpected expression, could not parse {} (at {position})", Found(.found))]
    UnexpectedToken { position: usize, found: Option<char> },

    #[error("value expected, got {} (at {position})", Found(.found))]
    MissingCloseParen { position: usize, found: Option<char> },

    #[error("division by zero")]
    DivisionByZero,

    #[error("modulo by zero")]
    ModuloByZero,

    #[error("parentheses nested deeper than {limit} levels")]
    NestingTooDeep { limit: usize },

    #[error("unexpected '{found}' after complete expression (at {position})")]
    TrailingInput { position: usize, found: char },
}

struct Found<'a>(&'a Option<char>);

impl fmt::Display for Found<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self.0 {
            Some(c) => write!(f, "'{c}'"),
            None => f.write_str("end of input"),
        }
    }
}
