use super::error::CalcError;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

/// `Floor` bottoms every evaluation stack and is also what the scanner
/// returns when the cursor is not on an operator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Floor,
    Add,
    Subtract,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl Operator {
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            '+' => Some(Operator::Add),
            '-' => Some(Operator::Subtract),
            '*' => Some(Operator::Multiply),
            '/' => Some(Operator::Divide),
            '%' => Some(Operator::Modulo),
            '^' => Some(Operator::Power),
            _ => None,
        }
    }

    pub fn symbol(self) -> Option<char> {
        match self {
            Operator::Floor => None,
            Operator::Add => Some('+'),
            Operator::Subtract => Some('-'),
            Operator::Multiply => Some('*'),
            Operator::Divide => Some('/'),
            Operator::Modulo => Some('%'),
            Operator::Power => Some('^'),
        }
    }

    pub fn priority(self) -> u8 {
        match self {
            Operator::Floor => 0,
            Operator::Add | Operator::Subtract => 1,
            Operator::Multiply | Operator::Divide | Operator::Modulo => 2,
            Operator::Power => 3,
        }
    }

    pub fn associativity(self) -> Associativity {
        match self {
            Operator::Power => Associativity::Right,
            _ => Associativity::Left,
        }
    }

    /// Whether `self`, just read after an operand, forces the pending
    /// `top` operator to be applied first.
    pub fn folds(self, top: Operator) -> bool {
        self.priority() < top.priority()
            || (self.priority() == top.priority() && self.associativity() == Associativity::Left)
    }

    pub fn apply(self, lhs: f64, rhs: f64) -> Result<f64, CalcError> {
        match self {
            Operator::Add => Ok(lhs + rhs),
            Operator::Subtract => Ok(lhs - rhs),
            Operator::Multiply => Ok(lhs * rhs),
            Operator::Divide => {
                if rhs == 0.0 {
                    return Err(CalcError::DivisionByZero);
                }
                Ok(lhs / rhs)
            }
            // `%` on f64 is fmod: the sign follows the dividend.
            Operator::Modulo => {
                if rhs == 0.0 {
                    return Err(CalcError::ModuloByZero);
                }
                Ok(lhs % rhs)
            }
            Operator::Power => Ok(lhs.powf(rhs)),
            Operator::Floor => Ok(0.0),
        }
    }
}
