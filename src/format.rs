use crate::calc_engine::Operator;

pub fn format_number(x: f64) -> String {
    if !x.is_finite() {
        return x.to_string();
    }
    if x.abs() > 1e10 || (x.abs() < 1e-5 && x != 0.0) {
        format!("{:.6e}", x)
    } else {
        let s = format!("{:.6}", x);
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    }
}

/// Normalises spacing: binary operators get a space on each side, signs
/// stay glued to their operand.
pub fn format_with_spaces(expr: &str) -> String {
    let mut result = String::new();
    // last non-blank character emitted
    let mut last: Option<char> = None;

    for c in expr.chars().filter(|c| !c.is_whitespace()) {
        let binary = Operator::from_char(c).is_some()
            && matches!(last, Some(prev) if prev.is_ascii_digit() || prev == '.' || prev == ')');

        if binary {
            result.push(' ');
            result.push(c);
            result.push(' ');
        } else {
            result.push(c);
        }
        last = Some(c);
    }

    result.trim_end().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn spaces_binary_operators_only() {
        assert_eq!(format_with_spaces("2+3*4"), "2 + 3 * 4");
        assert_eq!(format_with_spaces("2*-3"), "2 * -3");
        assert_eq!(format_with_spaces("--5"), "--5");
        assert_eq!(format_with_spaces(" ( 1+2 )^-(3) "), "(1 + 2) ^ -(3)");
    }

    #[test]
    fn numbers_are_trimmed() {
        assert_eq!(format_number(14.0), "14");
        assert_eq!(format_number(0.1 + 0.2), "0.3");
        assert_eq!(format_number(-2.5), "-2.5");
        assert_eq!(format_number(1e12), "1.000000e12");
        assert_eq!(format_number(f64::INFINITY), "inf");
    }
}
