use super::error::CalcError;

/// Takes the maximal run of digits and dots, which must read as
/// `digits ('.' digits)?`. Returns the value and the offset past the run.
pub fn scan_number(text: &[char], start: usize) -> Result<(f64, usize), CalcError> {
    let end = text[start..]
        .iter()
        .position(|c| !(c.is_ascii_digit() || *c == '.'))
        .map_or(text.len(), |len| start + len);

    let literal: String = text[start..end].iter().collect();
    if !is_well_formed(&literal) {
        return Err(CalcError::MalformedLiteral { literal });
    }

    literal
        .parse::<f64>()
        .map(|value| (value, end))
        .map_err(|_| CalcError::MalformedLiteral { literal })
}

fn is_well_formed(literal: &str) -> bool {
    let all_digits = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());

    match literal.split_once('.') {
        None => all_digits(literal),
        Some((int, frac)) => all_digits(int) && all_digits(frac),
    }
}
