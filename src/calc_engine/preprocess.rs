use super::error::CalcError;

/// Strips ASCII whitespace and checks that parentheses pair up.
pub fn preprocess(raw: &str) -> Result<Vec<char>, CalcError> {
    let text: Vec<char> = raw.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let mut open = Vec::new();
    for (position, &c) in text.iter().enumerate() {
        match c {
            '(' => open.push(position),
            ')' => {
                if open.pop().is_none() {
                    return Err(CalcError::UnbalancedParentheses { position });
                }
            }
            _ => {}
        }
    }

    // report the innermost paren left open
    if let Some(&position) = open.last() {
        return Err(CalcError::UnbalancedParentheses { position });
    }

    Ok(text)
}
