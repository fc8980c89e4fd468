use ratatui::style::{Color, Modifier, Style};
use ratatui::text::Span;
use stackcalc::calc_engine::Operator;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn wrap_text(text: &str, width: usize) -> Vec<String> {
    if width == 0 {
        return vec![String::new()];
    }

    let mut lines = Vec::new();
    let mut current_line = String::new();
    let mut current_width = 0;

    for word in text.split_whitespace() {
        let word_width = word.width();

        if word_width > width {
            if !current_line.is_empty() {
                lines.push(std::mem::take(&mut current_line));
                current_width = 0;
            }
            lines.extend(split_by_width(word, width));
            continue;
        }

        if !current_line.is_empty() && current_width + 1 + word_width > width {
            lines.push(std::mem::take(&mut current_line));
            current_width = 0;
        }

        if !current_line.is_empty() {
            current_line.push(' ');
            current_width += 1;
        }
        current_line.push_str(word);
        current_width += word_width;
    }

    if !current_line.is_empty() {
        lines.push(current_line);
    }

    lines
}

/// Hard-breaks a word that is wider than a whole line.
fn split_by_width(word: &str, width: usize) -> Vec<String> {
    let mut chunks = Vec::new();
    let mut chunk = String::new();
    let mut chunk_width = 0;

    for c in word.chars() {
        let char_width = c.width().unwrap_or(1);
        if chunk_width + char_width > width && !chunk.is_empty() {
            chunks.push(std::mem::take(&mut chunk));
            chunk_width = 0;
        }
        chunk.push(c);
        chunk_width += char_width;
    }

    if !chunk.is_empty() {
        chunks.push(chunk);
    }
    chunks
}

/// Colours numbers, operators and parentheses; parentheses cycle through
/// colours by nesting depth.
pub fn highlight_expression(expr: &str, base_style: Style) -> Vec<Span<'static>> {
    let operator_style = Style::default()
        .fg(Color::Yellow)
        .add_modifier(Modifier::BOLD);
    let number_style = Style::default().fg(Color::LightGreen);
    let paren_colors = [Color::LightBlue, Color::LightMagenta, Color::LightCyan];

    let mut spans = Vec::new();
    let mut number = String::new();
    let mut depth: usize = 0;

    for c in expr.chars() {
        if c.is_ascii_digit() || c == '.' {
            number.push(c);
            continue;
        }
        if !number.is_empty() {
            spans.push(Span::styled(std::mem::take(&mut number), number_style));
        }

        let style = match c {
            '(' => {
                let style = Style::default().fg(paren_colors[depth % paren_colors.len()]);
                depth += 1;
                style
            }
            ')' => {
                depth = depth.saturating_sub(1);
                Style::default().fg(paren_colors[depth % paren_colors.len()])
            }
            c if Operator::from_char(c).is_some() => operator_style,
            _ => base_style,
        };
        spans.push(Span::styled(c.to_string(), style));
    }

    if !number.is_empty() {
        spans.push(Span::styled(number, number_style));
    }

    spans
}
