use ratatui::{
    layout::Alignment,
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, BorderType, Borders, Clear, Paragraph, Wrap},
    Frame,
};

fn heading(text: &'static str) -> Line<'static> {
    Line::from(Span::styled(
        text,
        Style::default().fg(Color::Cyan).add_modifier(Modifier::UNDERLINED),
    ))
}

pub fn render_help(frame: &mut Frame, scroll: usize) {
    let block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Double)
        .border_style(Style::default().fg(Color::Yellow))
        .title(" stackcalc Help ")
        .title_alignment(Alignment::Center)
        .style(Style::default().bg(Color::Black));

    let help_text = vec![
        Line::from(Span::styled(
            "stackcalc - precedence climbing calculator",
            Style::default().fg(Color::Green).add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("Operators (highest binds first):"),
        Line::from("  ^     : Power, right associative  (2 ^ 3 ^ 2 = 512)"),
        Line::from("  * / % : Multiply, divide, remainder (7 % 3 = 1, -7 % 3 = -1)"),
        Line::from("  + -   : Add, subtract             (10 - 3 - 2 = 5)"),
        Line::from("  -x +x : Sign of a single operand  (--5 = 5, -2 ^ 2 = 4)"),
        Line::from("  ( )   : Grouping                  ((2 + 3) * 4 = 20)"),
        Line::from(""),
        heading("Numbers:"),
        Line::from("  Integers and decimals: 42, 3.25, 007"),
        Line::from("  A decimal needs digits on both sides of the point"),
        Line::from(""),
        heading("Errors:"),
        Line::from("  10 / 0, 10 % 0     : division / modulo by zero"),
        Line::from("  (1 + 2             : unbalanced parentheses"),
        Line::from("  1.2.3              : malformed number"),
        Line::from(""),
        heading("Commands:"),
        Line::from("  details <expression> : Show every fold with the evaluation time"),
        Line::from("  clear                : Clear calculation history"),
        Line::from("  help                 : Show this help screen"),
        Line::from("  quit                 : Exit the calculator"),
        Line::from(""),
        heading("Navigation:"),
        Line::from("  Left/Right       : Move cursor"),
        Line::from("  Ctrl+Left/Right  : Move cursor by words"),
        Line::from("  Home/End         : Move to start/end of line"),
        Line::from("  Up/Down          : Recall history"),
        Line::from("  PgUp/PgDn        : Page through history"),
        Line::from("  Mouse wheel      : Scroll history"),
        Line::from("  Ctrl+U           : Clear current input"),
        Line::from("  Esc / F1         : Close this screen"),
    ];

    let paragraph = Paragraph::new(help_text)
        .block(block)
        .alignment(Alignment::Left)
        .wrap(Wrap { trim: false })
        .scroll((scroll.min(u16::MAX as usize) as u16, 0));

    frame.render_widget(Clear, frame.size());
    frame.render_widget(paragraph, frame.size());
}
