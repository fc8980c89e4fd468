use std::io::{stdin, stdout, Stdin, Write};

use anyhow::{Context, Result};
use stackcalc::calc_engine::Calculator;
use stackcalc::editor::LineBuffer;
use stackcalc::format::{format_number, format_with_spaces};
use stackcalc::session::{parse_request, HistoryEntry, Request};
use termion::{
    clear::CurrentLine as ClearLine,
    cursor::{DetectCursorPos, Goto},
    event::Key,
    input::{Keys, TermRead},
    raw::IntoRawMode,
};

const PROMPT: &str = "Expression: ";

pub fn run_line(calc: Calculator) -> Result<()> {
    println!("stackcalc line mode");
    println!("Supports: + - * / % ^, unary signs, parentheses");
    println!("Keys: Left/Right, Alt+B/Alt+F, Home/End, Up/Down for history, Ctrl+U to clear");
    println!("Commands: 'details <expr>', 'clear', 'quit'");

    let mut stdout = stdout().into_raw_mode().context("failed to enter raw mode")?;
    let mut keys = stdin().keys();
    let mut history: Vec<String> = Vec::new();

    while let Some(line) = read_line(&mut stdout, &mut keys, &history)? {
        let Some(request) = parse_request(&line) else {
            continue;
        };

        match request {
            Request::Quit => break,
            Request::Clear => {
                history.clear();
                write!(stdout, "\r\nHistory cleared\r\n")?;
            }
            Request::Help => {
                write!(
                    stdout,
                    "\r\n  ^ binds tightest and groups right, then * / %, then + -\r\n  \
                     'details <expr>' shows every fold\r\n"
                )?;
            }
            Request::MissingExpression => {
                write!(stdout, "\r\nPlease enter a valid expression after 'details'\r\n")?;
            }
            Request::Evaluate {
                expression,
                detailed,
            } => {
                history.push(line.trim().to_string());
                let entry = HistoryEntry::evaluate(&calc, expression, detailed);
                print_entry(&mut stdout, &entry)?;
            }
        }
    }

    write!(stdout, "\r\nGoodbye!\r\n")?;
    stdout.flush()?;
    Ok(())
}

/// Edits one line in place. `None` means the user asked to leave.
fn read_line<W: Write>(
    stdout: &mut W,
    keys: &mut Keys<Stdin>,
    history: &[String],
) -> Result<Option<String>> {
    let mut buffer = LineBuffer::new();
    let mut history_index = history.len();

    write!(stdout, "\r\n")?;
    stdout.flush()?;
    let (_, row) = stdout.cursor_pos()?;

    loop {
        let column = (PROMPT.len() + buffer.cursor_width() + 1).min(u16::MAX as usize) as u16;
        write!(stdout, "{}{}{}{}", Goto(1, row), ClearLine, PROMPT, buffer.as_str())?;
        write!(stdout, "{}", Goto(column, row))?;
        stdout.flush()?;

        let Some(key) = keys.next() else {
            return Ok(None);
        };

        match key? {
            Key::Char('\n') => return Ok(Some(buffer.take())),
            Key::Ctrl('c') => return Ok(None),
            Key::Ctrl('d') if buffer.is_empty() => return Ok(None),
            Key::Ctrl('u') => buffer.clear(),
            Key::Alt('b') => buffer.move_word_left(),
            Key::Alt('f') => buffer.move_word_right(),
            Key::Char(c) => buffer.insert(c),
            Key::Backspace => buffer.backspace(),
            Key::Delete => buffer.delete(),
            Key::Left => buffer.move_left(),
            Key::Right => buffer.move_right(),
            Key::Home => buffer.home(),
            Key::End => buffer.end(),
            Key::Up if history_index > 0 => {
                history_index -= 1;
                buffer.set(&history[history_index]);
            }
            Key::Down => {
                if history_index + 1 < history.len() {
                    history_index += 1;
                    buffer.set(&history[history_index]);
                } else {
                    history_index = history.len();
                    buffer.clear();
                }
            }
            _ => {}
        }
    }
}

fn print_entry<W: Write>(out: &mut W, entry: &HistoryEntry) -> Result<()> {
    let expression = format_with_spaces(&entry.input);
    match &entry.result {
        Ok(value) => write!(out, "\r\n  {} = {}\r\n", expression, format_number(*value))?,
        Err(e) => write!(out, "\r\n  {} = Error: {}\r\n", expression, e)?,
    }

    if entry.detailed_mode {
        for (i, step) in entry.steps.iter().enumerate() {
            write!(
                out,
                "  Step {}: {} = {}\r\n",
                i + 1,
                step.operation,
                format_number(step.result)
            )?;
        }
        write!(out, "  Time: {:.6} ms\r\n", entry.duration.as_secs_f64() * 1000.0)?;
    }
    Ok(())
}
