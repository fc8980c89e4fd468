use stackcalc::calc_engine::Calculator;
use stackcalc::editor::LineBuffer;
use stackcalc::session::{parse_request, HistoryEntry, Request};

pub struct App {
    pub calc: Calculator,
    pub input: LineBuffer,
    pub input_scroll: usize,
    pub history: Vec<HistoryEntry>,
    pub cursor_history: usize,
    pub notice: Option<String>,
    pub should_quit: bool,
    pub show_help: bool,
    pub help_scroll: usize,
    pub list_height: usize,
    pub item_start_indices: Vec<usize>,
    pub history_scroll: usize,
    pub scroll_to_bottom: bool,
    pub terminal_too_small: bool,
}

impl App {
    pub fn new(calc: Calculator) -> Self {
        App {
            calc,
            input: LineBuffer::new(),
            input_scroll: 0,
            history: Vec::new(),
            cursor_history: 0,
            notice: None,
            should_quit: false,
            show_help: false,
            help_scroll: 0,
            list_height: 5,
            item_start_indices: Vec::new(),
            history_scroll: 0,
            scroll_to_bottom: false,
            terminal_too_small: false,
        }
    }

    /// Keeps the cursor inside a window `visible_width` graphemes wide.
    pub fn adjust_input_scroll(&mut self, visible_width: usize) {
        let total = self.input.len();
        let cursor = self.input.cursor();

        if cursor < self.input_scroll {
            self.input_scroll = cursor;
        } else if cursor >= self.input_scroll + visible_width {
            self.input_scroll = cursor + 1 - visible_width;
        }

        self.input_scroll = self.input_scroll.min(total.saturating_sub(visible_width));
    }

    pub fn submit(&mut self) {
        let line = self.input.as_str().to_string();
        let Some(request) = parse_request(&line) else {
            return;
        };
        self.notice = None;

        match request {
            Request::Quit => {
                self.should_quit = true;
                return;
            }
            Request::Clear => {
                self.history.clear();
                self.cursor_history = 0;
                self.history_scroll = 0;
            }
            Request::Help => {
                self.show_help = true;
                self.help_scroll = 0;
            }
            Request::MissingExpression => {
                self.notice = Some("Please enter a valid expression after 'details'".to_string());
            }
            Request::Evaluate {
                expression,
                detailed,
            } => {
                let entry = HistoryEntry::evaluate(&self.calc, expression, detailed);
                self.history.push(entry);
                self.cursor_history = self.history.len() - 1;
                self.scroll_to_bottom = true;
            }
        }

        self.clear_input();
    }

    pub fn navigate_history(&mut self, direction: i32) {
        if direction < 0 && self.cursor_history > 0 {
            self.cursor_history -= 1;
        } else if direction > 0 && self.cursor_history < self.history.len().saturating_sub(1) {
            self.cursor_history += 1;
        }
        self.recall_selected();
    }

    pub fn scroll_history(&mut self, direction: i32) {
        let step = self.list_height.saturating_sub(1).max(1);
        if direction < 0 {
            self.cursor_history = self.cursor_history.saturating_sub(step);
        } else {
            self.cursor_history = self
                .cursor_history
                .saturating_add(step)
                .min(self.history.len().saturating_sub(1));
        }
        self.recall_selected();
    }

    fn recall_selected(&mut self) {
        match self.history.get(self.cursor_history) {
            Some(entry) => self.input.set(&entry.input),
            None => self.input.clear(),
        }
        self.input_scroll = 0;
        self.scroll_to_bottom = false;
    }

    pub fn clear_input(&mut self) {
        self.input.clear();
        self.input_scroll = 0;
    }
}
