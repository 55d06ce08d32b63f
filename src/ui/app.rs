//! Main TUI application state and logic

use super::panes::{self, SourceScrollState};
use crate::codegen::{LabelRef, TacProgram};
use crossterm::event::{self, Event, KeyCode, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::io;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Tac,
}

impl FocusedPane {
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Tac,
            FocusedPane::Tac => FocusedPane::Source,
        }
    }
}

/// The main application state
pub struct App {
    /// The source the program was generated from
    pub source_code: String,

    /// Generated code being browsed
    pub program: TacProgram,

    /// Currently focused pane
    pub focused_pane: FocusedPane,

    /// Index of the selected instruction
    pub cursor: usize,

    pub source_scroll: SourceScrollState,
    pub tac_scroll: usize,

    /// Rows visible in the TAC pane, updated on every draw
    pub page_size: usize,

    /// Cursor positions to return to, most recent jump last
    pub jump_stack: Vec<usize>,

    /// Whether the app should quit
    pub should_quit: bool,

    /// Status message to display
    pub status_message: String,
}

impl App {
    /// Create a new app browsing `program`, generated from `source_code`
    pub fn new(program: TacProgram, source_code: String) -> Self {
        App {
            source_code,
            program,
            focused_pane: FocusedPane::Tac,
            cursor: 0,
            source_scroll: SourceScrollState::default(),
            tac_scroll: 0,
            page_size: 10,
            jump_stack: Vec::new(),
            should_quit: false,
            status_message: String::from("Ready!"),
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.should_quit {
                break;
            }

            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    self.handle_key(key.code);
                }
            }
        }

        Ok(())
    }

    /// Source line of the selected instruction (1-based, 0 when there is none)
    pub fn current_line(&self) -> usize {
        self.program
            .location(self.cursor)
            .map(|loc| loc.line)
            .unwrap_or(0)
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(55), Constraint::Percentage(45)])
            .split(main_chunks[0]);

        self.page_size = columns[1].height.saturating_sub(2).max(1) as usize;

        panes::render_source_pane(
            frame,
            columns[0],
            &self.source_code,
            self.current_line(),
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        panes::render_tac_pane(
            frame,
            columns[1],
            &self.program,
            self.cursor,
            self.focused_pane == FocusedPane::Tac,
            &mut self.tac_scroll,
        );

        panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            self.cursor,
            self.program.len(),
            self.jump_stack.len(),
        );
    }

    /// Handle a key press
    pub fn handle_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => match self.focused_pane {
                // Scrolling up makes the highlighted line move down visually
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_add(1));
                    }
                }
                FocusedPane::Tac => self.move_cursor_to(self.cursor.saturating_sub(1)),
            },
            KeyCode::Down => match self.focused_pane {
                FocusedPane::Source => {
                    if let Some(row) = self.source_scroll.target_line_row {
                        self.source_scroll.target_line_row = Some(row.saturating_sub(1));
                    }
                }
                FocusedPane::Tac => self.move_cursor_to(self.cursor.saturating_add(1)),
            },
            KeyCode::PageUp => self.move_cursor_to(self.cursor.saturating_sub(self.page_size)),
            KeyCode::PageDown => self.move_cursor_to(self.cursor.saturating_add(self.page_size)),
            KeyCode::Home => self.move_cursor_to(0),
            KeyCode::End => self.move_cursor_to(usize::MAX),
            KeyCode::Enter => self.follow_jump(),
            KeyCode::Backspace => self.jump_back(),
            _ => {}
        }
    }

    fn move_cursor_to(&mut self, index: usize) {
        self.cursor = index.min(self.program.len().saturating_sub(1));
    }

    /// Move the cursor to the label targeted by the selected branch or jump
    fn follow_jump(&mut self) {
        let target = self
            .program
            .instructions()
            .get(self.cursor)
            .and_then(|instruction| instruction.target());

        match target {
            Some(LabelRef::Resolved(label)) => match self.program.label_position(label) {
                Some(position) => {
                    self.jump_stack.push(self.cursor);
                    self.cursor = position;
                    self.status_message = format!("Jumped to {}", label);
                }
                None => self.status_message = format!("{} is never placed", label),
            },
            Some(LabelRef::Pending) => {
                self.status_message = "Branch target was never patched".to_string();
            }
            None => self.status_message = "Not a jump".to_string(),
        }
    }

    fn jump_back(&mut self) {
        match self.jump_stack.pop() {
            Some(position) => {
                self.cursor = position;
                self.status_message = "Returned from jump".to_string();
            }
            None => self.status_message = "No jump to return from".to_string(),
        }
    }
}
