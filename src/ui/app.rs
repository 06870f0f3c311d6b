//! Main TUI application state and logic

use crate::presets::PRESETS;
use crate::runner::{ProgramError, RunController, RunState, RunView};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind};
use ratatui::{
    backend::Backend,
    layout::{Constraint, Direction, Layout},
    Frame, Terminal,
};
use std::collections::HashSet;
use std::io;
use std::time::Duration;
use tracing::debug;

/// Which pane is currently focused
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusedPane {
    Source,
    Output,
    Debug,
}

impl FocusedPane {
    /// Move focus to the next pane (clockwise: source -> output -> debug)
    pub fn next(self) -> Self {
        match self {
            FocusedPane::Source => FocusedPane::Output,
            FocusedPane::Output => FocusedPane::Debug,
            FocusedPane::Debug => FocusedPane::Source,
        }
    }
}

/// What keystrokes currently edit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Normal,
    EditSource,
    EditInput,
}

/// The main application state
pub struct App {
    pub controller: RunController,

    /// Program text shown in the code pane and sent on run
    pub source_code: String,

    /// Text consumed by `,` instructions
    pub input: String,

    /// Index into [`PRESETS`] of the last loaded preset
    pub preset_index: Option<usize>,

    pub focused_pane: FocusedPane,
    pub mode: Mode,

    /// Per-pane scroll offsets
    pub source_scroll: usize,
    pub output_scroll: usize,
    pub debug_scroll: usize,

    pub should_quit: bool,
    pub status_message: String,

    /// Last state seen, used to report transitions in the status bar
    last_state: RunState,
}

impl App {
    pub fn new(controller: RunController, source_code: String, input: String) -> Self {
        App {
            controller,
            source_code,
            input,
            preset_index: None,
            focused_pane: FocusedPane::Source,
            mode: Mode::Normal,
            source_scroll: 0,
            output_scroll: 0,
            debug_scroll: 0,
            should_quit: false,
            status_message: String::from("Ready!"),
            last_state: RunState::Idle,
        }
    }

    /// Run the TUI application
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            let view = self.controller.view();
            self.observe(&view);
            terminal.draw(|f| self.render(f, &view))?;

            if self.should_quit {
                break;
            }

            // The program runs on its own thread; poll keeps redrawing while it does
            if event::poll(Duration::from_millis(50))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key_event(key);
                    }
                }
            }
        }

        self.controller.request_cancel();
        Ok(())
    }

    /// Update the status message when the run state changes
    fn observe(&mut self, view: &RunView) {
        if view.state == self.last_state {
            return;
        }
        debug!(from = %self.last_state, to = %view.state, "ui observed transition");
        self.last_state = view.state;
        self.status_message = match view.state {
            RunState::Idle => "Ready!".to_string(),
            RunState::Parsing => "Parsing...".to_string(),
            RunState::Running => "Running...".to_string(),
            RunState::Error => format!("{} error(s)", view.result.errors.len()),
            RunState::Interrupted => "Interrupted".to_string(),
            RunState::Done => format!(
                "Done in {} steps ({}ms)",
                view.result.stats.steps,
                view.result.stats.elapsed.as_millis()
            ),
        };
        if view.state.is_terminal() {
            self.output_scroll = 0;
            self.debug_scroll = 0;
        }
    }

    /// Source positions of parser errors, if the shown result belongs to the current text
    fn error_positions(&self, view: &RunView) -> HashSet<usize> {
        if view.source != self.source_code {
            return HashSet::new();
        }
        view.result
            .errors
            .iter()
            .filter_map(|e| match e {
                ProgramError::Parser(p) => p.position,
                _ => None,
            })
            .collect()
    }

    /// Render the UI
    fn render(&mut self, frame: &mut Frame, view: &RunView) {
        let size = frame.area();

        let main_chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Min(0), Constraint::Length(1)])
            .split(size);

        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(60), Constraint::Percentage(40)])
            .split(main_chunks[0]);

        // Left column: Code | Input | Output
        let left_rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Percentage(60),
                Constraint::Length(3),
                Constraint::Min(3),
            ])
            .split(columns[0]);

        let error_positions = self.error_positions(view);

        super::panes::render_source_pane(
            frame,
            left_rows[0],
            &self.source_code,
            &error_positions,
            self.mode == Mode::EditSource,
            self.focused_pane == FocusedPane::Source,
            &mut self.source_scroll,
        );

        super::panes::render_input_pane(
            frame,
            left_rows[1],
            &self.input,
            self.mode == Mode::EditInput,
        );

        super::panes::render_output_pane(
            frame,
            left_rows[2],
            &view.result,
            self.focused_pane == FocusedPane::Output,
            &mut self.output_scroll,
        );

        super::panes::render_debug_pane(
            frame,
            columns[1],
            &view.result,
            self.focused_pane == FocusedPane::Debug,
            &mut self.debug_scroll,
        );

        super::panes::render_status_bar(
            frame,
            main_chunks[1],
            &self.status_message,
            view.state,
            self.preset_index.map(|i| PRESETS[i].name),
            self.mode != Mode::Normal,
        );
    }

    /// Handle keyboard events
    pub fn handle_key_event(&mut self, key: KeyEvent) {
        match self.mode {
            Mode::Normal => self.handle_normal_key(key),
            Mode::EditSource | Mode::EditInput => self.handle_edit_key(key),
        }
    }

    fn handle_edit_key(&mut self, key: KeyEvent) {
        let target = match self.mode {
            Mode::EditInput => &mut self.input,
            _ => &mut self.source_code,
        };
        match key.code {
            KeyCode::Esc => {
                self.mode = Mode::Normal;
                self.status_message = "Edit finished".to_string();
            }
            KeyCode::Backspace => {
                target.pop();
            }
            KeyCode::Enter if self.mode == Mode::EditSource => target.push('\n'),
            KeyCode::Char(c) => target.push(c),
            _ => {}
        }
    }

    fn handle_normal_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('q') | KeyCode::Char('Q') => {
                self.should_quit = true;
            }
            KeyCode::Char('r') | KeyCode::F(5) => self.run_program(),
            KeyCode::Char('x') | KeyCode::Esc => self.interrupt(),
            KeyCode::Char('p') => self.cycle_preset(true),
            KeyCode::Char('P') => self.cycle_preset(false),
            KeyCode::Char('e') => {
                self.mode = Mode::EditSource;
                self.focused_pane = FocusedPane::Source;
                self.status_message = "Editing code".to_string();
            }
            KeyCode::Char('i') => {
                self.mode = Mode::EditInput;
                self.status_message = "Editing input".to_string();
            }
            KeyCode::Tab => {
                self.focused_pane = self.focused_pane.next();
            }
            KeyCode::Up => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_sub(1);
            }
            KeyCode::Down => {
                let scroll = self.focused_scroll();
                *scroll = scroll.saturating_add(1);
            }
            _ => {}
        }
    }

    fn focused_scroll(&mut self) -> &mut usize {
        match self.focused_pane {
            FocusedPane::Source => &mut self.source_scroll,
            FocusedPane::Output => &mut self.output_scroll,
            FocusedPane::Debug => &mut self.debug_scroll,
        }
    }

    fn run_program(&mut self) {
        self.controller
            .start_run_with_input(&self.source_code, &self.input);
    }

    fn interrupt(&mut self) {
        if self.controller.state().is_active() {
            self.controller.request_cancel();
        } else {
            self.status_message = "Nothing to interrupt".to_string();
        }
    }

    fn cycle_preset(&mut self, forward: bool) {
        let count = PRESETS.len();
        let next = match (self.preset_index, forward) {
            (None, true) => 0,
            (None, false) => count - 1,
            (Some(i), true) => (i + 1) % count,
            (Some(i), false) => (i + count - 1) % count,
        };
        self.load_preset(next);
    }

    pub fn load_preset(&mut self, index: usize) {
        if let Some(preset) = PRESETS.get(index) {
            self.preset_index = Some(index);
            self.source_code = preset.source.to_string();
            self.source_scroll = 0;
            self.status_message = format!("Loaded preset '{}'", preset.name);
        }
    }
}
