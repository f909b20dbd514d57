//! Main application logic for the terminal user interface.
//!
//! This module contains the `App` struct which manages the dashboard state,
//! turns key presses into tracker commands, and renders the task tree, the
//! progress gauge and the per-dimension breakdowns.

use std::io;
use std::path::Path;
use std::time::Duration;

use chrono::Local;
use crossterm::event::{self, Event, KeyCode, KeyEventKind, KeyModifiers};
use ratatui::{
    backend::Backend,
    layout::{Alignment, Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Cell, Clear, Gauge, Paragraph, Row, Table, TableState, Wrap},
    Frame, Terminal,
};

use crate::cmd::{open_tracker, save_state, tree_label, truncate};
use crate::error::Result;
use crate::fields::*;
use crate::stats::{Summary, Tally};
use crate::store::JsonStore;
use crate::sync::{Command, Outcome, Tracker};
use crate::task::NewTask;
use crate::tui::{
    colors::{status_color, ASSIGNEE_PALETTE, BAR, CATEGORY_PALETTE, DARK_RED, PROGRESS},
    enums::{AppState, InputTarget},
    input::InputField,
    utils::centered_rect,
};

/// Main application state for the dashboard.
pub struct App {
    state: AppState,
    tracker: Tracker<JsonStore>,
    task_list_state: TableState,
    visible: Vec<u64>,
    input: InputField,
    input_target: Option<InputTarget>,
    status_message: String,
    confirm_delete: Option<u64>,
}

impl App {
    /// Create a new App, loading tasks from the specified path.
    pub fn new(db_path: &Path) -> Result<Self> {
        let tracker = open_tracker(db_path)?;
        let mut app = App {
            state: AppState::TaskList,
            tracker,
            task_list_state: TableState::default(),
            visible: Vec::new(),
            input: InputField::default(),
            input_target: None,
            status_message: String::new(),
            confirm_delete: None,
        };
        app.refresh_visible();
        Ok(app)
    }

    /// Persist expansion and the completed-today counter.
    pub fn save_state(&mut self) -> Result<()> {
        save_state(&mut self.tracker)
    }

    /// Recompute the visible rows, keeping the selection on the same task when possible.
    fn refresh_visible(&mut self) {
        let old_selected = self.selected_id();
        self.visible = self.tracker.session().visible().map(|r| r.task.id).collect();

        let idx = old_selected
            .and_then(|id| self.visible.iter().position(|&v| v == id))
            .or_else(|| {
                let prev = self.task_list_state.selected().unwrap_or(0);
                (!self.visible.is_empty()).then(|| prev.min(self.visible.len() - 1))
            });
        self.task_list_state.select(idx);
    }

    fn selected_id(&self) -> Option<u64> {
        self.task_list_state
            .selected()
            .and_then(|idx| self.visible.get(idx))
            .copied()
    }

    fn set_status_message(&mut self, msg: String) {
        self.status_message = msg;
    }

    /// Send a command to the tracker and report what happened.
    fn execute(&mut self, command: Command) -> Option<u64> {
        let result = self.tracker.execute(command);
        let applied = match result {
            Ok(Outcome::Applied(id)) => {
                if let Err(e) = self.save_state() {
                    self.set_status_message(format!("Could not save view state: {e}"));
                }
                id
            }
            Ok(Outcome::NotFound) => {
                self.set_status_message("Task no longer exists".to_string());
                None
            }
            Err(e) => {
                self.set_status_message(format!("Error: {e}"));
                None
            }
        };
        self.refresh_visible();
        applied
    }

    fn select(&mut self, id: u64) {
        if let Some(idx) = self.visible.iter().position(|&v| v == id) {
            self.task_list_state.select(Some(idx));
        }
    }

    fn begin_input(&mut self, target: InputTarget, initial: &str) {
        self.input = InputField::with_value(initial);
        self.input_target = Some(target);
        self.state = AppState::Input;
    }

    /// Handle a key press. Returns true if the application should quit.
    pub fn handle_key(&mut self, key: KeyCode, modifiers: KeyModifiers) -> bool {
        if key == KeyCode::Char('c') && modifiers.contains(KeyModifiers::CONTROL) {
            return true;
        }
        match self.state {
            AppState::TaskList => self.handle_task_list_input(key),
            AppState::Input => {
                self.handle_text_input(key);
                false
            }
            AppState::Help => {
                if matches!(key, KeyCode::Esc | KeyCode::Char('q') | KeyCode::Char('h')) {
                    self.state = AppState::TaskList;
                }
                false
            }
            AppState::Confirm => {
                self.handle_confirm_input(key);
                false
            }
        }
    }

    fn handle_task_list_input(&mut self, key: KeyCode) -> bool {
        self.status_message.clear();
        let selected = self.selected_id();

        match key {
            KeyCode::Char('q') | KeyCode::Esc => return true,
            KeyCode::Up | KeyCode::Char('k') => {
                if let Some(idx) = self.task_list_state.selected() {
                    self.task_list_state.select(Some(idx.saturating_sub(1)));
                }
            }
            KeyCode::Down | KeyCode::Char('j') => {
                if let Some(idx) = self.task_list_state.selected() {
                    if idx + 1 < self.visible.len() {
                        self.task_list_state.select(Some(idx + 1));
                    }
                }
            }
            KeyCode::Right | KeyCode::Left | KeyCode::Enter => {
                if let Some(id) = selected {
                    let expanded = self.tracker.session().is_expanded(id);
                    let wants = match key {
                        KeyCode::Right => !expanded,
                        KeyCode::Left => expanded,
                        _ => true,
                    };
                    if wants {
                        self.execute(Command::ToggleExpansion(id));
                    }
                }
            }
            KeyCode::Char(' ') | KeyCode::Char('x') => {
                if let Some(id) = selected {
                    self.execute(Command::Toggle(id));
                }
            }
            KeyCode::Char('a') => self.begin_input(InputTarget::NewTask { parent: None }, ""),
            KeyCode::Char('A') => {
                if let Some(id) = selected {
                    self.begin_input(InputTarget::NewTask { parent: Some(id) }, "");
                }
            }
            KeyCode::Char('e') => {
                if let Some(task) = selected.and_then(|id| self.tracker.session().find(id)) {
                    let (id, title) = (task.id, task.title.clone());
                    self.begin_input(InputTarget::Rename(id), &title);
                }
            }
            KeyCode::Char('c') => {
                if let Some(task) = selected.and_then(|id| self.tracker.session().find(id)) {
                    let (id, category) = (task.id, task.category.clone());
                    self.begin_input(InputTarget::Category(id), &category);
                }
            }
            KeyCode::Char('u') => {
                if let Some(task) = selected.and_then(|id| self.tracker.session().find(id)) {
                    let (id, assignee) = (task.id, task.assignee.clone());
                    self.begin_input(InputTarget::Assignee(id), &assignee);
                }
            }
            KeyCode::Char('s') => {
                if let Some(task) = selected.and_then(|id| self.tracker.session().find(id)) {
                    let (id, next) = (task.id, task.status.next());
                    self.execute(Command::SetStatus(id, next));
                }
            }
            KeyCode::Char('d') | KeyCode::Delete => {
                if let Some(id) = selected {
                    self.confirm_delete = Some(id);
                    self.state = AppState::Confirm;
                }
            }
            KeyCode::Char('r') => {
                self.execute(Command::ResetCompletedToday);
                self.set_status_message("Completed-today counter reset".to_string());
            }
            KeyCode::Char('h') | KeyCode::F(1) => self.state = AppState::Help,
            _ => {}
        }
        false
    }

    fn handle_text_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Esc => {
                self.input_target = None;
                self.state = AppState::TaskList;
            }
            KeyCode::Enter => {
                let value = self.input.value.clone();
                if let Some(target) = self.input_target.take() {
                    self.submit(target, value);
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Backspace => self.input.handle_backspace(),
            KeyCode::Delete => self.input.handle_delete(),
            KeyCode::Left => self.input.move_cursor_left(),
            KeyCode::Right => self.input.move_cursor_right(),
            KeyCode::Char(c) => self.input.handle_char(c),
            _ => {}
        }
    }

    fn submit(&mut self, target: InputTarget, value: String) {
        match target {
            InputTarget::NewTask { parent } => {
                let fields = NewTask {
                    title: Some(value),
                    ..NewTask::default()
                };
                if let Some(id) = self.execute(Command::Add {
                    parent_id: parent,
                    fields,
                }) {
                    if let Some(parent) = parent {
                        if !self.tracker.session().is_expanded(parent) {
                            self.execute(Command::ToggleExpansion(parent));
                        }
                    }
                    self.select(id);
                    self.set_status_message(format!("Added task {id}"));
                }
            }
            InputTarget::Rename(id) => {
                self.execute(Command::Rename(id, value));
            }
            InputTarget::Category(id) => {
                self.execute(Command::Recategorize(id, value));
            }
            InputTarget::Assignee(id) => {
                self.execute(Command::Reassign(id, value));
            }
        }
    }

    fn handle_confirm_input(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('y') | KeyCode::Char('Y') | KeyCode::Enter => {
                if let Some(id) = self.confirm_delete.take() {
                    if self.execute(Command::Delete(id)).is_some() {
                        self.set_status_message(format!("Deleted task {id}"));
                    }
                }
                self.state = AppState::TaskList;
            }
            KeyCode::Char('n') | KeyCode::Char('N') | KeyCode::Esc => {
                self.confirm_delete = None;
                self.state = AppState::TaskList;
            }
            _ => {}
        }
    }

    fn handle_input(&mut self) -> io::Result<bool> {
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                if key.kind == KeyEventKind::Press {
                    return Ok(self.handle_key(key.code, key.modifiers));
                }
            }
        }
        Ok(false)
    }

    fn render_header(&self, f: &mut Frame, area: Rect) {
        let now = Local::now().format("%B %-d, %I:%M %p").to_string();
        let header = Paragraph::new(Line::from(vec![
            Span::styled("TASK TREE", Style::default().add_modifier(Modifier::BOLD)),
            Span::raw("  "),
            Span::styled(now, Style::default().fg(Color::Gray).add_modifier(Modifier::ITALIC)),
        ]))
        .style(Style::default().bg(BAR).fg(Color::White))
        .block(Block::default().borders(Borders::ALL))
        .alignment(Alignment::Center);
        f.render_widget(header, area);
    }

    fn render_progress(&self, f: &mut Frame, area: Rect, summary: &Summary) {
        let ratio = (summary.progress_percent / 100.0).clamp(0.0, 1.0);
        let gauge = Gauge::default()
            .block(Block::default().borders(Borders::ALL).title(format!(
                "Progress  {}/{} completed",
                summary.completed, summary.total
            )))
            .gauge_style(Style::default().fg(PROGRESS).bg(Color::DarkGray))
            .ratio(ratio)
            .label(format!("{:.0}%", summary.progress_percent));
        f.render_widget(gauge, area);
    }

    fn render_task_list(&mut self, f: &mut Frame, area: Rect) {
        let session = self.tracker.session();
        let header = Row::new(["Task", "Category", "Assignee", "Status"].map(|h| {
            Cell::from(h).style(Style::default().add_modifier(Modifier::BOLD))
        }))
        .style(Style::default().bg(BAR).fg(Color::White))
        .height(1);

        let rows: Vec<Row> = session
            .visible()
            .map(|row| {
                let task = row.task;
                let style = if task.completed {
                    Style::default().fg(Color::DarkGray).add_modifier(Modifier::CROSSED_OUT)
                } else {
                    Style::default().fg(Color::White)
                };
                Row::new(vec![
                    Cell::from(tree_label(&row, session.is_expanded(task.id))),
                    Cell::from(truncate(&task.category, 16)),
                    Cell::from(truncate(&task.assignee, 16)),
                    Cell::from(Span::styled(
                        format_status(task.status),
                        Style::default().fg(status_color(task.status)),
                    )),
                ])
                .style(style)
            })
            .collect();

        let widths = [
            Constraint::Min(30),
            Constraint::Length(16),
            Constraint::Length(16),
            Constraint::Length(16),
        ];

        let title = if rows.is_empty() {
            "To Do - press 'a' to add a task, 'h' for help".to_string()
        } else {
            format!("To Do ({} shown) - press 'h' for help", rows.len())
        };
        let table = Table::new(rows, widths)
            .header(header)
            .block(Block::default().borders(Borders::ALL).title(title))
            .row_highlight_style(Style::default().bg(Color::Gray).fg(Color::Black))
            .highlight_symbol(">> ");

        f.render_stateful_widget(table, area, &mut self.task_list_state);
    }

    fn render_tallies(&self, f: &mut Frame, area: Rect, summary: &Summary) {
        let columns = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
                Constraint::Ratio(1, 3),
            ])
            .split(area);

        render_breakdown(f, columns[0], "Tasks by Category", &summary.by_category, |idx, _| {
            CATEGORY_PALETTE[idx % CATEGORY_PALETTE.len()]
        });
        render_breakdown(f, columns[1], "Tasks by Assignee", &summary.by_assignee, |idx, _| {
            ASSIGNEE_PALETTE[idx % ASSIGNEE_PALETTE.len()]
        });
        render_breakdown(f, columns[2], "Tasks by Status", &summary.by_status, |_, name| {
            parse_status(name).map_or(Color::White, status_color)
        });
    }

    fn render_input(&self, f: &mut Frame, area: Rect) {
        let prompt = self
            .input_target
            .map(|t| t.prompt())
            .unwrap_or_default();
        let area = centered_rect(60, 20, area);
        f.render_widget(Clear, area);
        let paragraph = Paragraph::new(vec![
            Line::from(self.input.value.as_str()),
            Line::from(""),
            Line::from(Span::styled(
                "Enter to save, Esc to cancel",
                Style::default().fg(Color::Gray),
            )),
        ])
        .block(Block::default().borders(Borders::ALL).title(prompt));
        f.render_widget(paragraph, area);
        f.set_cursor_position((area.x + 1 + self.input.cursor as u16, area.y + 1));
    }

    fn render_help(&self, f: &mut Frame, area: Rect) {
        let bold = Style::default().add_modifier(Modifier::BOLD);
        let help_text = vec![
            Line::from(Span::styled("Task Tree Help", bold)),
            Line::from(""),
            Line::from(Span::styled("Navigation:", bold)),
            Line::from("  ↑/k, ↓/j     Move selection"),
            Line::from("  →/←, Enter   Expand / collapse subtasks"),
            Line::from(""),
            Line::from(Span::styled("Editing:", bold)),
            Line::from("  Space/x      Toggle completion"),
            Line::from("  a            Add top-level task"),
            Line::from("  A            Add subtask to selected task"),
            Line::from("  e            Rename"),
            Line::from("  c            Change category"),
            Line::from("  u            Change assignee"),
            Line::from("  s            Cycle status"),
            Line::from("  d/Del        Delete task and its subtasks"),
            Line::from("  r            Reset completed-today counter"),
            Line::from(""),
            Line::from("  h/F1         Show this help"),
            Line::from("  q/Esc        Quit"),
        ];
        let paragraph = Paragraph::new(help_text)
            .block(Block::default().borders(Borders::ALL).title("Help"))
            .wrap(Wrap { trim: false });
        f.render_widget(paragraph, area);
    }

    fn render_confirm(&self, f: &mut Frame, area: Rect) {
        let block = Block::default()
            .title("Confirm Action")
            .borders(Borders::ALL)
            .style(Style::default().bg(DARK_RED));

        let area = centered_rect(50, 25, area);
        f.render_widget(Clear, area);

        let target = self
            .confirm_delete
            .and_then(|id| self.tracker.session().find(id))
            .map(|t| format!("Delete '{}' and all of its subtasks?", t.title))
            .unwrap_or_default();
        let text = vec![
            Line::from(""),
            Line::from(Span::styled(target, Style::default().add_modifier(Modifier::BOLD))),
            Line::from(""),
            Line::from("Press 'y' to confirm, 'n' to cancel"),
        ];
        let paragraph = Paragraph::new(text)
            .block(block)
            .alignment(Alignment::Center)
            .wrap(Wrap { trim: true });
        f.render_widget(paragraph, area);
    }

    fn render_status_bar(&self, f: &mut Frame, area: Rect) {
        let today = format!("{} completed today", self.tracker.session().completed_today());
        let text = if self.status_message.is_empty() {
            format!("{today} | r to reset | h for help")
        } else {
            format!("{today} | {}", self.status_message)
        };
        let status = Paragraph::new(text)
            .style(Style::default().bg(BAR).fg(Color::White))
            .alignment(Alignment::Left);
        f.render_widget(status, area);
    }

    /// Draw the whole dashboard.
    pub fn render(&mut self, f: &mut Frame) {
        let summary = self.tracker.session().summary();
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(3),
                Constraint::Length(3),
                Constraint::Min(6),
                Constraint::Length(10),
                Constraint::Length(1),
            ])
            .split(f.area());

        self.render_header(f, chunks[0]);
        self.render_progress(f, chunks[1], &summary);
        if self.state == AppState::Help {
            self.render_help(f, chunks[2]);
        } else {
            self.render_task_list(f, chunks[2]);
        }
        self.render_tallies(f, chunks[3], &summary);
        self.render_status_bar(f, chunks[4]);

        match self.state {
            AppState::Input => self.render_input(f, chunks[2]),
            AppState::Confirm => self.render_confirm(f, chunks[2]),
            AppState::TaskList | AppState::Help => {}
        }
    }

    /// Main event loop for the dashboard.
    ///
    /// Redraws at least every quarter second so the clock keeps moving.
    pub fn run<B: Backend>(&mut self, terminal: &mut Terminal<B>) -> io::Result<()> {
        loop {
            terminal.draw(|f| self.render(f))?;

            if self.handle_input()? {
                break;
            }
        }
        Ok(())
    }
}

/// One breakdown column: a colored swatch, the value, its count and share.
fn render_breakdown(
    f: &mut Frame,
    area: Rect,
    title: &str,
    tallies: &[Tally],
    color: impl Fn(usize, &str) -> Color,
) {
    let total: usize = tallies.iter().map(|t| t.count).sum();
    let rows: Vec<Row> = tallies
        .iter()
        .enumerate()
        .map(|(idx, tally)| {
            let share = if total == 0 { 0.0 } else { tally.count as f64 / total as f64 * 100.0 };
            Row::new(vec![
                Cell::from(Span::styled("■", Style::default().fg(color(idx, &tally.name)))),
                Cell::from(truncate(&tally.name, 18)),
                Cell::from(tally.count.to_string()),
                Cell::from(format!("{share:.0}%")),
            ])
        })
        .collect();
    let table = Table::new(
        rows,
        [
            Constraint::Length(1),
            Constraint::Min(8),
            Constraint::Length(4),
            Constraint::Length(5),
        ],
    )
    .block(Block::default().borders(Borders::ALL).title(title.to_string()));
    f.render_widget(table, area);
}

#[cfg(test)]
mod tests {
    use ratatui::backend::TestBackend;

    use super::*;

    fn app() -> (tempfile::TempDir, App) {
        let dir = tempfile::tempdir().unwrap();
        let app = App::new(&dir.path().join("tasks.json")).unwrap();
        (dir, app)
    }

    fn type_text(app: &mut App, text: &str) {
        for c in text.chars() {
            app.handle_key(KeyCode::Char(c), KeyModifiers::NONE);
        }
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
    }

    fn press(app: &mut App, c: char) -> bool {
        app.handle_key(KeyCode::Char(c), KeyModifiers::NONE)
    }

    fn screen(app: &mut App) -> String {
        let mut terminal = Terminal::new(TestBackend::new(120, 40)).unwrap();
        terminal.draw(|f| app.render(f)).unwrap();
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|c| c.symbol()).collect()
    }

    #[test]
    fn test_add_subtask_and_toggle_from_keys() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Ship release");
        press(&mut app, 'A');
        type_text(&mut app, "Write notes");

        let session = app.tracker.session();
        assert_eq!(session.forest().len(), 1);
        assert_eq!(session.forest()[0].subtasks[0].title, "Write notes");
        // The parent was expanded so the new subtask is visible and selected.
        assert_eq!(app.visible.len(), 2);
        assert_eq!(app.selected_id(), Some(session.forest()[0].subtasks[0].id));

        press(&mut app, ' ');
        assert_eq!(app.tracker.session().completed_today(), 1);
        assert_eq!(app.tracker.session().summary().progress_percent, 50.0);
    }

    #[test]
    fn test_collapse_hides_subtasks() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Parent");
        press(&mut app, 'A');
        type_text(&mut app, "Child");
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        app.handle_key(KeyCode::Left, KeyModifiers::NONE);
        assert_eq!(app.visible.len(), 1);
        app.handle_key(KeyCode::Right, KeyModifiers::NONE);
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn test_edit_fields_and_cycle_status() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Task");
        let id = app.selected_id().unwrap();

        press(&mut app, 'c');
        for _ in 0.."Uncategorized".len() {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        type_text(&mut app, "Backend");
        press(&mut app, 's');

        let task = app.tracker.session().find(id).unwrap();
        assert_eq!(task.category, "Backend");
        assert_eq!(task.status, Status::DevInProgress);
        assert!(app.tracker.session().categories().contains(&"Backend".to_string()));
    }

    #[test]
    fn test_rename_reassign_reset_and_enter_toggle() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Draft");
        let id = app.selected_id().unwrap();

        press(&mut app, 'e');
        for _ in 0.."Draft".len() {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        type_text(&mut app, "Final");
        press(&mut app, 'u');
        app.handle_key(KeyCode::Esc, KeyModifiers::NONE);
        press(&mut app, 'u');
        for _ in 0.."Unassigned".len() {
            app.handle_key(KeyCode::Backspace, KeyModifiers::NONE);
        }
        type_text(&mut app, "Robin");

        let task = app.tracker.session().find(id).unwrap();
        assert_eq!(task.title, "Final");
        assert_eq!(task.assignee, "Robin");

        press(&mut app, ' ');
        assert_eq!(app.tracker.session().completed_today(), 1);
        press(&mut app, 'r');
        assert_eq!(app.tracker.session().completed_today(), 0);
        assert!(app.tracker.session().find(id).unwrap().completed);

        press(&mut app, 'A');
        type_text(&mut app, "Child");
        app.handle_key(KeyCode::Up, KeyModifiers::NONE);
        assert_eq!(app.visible.len(), 2);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.visible.len(), 1);
        app.handle_key(KeyCode::Enter, KeyModifiers::NONE);
        assert_eq!(app.visible.len(), 2);
    }

    #[test]
    fn test_delete_requires_confirmation() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Doomed");
        press(&mut app, 'd');
        press(&mut app, 'n');
        assert_eq!(app.tracker.session().forest().len(), 1);
        press(&mut app, 'd');
        press(&mut app, 'y');
        assert!(app.tracker.session().forest().is_empty());
        assert_eq!(app.selected_id(), None);
    }

    #[test]
    fn test_escape_cancels_input_and_quits_from_list() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        press(&mut app, 'z');
        assert!(!app.handle_key(KeyCode::Esc, KeyModifiers::NONE));
        assert!(app.tracker.session().forest().is_empty());
        assert!(press(&mut app, 'q'));
    }

    #[test]
    fn test_render_shows_progress_and_breakdowns() {
        let (_dir, mut app) = app();
        press(&mut app, 'a');
        type_text(&mut app, "Alpha");
        press(&mut app, ' ');
        let text = screen(&mut app);
        assert!(text.contains("Progress"));
        assert!(text.contains("100%"));
        assert!(text.contains("Alpha"));
        assert!(text.contains("Tasks by Status"));
        assert!(text.contains("1 completed today"));
    }
}
