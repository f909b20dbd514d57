//! Enumerations for TUI state management.

/// Application state for the terminal user interface.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum AppState {
    TaskList,
    Input,
    Help,
    Confirm,
}

/// What the text currently being typed will be used for.
#[derive(Clone, Copy, PartialEq, Debug)]
pub enum InputTarget {
    /// Title of a new task, top-level or under `parent`.
    NewTask { parent: Option<u64> },
    Rename(u64),
    Category(u64),
    Assignee(u64),
}

impl InputTarget {
    /// Prompt shown above the input field.
    pub fn prompt(&self) -> String {
        match self {
            InputTarget::NewTask { parent: None } => "New task".to_string(),
            InputTarget::NewTask { parent: Some(id) } => format!("New subtask of {id}"),
            InputTarget::Rename(id) => format!("Rename task {id}"),
            InputTarget::Category(id) => format!("Category for task {id}"),
            InputTarget::Assignee(id) => format!("Assignee for task {id}"),
        }
    }
}
