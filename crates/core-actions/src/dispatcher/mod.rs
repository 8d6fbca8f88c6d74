//! Dispatcher applying `Action` to the editor model.
//!
//! Sub-modules:
//! * `motion`  - cursor movement
//! * `mode`    - Normal <-> Insert transitions and the exit chord
//! * `edit`    - text mutation (insert/newline/backspace)
//! * `command` - command line editing and execution, save and quit
//!
//! Handlers may leave the cursor unclamped; `Editor` reconciles the viewport
//! after every dispatch.

use crate::{Action, CommandShell};
use core_model::EditorModel;

mod command;
mod edit;
mod mode;
mod motion;

/// Result of dispatching a single `Action`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    pub dirty: bool,
    pub quit: bool,
}

impl DispatchResult {
    pub fn dirty() -> Self {
        Self {
            dirty: true,
            quit: false,
        }
    }
    pub fn clean() -> Self {
        Self {
            dirty: false,
            quit: false,
        }
    }
    pub fn quit() -> Self {
        Self {
            dirty: true,
            quit: true,
        }
    }
}

/// Apply an action. `dirty` tells whether anything visible changed, `quit`
/// whether the session should end.
pub fn dispatch(action: Action, model: &mut EditorModel, shell: &CommandShell) -> DispatchResult {
    let (state, cursor) = model.split_state_and_cursor();
    match action {
        Action::Motion(kind) => motion::handle_motion(kind, state, cursor),
        Action::ModeChange(mc) => mode::handle_mode_change(mc, state, cursor),
        Action::ChordExit { at, ch } => mode::handle_chord_exit(at, ch, state, cursor),
        Action::Edit(kind) => edit::handle_edit(kind, state, cursor),
        Action::CommandStart
        | Action::CommandChar(_)
        | Action::CommandBackspace
        | Action::CommandCancel
        | Action::CommandExecute
        | Action::Save
        | Action::Quit => command::handle_command_action(action, state, shell),
    }
}
