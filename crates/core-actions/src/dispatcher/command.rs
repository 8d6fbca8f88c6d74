//! Command line editing and execution, plus the Normal-mode save and quit
//! keys which share the same effects.

use super::DispatchResult;
use crate::command_shell::{CommandShell, CommandTarget};
use crate::{Action, io_ops};
use core_state::{EditorState, Mode};

pub(crate) const CANCELLED_STATUS: &str = "Command cancelled";

impl CommandTarget for EditorState {
    fn request_save(&mut self) -> bool {
        io_ops::save_and_report(self)
    }
    fn request_quit(&mut self) {
        EditorState::request_quit(self);
    }
    fn set_status(&mut self, msg: String) {
        EditorState::set_status(self, msg);
    }
    fn file_name(&self) -> String {
        self.display_name()
    }
}

pub(crate) fn handle_command_action(
    action: Action,
    state: &mut EditorState,
    shell: &CommandShell,
) -> DispatchResult {
    match action {
        Action::CommandStart => {
            state.command_line.begin();
            state.set_mode(Mode::Command);
        }
        Action::CommandChar(ch) => state.command_line.push_char(ch),
        Action::CommandBackspace => {
            if state.command_line.backspace() {
                state.command_line.clear();
                state.set_mode(Mode::Normal);
            }
        }
        Action::CommandCancel => {
            state.command_line.clear();
            state.set_mode(Mode::Normal);
            state.set_status(CANCELLED_STATUS);
        }
        Action::CommandExecute => {
            let raw = state.command_line.buffer().to_string();
            let run = state.command_line.has_body();
            state.command_line.clear();
            state.set_mode(Mode::Normal);
            if run {
                shell.execute(&raw, state);
            }
        }
        Action::Save => {
            io_ops::save_and_report(state);
        }
        Action::Quit => state.request_quit(),
        other => {
            tracing::warn!(target: "actions.command", action = ?other, "non_command_action_ignored");
            return DispatchResult::clean();
        }
    }
    if state.quit_requested {
        DispatchResult::quit()
    } else {
        DispatchResult::dirty()
    }
}
