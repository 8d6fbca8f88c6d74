use crate::{Action, ChordSettings, CommandShell, DispatchResult, KeyTranslator, dispatch};
use core_events::KeyEvent;
use core_model::EditorModel;
use core_state::EditorState;
use core_text::{Buffer, Position};
use std::time::Instant;

/// The editing engine: model, key translator and command shell.
pub struct Editor {
    model: EditorModel,
    translator: KeyTranslator,
    shell: CommandShell,
    /// `modified` as it was before the pending chord char was typed.
    modified_before_chord: Option<bool>,
}

impl Editor {
    pub fn new(state: EditorState, window: (u16, u16), chord: ChordSettings) -> Self {
        Self {
            model: EditorModel::with_window(state, window),
            translator: KeyTranslator::new(chord),
            shell: CommandShell::new(),
            modified_before_chord: None,
        }
    }

    pub fn model(&self) -> &EditorModel {
        &self.model
    }
    pub fn model_mut(&mut self) -> &mut EditorModel {
        &mut self.model
    }
    pub fn state(&self) -> &EditorState {
        self.model.state()
    }
    pub fn cursor(&self) -> Position {
        self.model.cursor()
    }

    /// Register extra `:` commands.
    pub fn shell_mut(&mut self) -> &mut CommandShell {
        &mut self.shell
    }

    pub fn should_quit(&self) -> bool {
        self.model.state().quit_requested
    }

    /// Translate and apply one key received at `now`, then re-clamp the cursor
    /// and scroll it into view. A completed exit chord takes back its first
    /// char, so `modified` returns to what it was before that char.
    pub fn handle_key(&mut self, key: &KeyEvent, now: Instant) -> DispatchResult {
        let mode = self.model.state().mode;
        let was_modified = self.model.state().modified;
        let before_chord = self.modified_before_chord.take();
        let Some(action) = self
            .translator
            .translate(mode, key, self.model.cursor(), now)
        else {
            return DispatchResult::clean();
        };
        tracing::trace!(target: "actions", ?action, "dispatch");
        let result = dispatch(action, &mut self.model, &self.shell);
        if let (Action::ChordExit { .. }, Some(prev)) = (action, before_chord) {
            self.model.state_mut().modified = prev;
        }
        if self.translator.has_pending() {
            self.modified_before_chord = Some(was_modified);
        }
        self.model.reconcile();
        if result.dirty {
            self.model.state_mut().buffer.set_dirty(true);
        }
        result
    }

    /// Let an outside handler see an Insert-mode key first. It may edit the
    /// buffer and move the cursor; returning true consumes the key. Edits mark
    /// the document modified. A consumed key also drops a half-typed exit
    /// chord, the same as any other non-chord key.
    pub fn offer_key<F>(&mut self, handler: F) -> bool
    where
        F: FnOnce(&mut Buffer, &mut Position) -> bool,
    {
        let (state, cursor) = self.model.split_state_and_cursor();
        let was_dirty = state.buffer.is_dirty();
        state.buffer.set_dirty(false);
        let consumed = handler(&mut state.buffer, cursor);
        let edited = state.buffer.is_dirty();
        if edited {
            state.modified = true;
        }
        state.buffer.set_dirty(was_dirty || edited || consumed);
        if consumed {
            self.reset_pending_chord();
        }
        if consumed || edited {
            self.model.reconcile();
        }
        consumed
    }

    pub fn reset_pending_chord(&mut self) {
        self.translator.reset();
        self.modified_before_chord = None;
    }

    pub fn handle_resize(&mut self, cols: u16, rows: u16) {
        tracing::debug!(target: "actions", cols, rows, "resize");
        self.model.set_window(cols, rows);
    }
}
