#![allow(dead_code)]

use core_actions::{ChordSettings, Editor};
use core_events::{KeyCode, KeyEvent};
use core_state::EditorState;
use core_text::{Buffer, Position};
use std::time::{Duration, Instant};

pub fn editor(lines: &[&str], cursor: Position) -> Editor {
    let state = EditorState::new(Buffer::from_lines(lines.iter().copied()));
    let mut ed = Editor::new(state, (80, 24), ChordSettings::default());
    ed.model_mut().set_cursor(cursor);
    ed.model_mut().reconcile();
    ed
}

pub fn lines(ed: &Editor) -> Vec<String> {
    ed.state().buffer.lines().collect()
}

/// Feed keys one second apart so no exit chord fires.
pub fn feed(ed: &mut Editor, keys: &[KeyEvent]) {
    let mut now = Instant::now();
    for k in keys {
        ed.handle_key(k, now);
        now += Duration::from_secs(1);
    }
}

pub fn typed(s: &str) -> Vec<KeyEvent> {
    s.chars().map(KeyEvent::ch).collect()
}

pub fn key(code: KeyCode) -> KeyEvent {
    KeyEvent::plain(code)
}
