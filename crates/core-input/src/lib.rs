//! Input polling.
//!
//! The editor loop is single-threaded: each iteration waits at most one poll
//! interval for input and gets `Ok(None)` back on timeout, which is what lets
//! it redraw after a resize even when no key arrives. Multi-byte escape
//! sequences (arrow keys vs a lone Esc) are disambiguated by crossterm's
//! parser before anything reaches the editor.

mod key_token;

use anyhow::Result;
use core_events::InputEvent;
use std::collections::VecDeque;
use std::time::Duration;

/// Source of input events for the run loop.
pub trait InputSource {
    /// Wait up to `timeout` for the next event. `Ok(None)` means nothing the
    /// editor cares about arrived in time.
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>>;
}

/// Reads the real terminal through crossterm.
#[derive(Debug, Default)]
pub struct CrosstermInput;

impl CrosstermInput {
    pub fn new() -> Self {
        Self
    }
}

impl InputSource for CrosstermInput {
    fn poll_event(&mut self, timeout: Duration) -> Result<Option<InputEvent>> {
        if !crossterm::event::poll(timeout)? {
            return Ok(None);
        }
        let raw = crossterm::event::read()?;
        let mapped = key_token::map_event(&raw);
        if mapped.is_none() {
            tracing::trace!(target: "input", "event_ignored");
        }
        Ok(mapped)
    }
}

/// Replays a fixed queue of events; `Ok(None)` once drained.
#[derive(Debug, Default)]
pub struct ScriptedInput {
    events: VecDeque<InputEvent>,
}

impl ScriptedInput {
    pub fn new<I: IntoIterator<Item = InputEvent>>(events: I) -> Self {
        Self {
            events: events.into_iter().collect(),
        }
    }

    pub fn push(&mut self, event: InputEvent) {
        self.events.push_back(event);
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl InputSource for ScriptedInput {
    fn poll_event(&mut self, _timeout: Duration) -> Result<Option<InputEvent>> {
        Ok(self.events.pop_front())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyEvent;

    #[test]
    fn scripted_input_drains_in_order() {
        let mut src = ScriptedInput::new([
            InputEvent::Key(KeyEvent::ch('a')),
            InputEvent::Resize(20, 5),
        ]);
        let t = Duration::from_millis(1);
        assert_eq!(
            src.poll_event(t).unwrap(),
            Some(InputEvent::Key(KeyEvent::ch('a')))
        );
        assert_eq!(src.poll_event(t).unwrap(), Some(InputEvent::Resize(20, 5)));
        assert_eq!(src.poll_event(t).unwrap(), None);
        assert!(src.is_empty());
    }
}
