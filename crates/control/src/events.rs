//! Input-event sources for the manual control loop.

use std::collections::VecDeque;
use std::io::BufRead;

use crate::ControlError;

/// Line read by [`LineEvents`] as a window close request.
pub const QUIT_LINE: &str = "quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputEvent {
    /// A key was pressed; carries the key's name, e.g. `"up"` or `"left shift"`.
    KeyDown(String),
    /// The user asked to close the window.
    CloseRequested,
}

impl InputEvent {
    #[must_use]
    pub fn key(name: impl Into<String>) -> Self {
        InputEvent::KeyDown(name.into())
    }
}

/// Blocking source of discrete input events.
pub trait EventSource {
    /// Wait for the next event.
    ///
    /// Returns `Ok(None)` once the source is exhausted and will never produce
    /// another event.
    fn next_event(&mut self) -> Result<Option<InputEvent>, ControlError>;
}

impl<S: EventSource + ?Sized> EventSource for &mut S {
    fn next_event(&mut self) -> Result<Option<InputEvent>, ControlError> {
        (**self).next_event()
    }
}

/// Pre-recorded events, replayed in order.
#[derive(Debug, Default, Clone)]
pub struct ScriptedEvents {
    queue: VecDeque<InputEvent>,
}

impl ScriptedEvents {
    #[must_use]
    pub fn new(events: impl IntoIterator<Item = InputEvent>) -> Self {
        Self { queue: events.into_iter().collect() }
    }

    /// Key presses only, e.g. `ScriptedEvents::keys(["up", "left"])`.
    #[must_use]
    pub fn keys<I, K>(keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: Into<String>,
    {
        Self::new(keys.into_iter().map(InputEvent::key))
    }

    #[must_use]
    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl EventSource for ScriptedEvents {
    fn next_event(&mut self) -> Result<Option<InputEvent>, ControlError> {
        Ok(self.queue.pop_front())
    }
}

/// One key name per line, for terminals and piped input.
pub struct LineEvents<R> {
    reader: R,
    line: String,
}

impl<R: BufRead> LineEvents<R> {
    pub fn new(reader: R) -> Self {
        Self { reader, line: String::new() }
    }
}

impl<R: BufRead> EventSource for LineEvents<R> {
    fn next_event(&mut self) -> Result<Option<InputEvent>, ControlError> {
        loop {
            self.line.clear();
            if self.reader.read_line(&mut self.line)? == 0 {
                return Ok(None);
            }
            let key = self.line.trim();
            if key.is_empty() {
                continue;
            }
            if key == QUIT_LINE {
                return Ok(Some(InputEvent::CloseRequested));
            }
            return Ok(Some(InputEvent::key(key)));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_events_skip_blank_lines_and_trim() {
        let input = "up\n\n  left shift  \nquit\n";
        let mut events = LineEvents::new(input.as_bytes());
        assert_eq!(events.next_event().unwrap(), Some(InputEvent::key("up")));
        assert_eq!(events.next_event().unwrap(), Some(InputEvent::key("left shift")));
        assert_eq!(events.next_event().unwrap(), Some(InputEvent::CloseRequested));
        assert_eq!(events.next_event().unwrap(), None);
    }

    #[test]
    fn scripted_events_drain_in_order() {
        let mut events = ScriptedEvents::keys(["a", "b"]);
        assert_eq!(events.remaining(), 2);
        assert_eq!(events.next_event().unwrap(), Some(InputEvent::key("a")));
        assert_eq!(events.next_event().unwrap(), Some(InputEvent::key("b")));
        assert_eq!(events.next_event().unwrap(), None);
    }
}
