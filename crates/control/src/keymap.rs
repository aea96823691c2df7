//! Static key bindings for manual control.

use gridworld::Action;

/// Key that closes the environment and ends the session.
pub const SHUTDOWN_KEY: &str = "escape";
/// Key that starts a new, unseeded episode.
pub const RESET_KEY: &str = "backspace";

/// Key names (as reported by the input source) bound to environment actions.
pub const KEY_TO_ACTION: [(&str, Action); 9] = [
    ("left", Action::Left),
    ("right", Action::Right),
    ("up", Action::Forward),
    ("1", Action::Toggle),
    ("2", Action::Pickup),
    ("3", Action::Drop),
    ("tab", Action::Pickup),
    ("left shift", Action::Drop),
    ("enter", Action::Done),
];

/// What a key press asks the control loop to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Shutdown,
    Reset,
    Act(Action),
}

#[must_use]
pub fn action_for(key: &str) -> Option<Action> {
    KEY_TO_ACTION
        .iter()
        .find(|(name, _)| *name == key)
        .map(|(_, action)| *action)
}

/// Resolves a key name; `None` for keys with no binding.
#[must_use]
pub fn command_for(key: &str) -> Option<Command> {
    match key {
        SHUTDOWN_KEY => Some(Command::Shutdown),
        RESET_KEY => Some(Command::Reset),
        other => action_for(other).map(Command::Act),
    }
}

/// Human-readable binding list, one `(key, description)` pair per entry.
pub fn bindings() -> impl Iterator<Item = (&'static str, String)> {
    [
        (SHUTDOWN_KEY, "close environment".to_string()),
        (RESET_KEY, "reset episode".to_string()),
    ]
    .into_iter()
    .chain(KEY_TO_ACTION.iter().map(|(key, action)| (*key, action.to_string())))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn control_keys_take_precedence() {
        assert_eq!(command_for("escape"), Some(Command::Shutdown));
        assert_eq!(command_for("backspace"), Some(Command::Reset));
        assert_eq!(command_for("up"), Some(Command::Act(Action::Forward)));
        assert_eq!(command_for("left shift"), Some(Command::Act(Action::Drop)));
        assert_eq!(command_for("space"), None);
        assert_eq!(command_for("UP"), None);
    }

    #[test]
    fn table_has_unique_keys() {
        for (i, (a, _)) in KEY_TO_ACTION.iter().enumerate() {
            assert!(KEY_TO_ACTION[i + 1..].iter().all(|(b, _)| a != b), "{a} bound twice");
            assert_ne!(*a, SHUTDOWN_KEY);
            assert_ne!(*a, RESET_KEY);
        }
        assert_eq!(bindings().count(), 11);
    }
}
