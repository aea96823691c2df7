use std::fmt;

/// Discrete actions understood by [`crate::Env::step`].
///
/// Discriminants follow the MiniGrid action indices so that an action space of
/// size `n` is always the first `n` variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Turn left.
    Left = 0,
    /// Turn right.
    Right = 1,
    /// Move one cell forward.
    Forward = 2,
    /// Pick up the object in front of the agent.
    Pickup = 3,
    /// Drop the carried object in front of the agent.
    Drop = 4,
    /// Open, close or unlock the door in front of the agent.
    Toggle = 5,
    /// Declare the task done.
    Done = 6,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Left,
        Action::Right,
        Action::Forward,
        Action::Pickup,
        Action::Drop,
        Action::Toggle,
        Action::Done,
    ];

    #[must_use]
    pub const fn index(self) -> usize {
        self as usize
    }

    #[must_use]
    pub fn from_index(index: usize) -> Option<Self> {
        Self::ALL.get(index).copied()
    }

    /// Uniformly samples one of the first `count` actions.
    ///
    /// `count` is clamped to `1..=Action::ALL.len()`.
    pub fn sample(rng: &mut fastrand::Rng, count: usize) -> Self {
        let count = count.clamp(1, Self::ALL.len());
        Self::ALL[rng.usize(..count)]
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Action::Left => "left",
            Action::Right => "right",
            Action::Forward => "forward",
            Action::Pickup => "pickup",
            Action::Drop => "drop",
            Action::Toggle => "toggle",
            Action::Done => "done",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn indices_match_positions() {
        for (i, action) in Action::ALL.iter().enumerate() {
            assert_eq!(action.index(), i);
            assert_eq!(Action::from_index(i), Some(*action));
        }
        assert_eq!(Action::from_index(7), None);
    }

    #[test]
    fn sample_stays_inside_restricted_space() {
        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..200 {
            let a = Action::sample(&mut rng, 3);
            assert!(a.index() < 3, "sampled {a} outside the first three actions");
        }
    }
}
