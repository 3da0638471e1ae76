//! Discrete action space and the dispatcher that routes actions to the
//! simulator.

use lattice::{ActionReturn, Direction, Simulator};

use crate::EnvError;

/// Action names in id order.
pub const ACTION_NAMES: [&str; 7] = [
    "right",
    "down",
    "left",
    "up",
    "lower_next",
    "upper_next",
    "metropolis",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    Right = 0,
    Down = 1,
    Left = 2,
    Up = 3,
    LowerNext = 4,
    UpperNext = 5,
    Metropolis = 6,
}

impl Action {
    pub const ALL: [Action; 7] = [
        Action::Right,
        Action::Down,
        Action::Left,
        Action::Up,
        Action::LowerNext,
        Action::UpperNext,
        Action::Metropolis,
    ];

    /// # Errors
    ///
    /// Returns [`EnvError::InvalidAction`] for ids outside `0..=6`.
    pub fn from_id(id: i64) -> Result<Self, EnvError> {
        usize::try_from(id)
            .ok()
            .and_then(|i| Self::ALL.get(i).copied())
            .ok_or(EnvError::InvalidAction(id))
    }

    /// # Errors
    ///
    /// Returns [`EnvError::UnknownActionName`] for names not in [`ACTION_NAMES`].
    pub fn from_name(name: &str) -> Result<Self, EnvError> {
        ACTION_NAMES
            .iter()
            .position(|&n| n == name)
            .map(|i| Self::ALL[i])
            .ok_or_else(|| EnvError::UnknownActionName(name.to_string()))
    }

    #[must_use]
    pub const fn id(self) -> usize {
        self as usize
    }

    #[must_use]
    pub const fn name(self) -> &'static str {
        ACTION_NAMES[self as usize]
    }

    /// The loop-building move behind this action, `None` for the proposal.
    #[must_use]
    pub const fn direction(self) -> Option<Direction> {
        match self {
            Action::Right => Some(Direction::Right),
            Action::Down => Some(Direction::Down),
            Action::Left => Some(Direction::Left),
            Action::Up => Some(Direction::Up),
            Action::LowerNext => Some(Direction::LowerNext),
            Action::UpperNext => Some(Direction::UpperNext),
            Action::Metropolis => None,
        }
    }
}

impl From<Direction> for Action {
    fn from(direction: Direction) -> Self {
        Self::ALL[direction.index()]
    }
}

/// Declared discrete action space.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActionSpace {
    pub n: usize,
}

impl Default for ActionSpace {
    fn default() -> Self {
        Self { n: Action::ALL.len() }
    }
}

impl ActionSpace {
    #[must_use]
    pub fn contains(&self, id: i64) -> bool {
        usize::try_from(id).is_ok_and(|i| i < self.n)
    }
}

/// Outcome of routing one action to the simulator.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dispatched {
    pub returns: ActionReturn,
    pub metropolis_executed: bool,
}

/// Sends `action` to the simulator.
///
/// A loop-building action becomes a single `draw`. The proposal first
/// finalizes the built trajectory, then runs the Metropolis test.
pub fn dispatch<S: Simulator + ?Sized>(sim: &mut S, action: Action) -> Dispatched {
    match action.direction() {
        Some(direction) => Dispatched {
            returns: sim.draw(direction),
            metropolis_executed: false,
        },
        None => {
            sim.flip_trajectory();
            Dispatched {
                returns: sim.metropolis(),
                metropolis_executed: true,
            }
        }
    }
}
