//! The five inputs the engine cares about.

use std::fmt;

/// One of the four directional navigation signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// All four directions.
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Whether this direction moves along a row (left/right).
    pub fn is_horizontal(self) -> bool {
        matches!(self, Direction::Left | Direction::Right)
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        };
        f.write_str(name)
    }
}

/// A relevant input after filtering raw events.
///
/// `Activate` is the select/enter signal. The engine never intercepts it so
/// the focused node's own behavior fires unmodified.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NavInput {
    Move(Direction),
    Activate,
}

impl From<Direction> for NavInput {
    fn from(direction: Direction) -> Self {
        NavInput::Move(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn horizontal_directions() {
        assert!(Direction::Left.is_horizontal());
        assert!(Direction::Right.is_horizontal());
        assert!(!Direction::Up.is_horizontal());
        assert!(!Direction::Down.is_horizontal());
    }

    #[test]
    fn direction_converts_to_move() {
        assert_eq!(NavInput::from(Direction::Up), NavInput::Move(Direction::Up));
    }
}
