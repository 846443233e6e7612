use std::io;
use std::time::Duration;

use crossterm::event::{
    self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers, MouseButton, MouseEvent,
    MouseEventKind,
};

use crate::config::CELL_COLUMNS;

/// Canonical movement directions for snake input.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Returns the opposite direction.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Up => Self::Down,
            Self::Down => Self::Up,
            Self::Left => Self::Right,
            Self::Right => Self::Left,
        }
    }

    /// Returns the `(dx, dy)` unit step for this direction. Screen y grows downward.
    #[must_use]
    pub fn delta(self) -> (i32, i32) {
        match self {
            Self::Up => (0, -1),
            Self::Down => (0, 1),
            Self::Left => (-1, 0),
            Self::Right => (1, 0),
        }
    }
}

/// High-level input events consumed by the session loop.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameInput {
    Direction(Direction),
    Restart,
    Quit,
}

/// Returns whether a direction change is legal (no immediate 180° turns).
#[must_use]
pub fn direction_change_is_valid(current: Direction, next: Direction) -> bool {
    next != current.opposite()
}

/// Maps a key press to a game input. Arrows and WASD steer.
#[must_use]
pub fn map_key(key: KeyEvent) -> Option<GameInput> {
    if key.kind != KeyEventKind::Press {
        return None;
    }

    if key.modifiers.contains(KeyModifiers::CONTROL) {
        return match key.code {
            KeyCode::Char('c' | 'C') => Some(GameInput::Quit),
            _ => None,
        };
    }

    match key.code {
        KeyCode::Up => Some(GameInput::Direction(Direction::Up)),
        KeyCode::Down => Some(GameInput::Direction(Direction::Down)),
        KeyCode::Left => Some(GameInput::Direction(Direction::Left)),
        KeyCode::Right => Some(GameInput::Direction(Direction::Right)),
        KeyCode::Char(c) => match c.to_ascii_lowercase() {
            'w' => Some(GameInput::Direction(Direction::Up)),
            's' => Some(GameInput::Direction(Direction::Down)),
            'a' => Some(GameInput::Direction(Direction::Left)),
            'd' => Some(GameInput::Direction(Direction::Right)),
            'r' | ' ' => Some(GameInput::Restart),
            'q' => Some(GameInput::Quit),
            _ => None,
        },
        KeyCode::Enter => Some(GameInput::Restart),
        KeyCode::Esc => Some(GameInput::Quit),
        _ => None,
    }
}

/// A completed swipe gesture, in screen coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Swipe {
    pub start: (i32, i32),
    pub end: (i32, i32),
}

impl Swipe {
    /// Maps the swipe to its dominant-axis direction.
    ///
    /// Horizontal wins only when `|dx| > |dy|`; ties go vertical. A swipe
    /// that did not move yields `None`.
    #[must_use]
    pub fn direction(self) -> Option<Direction> {
        let dx = self.end.0 - self.start.0;
        let dy = self.end.1 - self.start.1;

        if dx.abs() > dy.abs() {
            Some(if dx > 0 { Direction::Right } else { Direction::Left })
        } else if dy > 0 {
            Some(Direction::Down)
        } else if dy < 0 {
            Some(Direction::Up)
        } else {
            None
        }
    }
}

/// Polls the terminal for key presses and mouse-drag swipes.
#[derive(Debug, Default)]
pub struct InputHandler {
    swipe_start: Option<(i32, i32)>,
}

impl InputHandler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Waits up to `timeout` for one event and maps it to a game input.
    pub fn poll_input(&mut self, timeout: Duration) -> io::Result<Option<GameInput>> {
        if !event::poll(timeout)? {
            return Ok(None);
        }

        Ok(match event::read()? {
            Event::Key(key) => map_key(key),
            Event::Mouse(mouse) => self.handle_mouse(mouse),
            _ => None,
        })
    }

    /// Tracks left-button drags. Rows are scaled by the cell width in
    /// columns so the dominant axis is judged in board cells.
    fn handle_mouse(&mut self, mouse: MouseEvent) -> Option<GameInput> {
        let point = (
            i32::from(mouse.column),
            i32::from(mouse.row) * i32::from(CELL_COLUMNS),
        );
        match mouse.kind {
            MouseEventKind::Down(MouseButton::Left) => {
                self.swipe_start = Some(point);
                None
            }
            MouseEventKind::Up(MouseButton::Left) => {
                let start = self.swipe_start.take()?;
                Swipe { start, end: point }
                    .direction()
                    .map(GameInput::Direction)
            }
            _ => None,
        }
    }
}
