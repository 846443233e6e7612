use std::collections::VecDeque;

use crate::config::GridSize;
use crate::input::{direction_change_is_valid, Direction};

/// Grid position in logical cell coordinates.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

impl Position {
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Returns true when the position lies inside the bounds.
    #[must_use]
    pub fn is_within_bounds(self, bounds: GridSize) -> bool {
        self.x >= 0
            && self.y >= 0
            && self.x < i32::from(bounds.width)
            && self.y < i32::from(bounds.height)
    }

    /// Returns the neighbouring cell one unit away in `direction`.
    #[must_use]
    pub fn step(self, direction: Direction) -> Self {
        let (dx, dy) = direction.delta();
        Self {
            x: self.x + dx,
            y: self.y + dy,
        }
    }
}

/// Snake body plus its applied and pending headings.
#[derive(Debug, Clone)]
pub struct Snake {
    body: VecDeque<Position>,
    direction: Direction,
    pending_direction: Direction,
}

impl Snake {
    /// Creates a straight snake of `len` cells with its head at `head`,
    /// body trailing away from `direction`.
    #[must_use]
    pub fn new(head: Position, direction: Direction, len: usize) -> Self {
        debug_assert!(len > 0);

        let trailing = direction.opposite();
        let body = std::iter::successors(Some(head), |segment| Some(segment.step(trailing)))
            .take(len.max(1))
            .collect();

        Self {
            body,
            direction,
            pending_direction: direction,
        }
    }

    /// Creates a snake from explicit body segments (front is head).
    #[must_use]
    pub fn from_segments(segments: Vec<Position>, direction: Direction) -> Self {
        debug_assert!(!segments.is_empty());

        Self {
            body: VecDeque::from(segments),
            direction,
            pending_direction: direction,
        }
    }

    /// Records the heading for the next tick.
    ///
    /// Reversals are judged against the last *applied* direction, so two
    /// quick turns before a tick can never queue a 180°. Returns whether
    /// the intent was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        if !direction_change_is_valid(self.direction, direction) {
            return false;
        }

        self.pending_direction = direction;
        true
    }

    /// Makes the pending direction the applied one.
    pub fn promote_direction(&mut self) {
        self.direction = self.pending_direction;
    }

    /// Returns the head position one step along the applied direction.
    #[must_use]
    pub fn next_head_position(&self) -> Position {
        self.head().step(self.direction)
    }

    /// Returns true if `position` hits the body, ignoring the tail cell
    /// which moves away on the same tick.
    #[must_use]
    pub fn collides_with_body(&self, position: Position) -> bool {
        let vacating = self.body.len().saturating_sub(1);
        self.body
            .iter()
            .take(vacating)
            .any(|segment| *segment == position)
    }

    /// Pushes `head` to the front and drops the tail unless growing.
    pub fn advance(&mut self, head: Position, grow: bool) {
        self.body.push_front(head);
        if !grow {
            let _ = self.body.pop_back();
        }
    }

    /// Returns the current head position.
    #[must_use]
    pub fn head(&self) -> Position {
        *self
            .body
            .front()
            .expect("snake body must always contain at least one segment")
    }

    #[must_use]
    pub fn tail(&self) -> Position {
        *self
            .body
            .back()
            .expect("snake body must always contain at least one segment")
    }

    /// Returns true if any segment occupies `position`.
    #[must_use]
    pub fn occupies(&self, position: Position) -> bool {
        self.body.contains(&position)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.body.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    /// Returns the direction applied on the last tick.
    #[must_use]
    pub fn direction(&self) -> Direction {
        self.direction
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.pending_direction
    }

    /// Iterates over body segments from head to tail.
    pub fn segments(&self) -> impl Iterator<Item = &Position> {
        self.body.iter()
    }
}
