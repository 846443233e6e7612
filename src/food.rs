use rand::Rng;

use crate::config::{GridSize, FOOD_REWARD};
use crate::snake::{Position, Snake};

/// Food currently on the board.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub struct Food {
    pub position: Position,
}

impl Food {
    #[must_use]
    pub fn new(position: Position) -> Self {
        Self { position }
    }

    /// Returns the score value granted when eaten.
    #[must_use]
    pub fn points(self) -> u32 {
        FOOD_REWARD
    }

    /// Spawns food in a uniformly random free cell, or `None` when the
    /// snake covers the whole board.
    #[must_use]
    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, bounds: GridSize, snake: &Snake) -> Option<Self> {
        spawn_position(rng, bounds, snake).map(Self::new)
    }
}

/// Picks a free cell by rejection sampling.
///
/// Draws uniform cells until one is not under the snake. Returns `None`
/// up front when no free cell exists, since sampling would never finish.
#[must_use]
pub fn spawn_position<R: Rng + ?Sized>(
    rng: &mut R,
    bounds: GridSize,
    snake: &Snake,
) -> Option<Position> {
    if bounds.total_cells() == 0 || snake.len() >= bounds.total_cells() {
        return None;
    }

    loop {
        let candidate = Position {
            x: rng.gen_range(0..i32::from(bounds.width)),
            y: rng.gen_range(0..i32::from(bounds.height)),
        };
        if !snake.occupies(candidate) {
            return Some(candidate);
        }
    }
}
