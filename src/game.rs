use rand::rngs::StdRng;
use rand::SeedableRng;

use crate::config::{GridSize, INITIAL_SNAKE_LEN};
use crate::food::Food;
use crate::input::Direction;
use crate::snake::{Position, Snake};

/// Current high-level gameplay state.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum GameStatus {
    Running,
    GameOver,
}

/// Why a session ended.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum DeathReason {
    Wall,
    SelfCollision,
    /// The snake filled every cell, leaving nowhere to place food.
    BoardFull,
}

/// What a single call to [`GameState::tick`] did.
#[derive(Debug, Clone, Copy, Eq, PartialEq)]
pub enum TickOutcome {
    /// The state was already terminal; nothing changed.
    Idle,
    Moved,
    Ate,
    Collided(DeathReason),
}

/// Complete mutable game state for one session.
#[derive(Debug, Clone)]
pub struct GameState {
    pub snake: Snake,
    pub food: Food,
    pub score: u32,
    pub tick_count: u64,
    pub status: GameStatus,
    pub death_reason: Option<DeathReason>,
    grid: GridSize,
    rng: StdRng,
}

impl GameState {
    /// Creates a fresh state seeded from OS entropy.
    #[must_use]
    pub fn new(grid: GridSize) -> Self {
        Self::with_rng(grid, StdRng::from_entropy())
    }

    /// Creates a deterministic state for tests and reproducible simulations.
    #[must_use]
    pub fn new_with_seed(grid: GridSize, seed: u64) -> Self {
        Self::with_rng(grid, StdRng::seed_from_u64(seed))
    }

    fn with_rng(grid: GridSize, rng: StdRng) -> Self {
        let snake = starting_snake(grid);
        let mut state = Self {
            food: Food::new(snake.head()),
            snake,
            score: 0,
            tick_count: 0,
            status: GameStatus::Running,
            death_reason: None,
            grid,
            rng,
        };
        state.reset(grid);
        state
    }

    /// Restores a fresh session on a `grid` board: centered 3-cell snake
    /// heading right, score 0, new food, not terminal. The RNG carries over.
    pub fn reset(&mut self, grid: GridSize) {
        self.grid = grid;
        self.snake = starting_snake(grid);
        self.score = 0;
        self.tick_count = 0;
        self.status = GameStatus::Running;
        self.death_reason = None;

        match Food::spawn(&mut self.rng, grid, &self.snake) {
            Some(food) => self.food = food,
            None => {
                self.finish(DeathReason::BoardFull);
            }
        }
    }

    /// Records the direction to apply on the next tick.
    ///
    /// Ignored when it reverses the last applied direction. Returns whether
    /// the intent was accepted.
    pub fn set_pending_direction(&mut self, direction: Direction) -> bool {
        self.snake.set_pending_direction(direction)
    }

    /// Advances simulation by one gameplay tick.
    pub fn tick(&mut self) -> TickOutcome {
        if self.is_terminal() {
            return TickOutcome::Idle;
        }

        self.snake.promote_direction();
        let head = self.snake.next_head_position();

        if !head.is_within_bounds(self.grid) {
            return self.finish(DeathReason::Wall);
        }

        if self.snake.collides_with_body(head) {
            return self.finish(DeathReason::SelfCollision);
        }

        self.tick_count += 1;
        let ate = head == self.food.position;
        self.snake.advance(head, ate);
        if !ate {
            return TickOutcome::Moved;
        }

        self.score += self.food.points();
        match Food::spawn(&mut self.rng, self.grid, &self.snake) {
            Some(food) => {
                self.food = food;
                TickOutcome::Ate
            }
            None => self.finish(DeathReason::BoardFull),
        }
    }

    fn finish(&mut self, reason: DeathReason) -> TickOutcome {
        self.status = GameStatus::GameOver;
        self.death_reason = Some(reason);
        TickOutcome::Collided(reason)
    }

    #[must_use]
    pub fn is_terminal(&self) -> bool {
        self.status == GameStatus::GameOver
    }

    #[must_use]
    pub fn grid(&self) -> GridSize {
        self.grid
    }

    #[must_use]
    pub fn direction(&self) -> Direction {
        self.snake.direction()
    }

    #[must_use]
    pub fn pending_direction(&self) -> Direction {
        self.snake.pending_direction()
    }
}

fn starting_snake(grid: GridSize) -> Snake {
    let head = Position {
        x: i32::from(grid.width / 2),
        y: i32::from(grid.height / 2),
    };
    Snake::new(head, Direction::Right, INITIAL_SNAKE_LEN)
}

#[cfg(test)]
mod tests {
    use crate::config::GridSize;
    use crate::food::Food;
    use crate::input::Direction;

    use super::{DeathReason, GameState, GameStatus, TickOutcome};
    use crate::snake::{Position, Snake};

    fn grid(width: u16, height: u16) -> GridSize {
        GridSize { width, height }
    }

    #[test]
    fn reset_centers_three_cell_snake_facing_right() {
        let state = GameState::new_with_seed(grid(20, 20), 1);

        let segments: Vec<_> = state.snake.segments().copied().collect();
        assert_eq!(
            segments,
            vec![
                Position::new(10, 10),
                Position::new(9, 10),
                Position::new(8, 10)
            ]
        );
        assert_eq!(state.direction(), Direction::Right);
        assert_eq!(state.pending_direction(), Direction::Right);
        assert_eq!(state.score, 0);
        assert!(!state.is_terminal());
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn snake_grows_after_eating_food() {
        let mut state = GameState::new_with_seed(grid(10, 10), 1);
        state.snake = Snake::new(Position::new(2, 1), Direction::Right, 2);
        state.food = Food::new(Position::new(3, 1));

        assert_eq!(state.tick(), TickOutcome::Ate);
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.snake.tail(), Position::new(1, 1));
        assert!(!state.snake.occupies(state.food.position));
    }

    #[test]
    fn ordinary_move_drops_tail() {
        let mut state = GameState::new_with_seed(grid(10, 10), 2);
        state.snake = Snake::new(Position::new(4, 4), Direction::Right, 3);
        state.food = Food::new(Position::new(0, 9));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(5, 4));
        assert_eq!(state.snake.tail(), Position::new(3, 4));
        assert_eq!(state.snake.len(), 3);
        assert_eq!(state.score, 0);
    }

    #[test]
    fn snake_collision_with_wall_sets_game_over() {
        let mut state = GameState::new_with_seed(grid(4, 4), 2);
        state.snake = Snake::new(Position::new(3, 1), Direction::Right, 2);
        let food = state.food;

        assert_eq!(state.tick(), TickOutcome::Collided(DeathReason::Wall));
        assert_eq!(state.status, GameStatus::GameOver);
        assert_eq!(state.snake.head(), Position::new(3, 1));
        assert_eq!(state.snake.len(), 2);
        assert_eq!(state.food, food);
        assert_eq!(state.score, 0);
        assert_eq!(state.tick_count, 0);
    }

    #[test]
    fn snake_collision_with_self_sets_game_over() {
        let mut state = GameState::new_with_seed(grid(10, 10), 3);
        state.snake = Snake::from_segments(
            vec![
                Position::new(5, 5),
                Position::new(5, 4),
                Position::new(6, 4),
                Position::new(6, 5),
                Position::new(6, 6),
            ],
            Direction::Down,
        );
        state.food = Food::new(Position::new(0, 0));

        assert!(state.set_pending_direction(Direction::Right));

        assert_eq!(
            state.tick(),
            TickOutcome::Collided(DeathReason::SelfCollision)
        );
        assert!(state.is_terminal());
        assert_eq!(state.snake.head(), Position::new(5, 5));
    }

    #[test]
    fn moving_into_vacated_tail_cell_is_safe() {
        let mut state = GameState::new_with_seed(grid(6, 6), 4);
        state.snake = Snake::from_segments(
            vec![
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
            ],
            Direction::Down,
        );
        state.food = Food::new(Position::new(5, 5));

        assert_eq!(state.tick(), TickOutcome::Moved);
        assert_eq!(state.snake.head(), Position::new(1, 2));
        assert_eq!(state.snake.len(), 4);
    }

    #[test]
    fn terminal_state_ignores_ticks_until_reset() {
        let mut state = GameState::new_with_seed(grid(4, 4), 5);
        state.snake = Snake::new(Position::new(0, 1), Direction::Left, 1);

        state.tick();
        let tick_count = state.tick_count;
        assert_eq!(state.tick(), TickOutcome::Idle);
        assert_eq!(state.tick_count, tick_count);

        state.reset(grid(8, 8));
        assert_eq!(state.status, GameStatus::Running);
        assert_eq!(state.death_reason, None);
        assert_eq!(state.snake.head(), Position::new(4, 4));
        assert_eq!(state.grid(), grid(8, 8));
    }

    #[test]
    fn score_increments_by_reward_when_food_is_eaten() {
        let mut state = GameState::new_with_seed(grid(10, 10), 6);
        state.snake = Snake::new(Position::new(5, 5), Direction::Right, 3);
        state.food = Food::new(Position::new(6, 5));

        state.tick();

        assert_eq!(state.score, 10);
    }

    #[test]
    fn filling_the_board_ends_the_game() {
        let mut state = GameState::new_with_seed(grid(3, 3), 7);
        state.snake = Snake::from_segments(
            vec![
                Position::new(1, 0),
                Position::new(2, 0),
                Position::new(2, 1),
                Position::new(2, 2),
                Position::new(1, 2),
                Position::new(0, 2),
                Position::new(0, 1),
                Position::new(1, 1),
            ],
            Direction::Left,
        );
        state.food = Food::new(Position::new(0, 0));

        assert_eq!(
            state.tick(),
            TickOutcome::Collided(DeathReason::BoardFull)
        );
        assert_eq!(state.snake.len(), 9);
        assert_eq!(state.score, 10);
    }
}
