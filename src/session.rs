use std::time::{Duration, Instant};

use tracing::{debug, info, trace};

use crate::config::Config;
use crate::game::{GameState, TickOutcome};
use crate::input::{Direction, GameInput};

/// Fixed-interval tick timer driven by the caller's clock.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    next_due: Option<Instant>,
}

impl Ticker {
    /// Creates a stopped ticker.
    #[must_use]
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            next_due: None,
        }
    }

    /// Arms the ticker so the first firing lands one interval after `now`.
    pub fn start(&mut self, now: Instant) {
        self.next_due = Some(now + self.interval);
    }

    pub fn stop(&mut self) {
        self.next_due = None;
    }

    #[must_use]
    pub fn is_running(&self) -> bool {
        self.next_due.is_some()
    }

    /// Returns true at most once per elapsed interval.
    ///
    /// The schedule advances from the previous deadline so a slow frame
    /// doesn't drift the cadence; after a long stall it resyncs to `now`
    /// instead of firing a burst of catch-up ticks.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(due) = self.next_due else {
            return false;
        };
        if now < due {
            return false;
        }

        let next = due + self.interval;
        self.next_due = Some(if next <= now { now + self.interval } else { next });
        true
    }

    /// Time left until the next firing, if running.
    #[must_use]
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due.map(|due| due.saturating_duration_since(now))
    }
}

/// One playable session: the game state plus the timer that drives it.
#[derive(Debug)]
pub struct Session {
    state: GameState,
    ticker: Ticker,
    config: Config,
}

impl Session {
    /// Creates a session and starts its ticker at `now`.
    #[must_use]
    pub fn new(config: Config, now: Instant) -> Self {
        let state = fresh_state(&config);
        let mut ticker = Ticker::new(config.tick_interval());
        ticker.start(now);

        info!(
            width = config.grid.width,
            height = config.grid.height,
            tick_ms = config.tick_interval_ms,
            seed = ?config.seed,
            "session started"
        );

        Self {
            state,
            ticker,
            config,
        }
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    #[must_use]
    pub fn ticker(&self) -> &Ticker {
        &self.ticker
    }

    /// Applies one input. Returns `false` when the player asked to quit.
    pub fn handle_input(&mut self, input: GameInput, now: Instant) -> bool {
        match input {
            GameInput::Quit => {
                info!(score = self.state.score, "player quit");
                return false;
            }
            GameInput::Direction(direction) => self.steer(direction),
            GameInput::Restart if self.state.is_terminal() => self.restart(now),
            GameInput::Restart => {}
        }
        true
    }

    fn steer(&mut self, direction: Direction) {
        if self.state.is_terminal() {
            return;
        }

        if !self.state.set_pending_direction(direction) {
            debug!(
                ?direction,
                current = ?self.state.direction(),
                "reversal rejected"
            );
        }
    }

    /// Fires a tick when the timer is due. Stops the timer on game over.
    pub fn update(&mut self, now: Instant) -> Option<TickOutcome> {
        if !self.ticker.poll(now) {
            return None;
        }

        let outcome = self.state.tick();
        trace!(tick = self.state.tick_count, ?outcome, "tick");

        match outcome {
            TickOutcome::Ate => {
                debug!(
                    score = self.state.score,
                    length = self.state.snake.len(),
                    "food eaten"
                );
            }
            TickOutcome::Collided(reason) => {
                self.ticker.stop();
                info!(
                    score = self.state.score,
                    length = self.state.snake.len(),
                    ?reason,
                    "game over"
                );
            }
            TickOutcome::Moved | TickOutcome::Idle => {}
        }

        Some(outcome)
    }

    /// Discards the old state and timer and begins a fresh game.
    ///
    /// A seeded config replays the same food sequence on every restart.
    pub fn restart(&mut self, now: Instant) {
        self.ticker.stop();
        match self.config.seed {
            Some(_) => self.state = fresh_state(&self.config),
            None => self.state.reset(self.config.grid),
        }
        self.ticker = Ticker::new(self.config.tick_interval());
        self.ticker.start(now);
        info!("session restarted");
    }
}

fn fresh_state(config: &Config) -> GameState {
    match config.seed {
        Some(seed) => GameState::new_with_seed(config.grid, seed),
        None => GameState::new(config.grid),
    }
}
