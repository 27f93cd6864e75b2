//! Round state and the fixed-step update that drives it.

use std::time::Duration;

use log::{debug, info};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

use crate::config::GameConfig;
use crate::snake::{Direction, MoveResult, Snake};
use crate::{Coords, GridInt};

const START_DIRECTION: Direction = Direction::Right;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    Running,
    Paused,
    /// `won` is set when the snake filled the board and no apple fits anymore.
    GameOver { won: bool },
}

/// What a committed step did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    Moved,
    Ate { score: u32 },
    GameOver { score: u32, best: u32, won: bool, new_best: bool },
}

/// Result of offering a frame to the game.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Frame {
    /// Paused, over, or too early for the next step.
    Idle,
    Stepped(Step),
}

#[derive(Debug, Clone)]
pub struct GameState {
    rules: GameConfig,
    snake: Snake,
    pending: Direction,
    apple: Option<Coords>,
    speed: u32,
    score: u32,
    best: u32,
    status: Status,
    last_step: Duration,
    rng: StdRng,
}

impl GameState {
    /// Starts a round. `best` is the score loaded from durable storage.
    pub fn new(rules: GameConfig, best: u32) -> Self {
        let rng = match rules.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        let mut state = GameState {
            snake: Snake::new(start_cell(rules.grid_size), START_DIRECTION),
            pending: START_DIRECTION,
            apple: None,
            speed: rules.initial_speed,
            score: 0,
            best,
            status: Status::Running,
            last_step: Duration::ZERO,
            rng,
            rules,
        };
        state.apple = state.spawn_apple();
        state
    }

    /// Resets the round, keeping the best score and the RNG stream.
    pub fn restart(&mut self) {
        info!("restarting round (score was {})", self.score);
        self.snake = Snake::new(start_cell(self.rules.grid_size), START_DIRECTION);
        self.pending = START_DIRECTION;
        self.speed = self.rules.initial_speed;
        self.score = 0;
        self.status = Status::Running;
        self.apple = self.spawn_apple();
    }

    /// Buffers a direction for the next step. A direction that exactly
    /// reverses the current one is rejected and `false` is returned.
    pub fn steer(&mut self, direction: Direction) -> bool {
        if direction.is_reverse_of(self.snake.direction()) {
            return false;
        }
        self.pending = direction;
        true
    }

    /// Flips between running and paused. Has no effect once the round is over.
    pub fn toggle_pause(&mut self) -> Status {
        self.status = match self.status {
            Status::Running => Status::Paused,
            Status::Paused => Status::Running,
            over @ Status::GameOver { .. } => over,
        };
        self.status
    }

    /// Offers a frame at time `now`. Steps at most once, and only when a full
    /// step period has passed since the last committed step.
    pub fn frame(&mut self, now: Duration) -> Frame {
        if self.status != Status::Running {
            return Frame::Idle;
        }
        if now.saturating_sub(self.last_step) < self.step_period() {
            return Frame::Idle;
        }

        self.last_step = now;
        Frame::Stepped(self.step())
    }

    pub fn step_period(&self) -> Duration {
        Duration::from_secs(1) / self.speed
    }

    pub fn snake(&self) -> &Snake {
        &self.snake
    }

    pub fn apple(&self) -> Option<Coords> {
        self.apple
    }

    pub fn pending(&self) -> Direction {
        self.pending
    }

    pub fn speed(&self) -> u32 {
        self.speed
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn grid_size(&self) -> GridInt {
        self.rules.grid_size
    }

    ///////////////////////////////////////////////////////////////////////////

    fn step(&mut self) -> Step {
        self.snake.set_direction(self.pending);

        let new_head = match self.snake.move_step(self.rules.grid_size) {
            MoveResult::Crashed => return self.game_over(false),
            MoveResult::Moved { new_head } => new_head,
        };

        let ate = self.apple == Some(new_head);
        if ate {
            self.score += 1;
            self.snake.grow(self.rules.growth_per_apple);
            if self.score % self.rules.speed_up_every == 0 {
                self.speed = (self.speed + 1).min(self.rules.max_speed);
                debug!("speed up to {} steps/s", self.speed);
            }
        }

        self.snake.settle_tail();

        if !ate {
            return Step::Moved;
        }

        self.apple = self.spawn_apple();
        if self.apple.is_none() {
            return self.game_over(true);
        }
        Step::Ate { score: self.score }
    }

    fn game_over(&mut self, won: bool) -> Step {
        self.status = Status::GameOver { won };
        let new_best = self.score > self.best;
        self.best = self.best.max(self.score);
        info!("round over: score {}, best {}, won {}", self.score, self.best, won);
        Step::GameOver { score: self.score, best: self.best, won, new_best }
    }

    /// Picks a uniformly random cell not covered by the snake.
    fn spawn_apple(&mut self) -> Option<Coords> {
        let size = self.rules.grid_size;
        let choices: Vec<Coords> = (0..size)
            .flat_map(|y| (0..size).map(move |x| (x, y)))
            .filter(|pos| !self.snake.contains(pos))
            .collect();
        choices.choose(&mut self.rng).copied()
    }
}

fn start_cell(size: GridInt) -> Coords {
    (size / 2, size / 2)
}
