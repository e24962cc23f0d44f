//! Game session: grid, active piece, lookahead queue, score/level state and
//! the gravity timer. Everything is mutated from one serial context; the
//! shell (app) feeds commands in and drains events out.

use crate::grid::{Grid, LineClear};
use crate::piece::ActivePiece;
use crate::scoring;
use crate::tetromino::TetrominoKind;
use crate::{GameConfig, PieceSet};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

/// Discrete player command. Anything arriving while the session is not
/// running is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    MoveLeft,
    MoveRight,
    Rotate,
    SoftDrop,
}

/// Fire-and-forget events for the audio/presentation collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    PieceLocked,
    LinesCleared(u32),
    GameOver,
}

/// One owned, cancelable gravity timer. Interval changes replace the handle
/// wholesale (cancel-and-reschedule), never retime an existing one.
#[derive(Debug, Clone, Copy)]
struct GravityTimer {
    interval: Duration,
    next_due: Instant,
}

impl GravityTimer {
    fn new(interval: Duration, now: Instant) -> Self {
        Self {
            interval,
            next_due: now + interval,
        }
    }
}

/// The whole simulation aggregate. Owns the grid, the active piece, the
/// single-slot lookahead and the score/level state.
#[derive(Debug)]
pub struct GameSession {
    grid: Grid,
    active: ActivePiece,
    next: TetrominoKind,
    piece_set: &'static [TetrominoKind],
    rng: SmallRng,
    score: u32,
    lines_cleared: u32,
    level: u32,
    running: bool,
    game_over: bool,
    timer: Option<GravityTimer>,
    events: Vec<GameEvent>,
}

impl GameSession {
    pub fn new(config: &GameConfig) -> Self {
        let piece_set: &'static [TetrominoKind] = match config.piece_set {
            PieceSet::Seven => &TetrominoKind::ALL,
            PieceSet::Five => &TetrominoKind::CLASSIC_FIVE,
        };
        let mut rng = match config.seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_entropy(),
        };
        let first = piece_set[rng.gen_range(0..piece_set.len())];
        let next = piece_set[rng.gen_range(0..piece_set.len())];
        Self {
            grid: Grid::new(),
            active: ActivePiece::spawn(first),
            next,
            piece_set,
            rng,
            score: 0,
            lines_cleared: 0,
            level: scoring::level_for_score(0),
            running: false,
            game_over: false,
            timer: None,
            events: Vec::new(),
        }
    }

    /// Independent uniform draw over the piece set (no bag fairness).
    fn draw_piece(&mut self) -> TetrominoKind {
        self.piece_set[self.rng.gen_range(0..self.piece_set.len())]
    }

    /// Start/pause toggle: a running timer is cleared to pause; absence of a
    /// handle plus a start creates a new one. No-op once the game is over.
    pub fn toggle_running(&mut self, now: Instant) {
        if self.game_over {
            return;
        }
        if self.timer.is_some() {
            self.cancel_gravity();
            self.running = false;
        } else {
            self.timer = Some(GravityTimer::new(self.fall_interval(), now));
            self.running = true;
        }
    }

    /// Idempotent: cancelling an absent timer does nothing.
    pub fn cancel_gravity(&mut self) {
        self.timer = None;
    }

    /// Apply one player command. Ignored while paused or after game over.
    pub fn handle(&mut self, command: Command, now: Instant) {
        if !self.running {
            return;
        }
        match command {
            Command::MoveLeft => self.active.move_left(&self.grid),
            Command::MoveRight => self.active.move_right(&self.grid),
            Command::Rotate => self.active.rotate(&self.grid),
            Command::SoftDrop => self.step_down(now),
        }
    }

    /// Fire the gravity timer if it is due, rearming it for the next tick.
    pub fn poll_gravity(&mut self, now: Instant) {
        let due = match self.timer {
            Some(timer) => now >= timer.next_due,
            None => return,
        };
        if due {
            if let Some(timer) = &mut self.timer {
                timer.next_due = now + timer.interval;
            }
            self.step_down(now);
        }
    }

    /// One down-step (gravity tick or soft drop), followed by the lock check.
    fn step_down(&mut self, now: Instant) {
        self.active.move_down();
        if self.active.should_lock(&self.grid) {
            self.lock_piece(now);
        }
    }

    /// Lock pipeline: occupy cells, dequeue the lookahead and respawn, then
    /// line-clear, scoring, leveling and the game-over check, in that order.
    fn lock_piece(&mut self, now: Instant) {
        let cells = self.active.display_cells();
        self.grid.occupy(&cells, self.active.kind);
        self.events.push(GameEvent::PieceLocked);

        self.active = ActivePiece::spawn(self.next);
        self.next = self.draw_piece();

        let clear = self.grid.clear_full_rows();
        if clear.lines > 0 {
            self.apply_clear(clear, now);
        }

        if self.spawn_collides() {
            self.game_over = true;
            self.running = false;
            self.cancel_gravity();
            self.events.push(GameEvent::GameOver);
        }
    }

    fn spawn_collides(&self) -> bool {
        self.active
            .display_cells()
            .iter()
            .any(|&i| self.grid.is_occupied(i).unwrap_or(true))
    }

    fn apply_clear(&mut self, clear: LineClear, now: Instant) {
        self.score += clear.score_delta;
        self.lines_cleared += clear.lines;
        self.events.push(GameEvent::LinesCleared(clear.lines));

        self.level = self.level.max(scoring::level_for_score(self.score));
        let interval = self.fall_interval();
        // Crossing a band reschedules gravity: the old handle is dropped and
        // a fresh one created at the new interval.
        if let Some(timer) = self.timer {
            if timer.interval != interval {
                self.timer = Some(GravityTimer::new(interval, now));
            }
        }
    }

    fn fall_interval(&self) -> Duration {
        Duration::from_millis(scoring::fall_interval_ms(self.score))
    }

    /// Drain pending events for the collaborator (audio/presentation).
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    // Render/scoreboard sink queries.

    pub fn active_piece(&self) -> (TetrominoKind, [usize; 4]) {
        (self.active.kind, self.active.display_cells())
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn next_piece(&self) -> TetrominoKind {
        self.next
    }

    pub fn score(&self) -> u32 {
        self.score
    }

    pub fn lines_cleared(&self) -> u32 {
        self.lines_cleared
    }

    pub fn level(&self) -> u32 {
        self.level
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn is_game_over(&self) -> bool {
        self.game_over
    }

    pub fn fall_interval_ms(&self) -> u64 {
        scoring::fall_interval_ms(self.score)
    }
}
