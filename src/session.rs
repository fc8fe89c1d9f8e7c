use crate::board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::collab::{AudioSink, GravityTimer, Sound};
use crate::piece::Piece;
use crate::shapes::{Color, RandomShapes, Shape, ShapeProvider};

// ============================================================================
// Configuration
// ============================================================================

// Timing (in milliseconds)
pub const BASE_INTERVAL_MS: u64 = 1000;
pub const MIN_INTERVAL_MS: u64 = 100;
const INTERVAL_STEP_MS: u64 = 100;
pub const LINES_PER_LEVEL: u32 = 10;

// Scoring
pub const POINTS_PER_LINE: u32 = 100;

/// Gravity interval for a level, floored at `MIN_INTERVAL_MS`.
pub fn gravity_interval_ms(level: u32) -> u64 {
    let reduction = u64::from(level.saturating_sub(1)) * INTERVAL_STEP_MS;
    BASE_INTERVAL_MS.saturating_sub(reduction).max(MIN_INTERVAL_MS)
}

// ============================================================================
// Types
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    Falling,
    GameOver,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Input {
    MoveLeft,
    MoveRight,
    SoftDrop,
    HardDrop,
    Rotate,
    Restart,
}

/// What the presentation layer draws in one board square.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum ViewCell {
    Empty,
    Locked(Color),
    Shadow,
    Active(Color),
}

// ============================================================================
// Session
// ============================================================================

pub struct Session<A: AudioSink, T: GravityTimer> {
    pub board: Board,
    pub piece: Piece,
    next: Option<&'static Shape>,
    pub score: u32,
    pub level: u32,
    pub lines_cleared: u32,
    interval_ms: u64,
    phase: Phase,
    shapes: Box<dyn ShapeProvider>,
    audio: A,
    timer: T,
}

impl<A: AudioSink, T: GravityTimer> Session<A, T> {
    pub fn new(audio: A, timer: T) -> Self {
        Self::with_provider(Box::new(RandomShapes::new()), audio, timer)
    }

    pub fn with_provider(mut shapes: Box<dyn ShapeProvider>, audio: A, timer: T) -> Self {
        let current = shapes.next_shape();
        let next = shapes.next_shape();
        Self::assemble(Board::new(), Piece::spawn(current), Some(next), shapes, audio, timer)
    }

    /// Starts from a prepared board and piece. The next shape comes from
    /// `shapes` on the first spawn.
    pub fn with_board(
        board: Board,
        piece: Piece,
        shapes: Box<dyn ShapeProvider>,
        audio: A,
        timer: T,
    ) -> Self {
        Self::assemble(board, piece, None, shapes, audio, timer)
    }

    fn assemble(
        board: Board,
        piece: Piece,
        next: Option<&'static Shape>,
        shapes: Box<dyn ShapeProvider>,
        audio: A,
        mut timer: T,
    ) -> Self {
        timer.schedule(BASE_INTERVAL_MS);
        Self {
            board,
            piece,
            next,
            score: 0,
            level: 1,
            lines_cleared: 0,
            interval_ms: BASE_INTERVAL_MS,
            phase: Phase::Falling,
            shapes,
            audio,
            timer,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_game_over(&self) -> bool {
        self.phase == Phase::GameOver
    }

    pub fn interval_ms(&self) -> u64 {
        self.interval_ms
    }

    pub fn next_shape(&self) -> Option<&'static Shape> {
        self.next
    }

    pub fn audio(&self) -> &A {
        &self.audio
    }

    pub fn timer(&self) -> &T {
        &self.timer
    }

    pub fn timer_mut(&mut self) -> &mut T {
        &mut self.timer
    }

    /// Applies one input event. Everything but `Restart` is ignored after
    /// game over, and `Restart` is ignored before it.
    pub fn handle_input(&mut self, input: Input) {
        match input {
            Input::MoveLeft => {
                self.shift(-1);
            }
            Input::MoveRight => {
                self.shift(1);
            }
            Input::SoftDrop => self.gravity_tick(),
            Input::HardDrop => self.hard_drop(),
            Input::Rotate => {
                self.rotate();
            }
            Input::Restart => {
                self.restart();
            }
        }
    }

    pub fn shift(&mut self, dx: i32) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let moved = self.piece.move_by(&self.board, dx, 0);
        if moved {
            self.audio.play(Sound::Move);
        }
        moved
    }

    pub fn rotate(&mut self) -> bool {
        if self.phase != Phase::Falling {
            return false;
        }
        let rotated = self.piece.rotate(&self.board);
        if rotated {
            self.audio.play(Sound::Rotate);
        }
        rotated
    }

    /// One step of gravity, also used for the soft drop key.
    pub fn gravity_tick(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }
        if !self.piece.move_by(&self.board, 0, 1) {
            self.lock_and_spawn();
        }
    }

    pub fn hard_drop(&mut self) {
        if self.phase != Phase::Falling {
            return;
        }
        self.piece.hard_drop(&self.board);
        self.audio.play(Sound::Drop);
        self.lock_and_spawn();
    }

    fn lock_and_spawn(&mut self) {
        self.lock();
        self.clear_lines();
        self.spawn();
    }

    fn lock(&mut self) {
        let color = self.piece.color;
        self.board
            .place(self.piece.cells().into_iter().map(|p| (p.x, p.y, color)));
        log::debug!(
            "locked {:?} at ({}, {})",
            self.piece.kind,
            self.piece.position.x,
            self.piece.position.y
        );
    }

    /// Clears full rows and scores them. Each row in a pass is worth
    /// `POINTS_PER_LINE * n * level`, where `n` counts the rows cleared so
    /// far in the pass and `level` is re-read after every row.
    pub fn clear_lines(&mut self) -> u32 {
        let cleared = self.board.clear_full_rows();
        for running in 1..=cleared {
            self.lines_cleared += 1;
            self.score += POINTS_PER_LINE * running * self.level;
            self.audio.play(Sound::Clear);

            let new_level = self.lines_cleared / LINES_PER_LEVEL + 1;
            if new_level > self.level {
                self.level_up(new_level);
            }
        }
        if cleared > 0 {
            log::debug!("cleared {} rows, score {}", cleared, self.score);
        }
        cleared
    }

    fn level_up(&mut self, level: u32) {
        self.level = level;
        self.interval_ms = gravity_interval_ms(level);
        self.timer.schedule(self.interval_ms);
        log::info!("level {} reached, gravity every {}ms", level, self.interval_ms);
    }

    /// Promotes the next shape to the active piece. A piece that overlaps
    /// the stack as soon as it appears ends the game.
    pub fn spawn(&mut self) {
        let shape = match self.next.take() {
            Some(shape) => shape,
            None => self.shapes.next_shape(),
        };
        self.piece = Piece::spawn(shape);

        if !self.piece.can_move(&self.board, 0, 0) {
            self.phase = Phase::GameOver;
            self.timer.cancel();
            self.audio.play(Sound::GameOver);
            log::info!(
                "game over: score {}, lines {}, level {}",
                self.score,
                self.lines_cleared,
                self.level
            );
            return;
        }

        self.next = Some(self.shapes.next_shape());
    }

    /// Starts a fresh game. Only has an effect after game over.
    pub fn restart(&mut self) -> bool {
        if self.phase != Phase::GameOver {
            return false;
        }
        self.board = Board::new();
        self.score = 0;
        self.level = 1;
        self.lines_cleared = 0;
        self.interval_ms = BASE_INTERVAL_MS;
        self.next = None;
        self.phase = Phase::Falling;
        self.spawn();
        self.timer.schedule(self.interval_ms);
        log::info!("game restarted");
        true
    }

    /// Row where the active piece would land, for the shadow.
    pub fn shadow_y(&self) -> i32 {
        self.piece.find_drop_position(&self.board)
    }

    /// The board as it should be drawn: locked cells, then the shadow, then
    /// the active piece on top. The shadow is hidden after game over.
    pub fn render_grid(&self) -> Vec<Vec<ViewCell>> {
        let mut view: Vec<Vec<ViewCell>> = self
            .board
            .rows()
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match *cell {
                        Cell::Empty => ViewCell::Empty,
                        Cell::Filled(color) => ViewCell::Locked(color),
                    })
                    .collect()
            })
            .collect();

        let mut overlay = |x: i32, y: i32, cell: ViewCell| {
            if (0..BOARD_WIDTH as i32).contains(&x) && (0..BOARD_HEIGHT as i32).contains(&y) {
                view[y as usize][x as usize] = cell;
            }
        };

        let cells = self.piece.cells();
        if self.phase == Phase::Falling {
            let fall = self.shadow_y() - self.piece.position.y;
            for p in &cells {
                overlay(p.x, p.y + fall, ViewCell::Shadow);
            }
        }
        for p in &cells {
            overlay(p.x, p.y, ViewCell::Active(self.piece.color));
        }

        view
    }
}

impl<A, T> Default for Session<A, T>
where
    A: AudioSink + Default,
    T: GravityTimer + Default,
{
    fn default() -> Self {
        Self::new(A::default(), T::default())
    }
}
