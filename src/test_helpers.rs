//! Fixtures shared by the integration tests.

use crate::board::{Board, Cell, BOARD_HEIGHT, BOARD_WIDTH};
use crate::collab::{AudioSink, GravityTimer, Sound};
use crate::piece::Piece;
use crate::session::Session;
use crate::shapes::{Color, SequenceShapes, ShapeKind};

pub const GRAY: Color = Color(0x808080);

pub fn empty_grid() -> Vec<Vec<Cell>> {
    vec![vec![Cell::Empty; BOARD_WIDTH]; BOARD_HEIGHT]
}

pub fn fill_row(grid: &mut [Vec<Cell>], y: usize) {
    for cell in grid[y].iter_mut() {
        *cell = Cell::Filled(GRAY);
    }
}

pub fn fill_row_with_gap(grid: &mut [Vec<Cell>], y: usize, gap_x: usize) {
    for (x, cell) in grid[y].iter_mut().enumerate() {
        if x != gap_x {
            *cell = Cell::Filled(GRAY);
        }
    }
}

/// Keeps every sound it is asked to play.
#[derive(Debug, Default)]
pub struct RecordingAudio {
    pub played: Vec<Sound>,
}

impl RecordingAudio {
    pub fn count(&self, sound: Sound) -> usize {
        self.played.iter().filter(|s| **s == sound).count()
    }
}

impl AudioSink for RecordingAudio {
    fn play(&mut self, sound: Sound) {
        self.played.push(sound);
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TimerCall {
    Schedule(u64),
    Cancel,
}

/// Keeps every schedule/cancel request in order.
#[derive(Debug, Default)]
pub struct RecordingTimer {
    pub calls: Vec<TimerCall>,
}

impl RecordingTimer {
    /// Interval currently in force, `None` if the last call was a cancel.
    pub fn active_interval(&self) -> Option<u64> {
        match self.calls.last() {
            Some(TimerCall::Schedule(ms)) => Some(*ms),
            _ => None,
        }
    }
}

impl GravityTimer for RecordingTimer {
    fn schedule(&mut self, interval_ms: u64) {
        self.calls.push(TimerCall::Schedule(interval_ms));
    }

    fn cancel(&mut self) {
        self.calls.push(TimerCall::Cancel);
    }
}

pub type TestSession = Session<RecordingAudio, RecordingTimer>;

/// A session over `grid` with `piece` in play and `upcoming` cycled as the
/// following shapes.
pub fn session_with(grid: Vec<Vec<Cell>>, piece: Piece, upcoming: Vec<ShapeKind>) -> TestSession {
    Session::with_board(
        Board::from_rows(grid),
        piece,
        Box::new(SequenceShapes::new(upcoming)),
        RecordingAudio::default(),
        RecordingTimer::default(),
    )
}

pub fn scripted_session(kinds: Vec<ShapeKind>) -> TestSession {
    Session::with_provider(
        Box::new(SequenceShapes::new(kinds)),
        RecordingAudio::default(),
        RecordingTimer::default(),
    )
}
