use crate::board::{Board, BOARD_HEIGHT, BOARD_WIDTH};
use crate::shapes::{Color, Shape, ShapeKind};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub struct Position {
    pub x: i32,
    pub y: i32,
}

/// The piece under player control: an owned, possibly rotated copy of a
/// catalog shape placed somewhere on the board.
#[derive(Clone, PartialEq, Eq, Debug)]
pub struct Piece {
    pub kind: ShapeKind,
    pub color: Color,
    pub matrix: Vec<Vec<bool>>,
    pub position: Position,
}

impl Piece {
    /// Places `shape` horizontally centered on the top row.
    pub fn spawn(shape: &Shape) -> Self {
        let x = (BOARD_WIDTH / 2) as i32 - (shape.width() / 2) as i32;
        Self::at(shape, x, 0)
    }

    pub fn at(shape: &Shape, x: i32, y: i32) -> Self {
        Self {
            kind: shape.kind,
            color: shape.color,
            matrix: shape.to_matrix(),
            position: Position { x, y },
        }
    }

    pub fn width(&self) -> usize {
        self.matrix.first().map_or(0, Vec::len)
    }

    pub fn height(&self) -> usize {
        self.matrix.len()
    }

    /// Matrix-relative coordinates of filled cells.
    fn offsets(&self) -> impl Iterator<Item = (i32, i32)> + '_ {
        self.matrix.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .filter(|(_, filled)| **filled)
                .map(move |(col, _)| (col as i32, row as i32))
        })
    }

    /// Board coordinates of every filled cell at the current position.
    pub fn cells(&self) -> Vec<Position> {
        self.offsets()
            .map(|(dx, dy)| Position {
                x: self.position.x + dx,
                y: self.position.y + dy,
            })
            .collect()
    }

    pub fn can_move(&self, board: &Board, dx: i32, dy: i32) -> bool {
        self.offsets().all(|(ox, oy)| {
            let x = self.position.x + ox + dx;
            let y = self.position.y + oy + dy;
            // No lower bound on y: pieces may hang above the top edge.
            (0..BOARD_WIDTH as i32).contains(&x)
                && y < BOARD_HEIGHT as i32
                && !board.is_occupied(x, y)
        })
    }

    pub fn move_by(&mut self, board: &Board, dx: i32, dy: i32) -> bool {
        if !self.can_move(board, dx, dy) {
            return false;
        }
        self.position.x += dx;
        self.position.y += dy;
        true
    }

    /// Rotates 90 degrees clockwise in place. A rotation that collides is
    /// undone; there is no kick search.
    pub fn rotate(&mut self, board: &Board) -> bool {
        let rotated = rotate_clockwise(&self.matrix);
        let previous = std::mem::replace(&mut self.matrix, rotated);
        if self.can_move(board, 0, 0) {
            true
        } else {
            self.matrix = previous;
            false
        }
    }

    /// Lowest `y` the piece can fall to from where it is now.
    pub fn find_drop_position(&self, board: &Board) -> i32 {
        let mut fall = 0;
        while self.can_move(board, 0, fall + 1) {
            fall += 1;
        }
        self.position.y + fall
    }

    /// Drops straight down until blocked and returns how many rows it fell.
    pub fn hard_drop(&mut self, board: &Board) -> i32 {
        let mut fallen = 0;
        while self.move_by(board, 0, 1) {
            fallen += 1;
        }
        fallen
    }
}

/// `new[i][j] = old[rows - 1 - j][i]`; the result has swapped dimensions.
pub fn rotate_clockwise(matrix: &[Vec<bool>]) -> Vec<Vec<bool>> {
    let rows = matrix.len();
    let cols = matrix.first().map_or(0, Vec::len);
    (0..cols)
        .map(|i| (0..rows).map(|j| matrix[rows - 1 - j][i]).collect())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotating_t_points_it_right() {
        let t = ShapeKind::T.shape().to_matrix();
        let rotated = rotate_clockwise(&t);
        assert_eq!(
            rotated,
            vec![vec![true, false], vec![true, true], vec![true, false]]
        );
    }

    #[test]
    fn rotating_i_makes_it_vertical() {
        let rotated = rotate_clockwise(&ShapeKind::I.shape().to_matrix());
        assert_eq!(rotated.len(), 4);
        assert!(rotated.iter().all(|row| row == &vec![true]));
    }

    #[test]
    fn spawn_centers_by_shape_width() {
        assert_eq!(Piece::spawn(ShapeKind::I.shape()).position, Position { x: 3, y: 0 });
        assert_eq!(Piece::spawn(ShapeKind::O.shape()).position, Position { x: 4, y: 0 });
        assert_eq!(Piece::spawn(ShapeKind::T.shape()).position, Position { x: 4, y: 0 });
    }
}
