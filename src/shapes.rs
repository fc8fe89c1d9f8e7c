use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

// ============================================================================
// Colors
// ============================================================================

/// Opaque 24-bit RGB color attached to a shape and to the cells it locks into.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub struct Color(pub u32);

impl Color {
    pub fn rgb(self) -> (u8, u8, u8) {
        let Color(v) = self;
        ((v >> 16) as u8, (v >> 8) as u8, v as u8)
    }
}

// ============================================================================
// Shape Catalog
// ============================================================================

#[derive(Clone, Copy, PartialEq, Eq, Debug, Hash)]
pub enum ShapeKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl ShapeKind {
    pub const ALL: [ShapeKind; 7] = [
        ShapeKind::I,
        ShapeKind::J,
        ShapeKind::L,
        ShapeKind::O,
        ShapeKind::S,
        ShapeKind::T,
        ShapeKind::Z,
    ];

    pub fn shape(self) -> &'static Shape {
        match self {
            ShapeKind::I => &I,
            ShapeKind::J => &J,
            ShapeKind::L => &L,
            ShapeKind::O => &O,
            ShapeKind::S => &S,
            ShapeKind::T => &T,
            ShapeKind::Z => &Z,
        }
    }
}

/// A tetromino template in its spawn orientation.
#[derive(PartialEq, Eq, Debug)]
pub struct Shape {
    pub kind: ShapeKind,
    pub matrix: &'static [&'static [bool]],
    pub color: Color,
}

impl Shape {
    pub fn width(&self) -> usize {
        self.matrix[0].len()
    }

    pub fn height(&self) -> usize {
        self.matrix.len()
    }

    /// Owned copy of the matrix, the starting point for an active piece.
    pub fn to_matrix(&self) -> Vec<Vec<bool>> {
        self.matrix.iter().map(|row| row.to_vec()).collect()
    }
}

const X: bool = true;
const E: bool = false;

static I: Shape = Shape {
    kind: ShapeKind::I,
    matrix: &[&[X, X, X, X]],
    color: Color(0x00f0f0),
};

static J: Shape = Shape {
    kind: ShapeKind::J,
    matrix: &[&[X, E, E], &[X, X, X]],
    color: Color(0x0000f0),
};

static L: Shape = Shape {
    kind: ShapeKind::L,
    matrix: &[&[E, E, X], &[X, X, X]],
    color: Color(0xf0a000),
};

static O: Shape = Shape {
    kind: ShapeKind::O,
    matrix: &[&[X, X], &[X, X]],
    color: Color(0xf0f000),
};

static S: Shape = Shape {
    kind: ShapeKind::S,
    matrix: &[&[E, X, X], &[X, X, E]],
    color: Color(0x00f000),
};

static T: Shape = Shape {
    kind: ShapeKind::T,
    matrix: &[&[E, X, E], &[X, X, X]],
    color: Color(0xa000f0),
};

static Z: Shape = Shape {
    kind: ShapeKind::Z,
    matrix: &[&[X, X, E], &[E, X, X]],
    color: Color(0xf00000),
};

// ============================================================================
// Shape Providers
// ============================================================================

pub trait ShapeProvider {
    fn next_shape(&mut self) -> &'static Shape;
}

/// Uniform pick among the seven shapes.
pub struct RandomShapes {
    rng: StdRng,
}

impl RandomShapes {
    pub fn new() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for RandomShapes {
    fn default() -> Self {
        Self::new()
    }
}

impl ShapeProvider for RandomShapes {
    fn next_shape(&mut self) -> &'static Shape {
        let kind = ShapeKind::ALL[self.rng.gen_range(0..ShapeKind::ALL.len())];
        kind.shape()
    }
}

/// Cycles through a fixed list; used to script games in tests.
pub struct SequenceShapes {
    kinds: Vec<ShapeKind>,
    index: usize,
}

impl SequenceShapes {
    pub fn new(kinds: Vec<ShapeKind>) -> Self {
        assert!(!kinds.is_empty(), "shape sequence must not be empty");
        Self { kinds, index: 0 }
    }
}

impl ShapeProvider for SequenceShapes {
    fn next_shape(&mut self) -> &'static Shape {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind.shape()
    }
}
