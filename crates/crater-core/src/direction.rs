use glam::IVec2;

/// One of the 8 neighbour directions in a 2D grid (4 orthogonal + 4 diagonal).
/// y points up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum Direction {
    // 4 diagonal neighbours
    UpRight = 0,
    DownRight = 1,
    DownLeft = 2,
    UpLeft = 3,
    // 4 orthogonal neighbours
    Right = 4,
    Left = 5,
    Up = 6,
    Down = 7,
}

/// All 8 directions, diagonals first. This is the scorch halo order.
pub const NEIGHBORS_8: [Direction; 8] = [
    Direction::UpRight,
    Direction::DownRight,
    Direction::DownLeft,
    Direction::UpLeft,
    Direction::Right,
    Direction::Left,
    Direction::Up,
    Direction::Down,
];

impl Direction {
    /// Grid offset of this direction.
    pub fn offset(self) -> IVec2 {
        match self {
            Direction::UpRight => IVec2::new(1, 1),
            Direction::DownRight => IVec2::new(1, -1),
            Direction::DownLeft => IVec2::new(-1, -1),
            Direction::UpLeft => IVec2::new(-1, 1),
            Direction::Right => IVec2::new(1, 0),
            Direction::Left => IVec2::new(-1, 0),
            Direction::Up => IVec2::new(0, 1),
            Direction::Down => IVec2::new(0, -1),
        }
    }

    pub fn is_diagonal(self) -> bool {
        (self as u8) < 4
    }

    pub fn opposite(self) -> Direction {
        match self {
            Direction::UpRight => Direction::DownLeft,
            Direction::DownRight => Direction::UpLeft,
            Direction::DownLeft => Direction::UpRight,
            Direction::UpLeft => Direction::DownRight,
            Direction::Right => Direction::Left,
            Direction::Left => Direction::Right,
            Direction::Up => Direction::Down,
            Direction::Down => Direction::Up,
        }
    }
}

/// Horizontal facing of an actor or thrown object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Facing {
    Left,
    #[default]
    Right,
}

impl Facing {
    /// -1 for left, +1 for right.
    pub fn sign(self) -> i32 {
        match self {
            Facing::Left => -1,
            Facing::Right => 1,
        }
    }

    pub fn signum_f32(self) -> f32 {
        self.sign() as f32
    }
}
