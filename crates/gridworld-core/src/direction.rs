/// One of the four cardinal movement attempts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    /// Fixed enumeration of the four primaries. The max over actions is
    /// order-independent, but the ordering here and in `perpendicular` stays
    /// fixed so slip accumulation is bit-for-bit reproducible.
    pub const ALL: [Direction; 4] = [
        Direction::Right,
        Direction::Down,
        Direction::Left,
        Direction::Up,
    ];

    /// Unit (row, column) displacement.
    pub fn delta(self) -> (isize, isize) {
        match self {
            Direction::Up => (-1, 0),
            Direction::Down => (1, 0),
            Direction::Left => (0, -1),
            Direction::Right => (0, 1),
        }
    }

    /// The two perpendicular slip directions: horizontal primaries slip
    /// vertically and vice versa.
    pub fn perpendicular(self) -> [Direction; 2] {
        match self {
            Direction::Left | Direction::Right => [Direction::Down, Direction::Up],
            Direction::Up | Direction::Down => [Direction::Right, Direction::Left],
        }
    }
}
