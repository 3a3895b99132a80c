/// Single coordinate axis used for the grid side length and positions.
pub type Coord = u8;

/// Count type used for mine counts, cell counts and scores.
pub type CellCount = u16;

/// Two-dimensional coordinates `(x, y)`.
pub type Coord2 = (Coord, Coord);

pub trait ToNdIndex {
    type Output;
    fn to_nd_index(self) -> Self::Output;
}

impl ToNdIndex for Coord2 {
    type Output = [usize; 2];

    fn to_nd_index(self) -> Self::Output {
        [self.0.into(), self.1.into()]
    }
}

/// Number of cells in a square grid with the given side.
pub const fn area(side: Coord) -> CellCount {
    let side = side as CellCount;
    side.saturating_mul(side)
}

/// Offsets of the Moore neighbourhood, row by row.
const MOORE: [(i8, i8); 8] = [
    (-1, -1),
    (0, -1),
    (1, -1),
    (-1, 0),
    (1, 0),
    (-1, 1),
    (0, 1),
    (1, 1),
];

/// Iterator over the in-bounds Moore neighbours of a cell in a square grid.
#[derive(Clone, Debug)]
pub struct Neighbors {
    center: Coord2,
    side: Coord,
    next: usize,
}

impl Neighbors {
    pub fn new(center: Coord2, side: Coord) -> Self {
        Self {
            center,
            side,
            next: 0,
        }
    }

    fn shift(&self, (dx, dy): (i8, i8)) -> Option<Coord2> {
        let x = self.center.0.checked_add_signed(dx)?;
        let y = self.center.1.checked_add_signed(dy)?;
        (x < self.side && y < self.side).then_some((x, y))
    }
}

impl Iterator for Neighbors {
    type Item = Coord2;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some(&offset) = MOORE.get(self.next) {
            self.next += 1;
            if let Some(coords) = self.shift(offset) {
                return Some(coords);
            }
        }
        None
    }
}

/// Row-major iterator over every coordinate of a square grid.
pub fn all_coords(side: Coord) -> impl Iterator<Item = Coord2> {
    (0..side).flat_map(move |y| (0..side).map(move |x| (x, y)))
}
