use core::ops::Index;

use ndarray::Array2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::*;

/// Square minefield. The layout is fixed once placed; rounds only read it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Grid {
    side: Coord,
    mine_count: CellCount,
    mine_mask: Array2<bool>,
}

impl Grid {
    /// Empty grid sized for `mine_count` mines, call [`Grid::place_mines`] before play.
    pub fn new(side: Coord, mine_count: CellCount) -> Result<Self> {
        if side == 0 {
            return Err(ConfigProblem::EmptyGrid.into());
        }
        if mine_count >= area(side) {
            log::warn!(
                "Cannot fit {} mines in a {}x{} grid",
                mine_count,
                side,
                side
            );
            return Err(ConfigProblem::TooManyMines.into());
        }

        Ok(Self {
            side,
            mine_count,
            mine_mask: Array2::default((side, side).to_nd_index()),
        })
    }

    /// Shorthand for [`Grid::new`] followed by [`Grid::place_mines`].
    pub fn generate<R: Rng + ?Sized>(
        side: Coord,
        mine_count: CellCount,
        rng: &mut R,
    ) -> Result<Self> {
        let mut grid = Self::new(side, mine_count)?;
        grid.place_mines(rng);
        Ok(grid)
    }

    /// Fixed layout, mostly useful for tests and replaying known boards.
    pub fn from_mine_coords(side: Coord, mine_coords: &[Coord2]) -> Result<Self> {
        let mut grid = Self::new(side, 0)?;

        for &coords in mine_coords {
            let coords = grid.validate_coords(coords)?;
            grid.mine_mask[coords.to_nd_index()] = true;
        }

        let placed = grid.mine_mask.iter().filter(|&&is_mine| is_mine).count();
        grid.mine_count = placed
            .try_into()
            .map_err(|_| GameError::from(ConfigProblem::TooManyMines))?;
        if grid.mine_count >= area(side) {
            return Err(ConfigProblem::TooManyMines.into());
        }
        Ok(grid)
    }

    /// Clears the mask and draws `mine_count` distinct cells, retrying on duplicates.
    pub fn place_mines<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.mine_mask.fill(false);

        let mut placed: CellCount = 0;
        let mut draws: u32 = 0;
        while placed < self.mine_count {
            let coords = (rng.random_range(0..self.side), rng.random_range(0..self.side));
            draws += 1;
            let cell = &mut self.mine_mask[coords.to_nd_index()];
            if !*cell {
                *cell = true;
                placed += 1;
            }
        }

        log::debug!(
            "Placed {} mines on a {}x{} grid in {} draws",
            placed,
            self.side,
            self.side,
            draws
        );
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.side && coords.1 < self.side {
            Ok(coords)
        } else {
            Err(MoveProblem::OutOfBounds.into())
        }
    }

    pub fn size(&self) -> Coord {
        self.side
    }

    pub fn total_cells(&self) -> CellCount {
        area(self.side)
    }

    pub fn mine_count(&self) -> CellCount {
        self.mine_count
    }

    pub fn safe_cell_count(&self) -> CellCount {
        self.total_cells() - self.mine_count
    }

    pub fn is_mine(&self, coords: Coord2) -> Result<bool> {
        let coords = self.validate_coords(coords)?;
        Ok(self[coords])
    }

    pub fn count_adjacent_mines(&self, coords: Coord2) -> Result<u8> {
        let coords = self.validate_coords(coords)?;
        Ok(self.adjacent_mines(coords))
    }

    /// In-bounds Moore neighbours of `coords`.
    pub fn neighbors(&self, coords: Coord2) -> Neighbors {
        Neighbors::new(coords, self.side)
    }

    pub fn mine_coords(&self) -> impl Iterator<Item = Coord2> + '_ {
        all_coords(self.side).filter(|&coords| self[coords])
    }

    /// Caller guarantees `coords` is in bounds.
    pub(crate) fn adjacent_mines(&self, coords: Coord2) -> u8 {
        // at most 8 neighbours, the cast cannot truncate
        self.neighbors(coords).filter(|&pos| self[pos]).count() as u8
    }
}

impl Index<Coord2> for Grid {
    type Output = bool;

    fn index(&self, coords: Coord2) -> &Self::Output {
        &self.mine_mask[coords.to_nd_index()]
    }
}
