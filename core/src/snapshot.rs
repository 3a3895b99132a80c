use core::fmt;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Owned copy of what a player can see of a round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoardSnapshot {
    pub size: Coord,
    pub cells: Array2<CellStatus>,
    pub score: CellCount,
    pub ended: bool,
}

impl BoardSnapshot {
    pub fn from_round(round: &RoundController) -> Self {
        Self {
            size: round.size(),
            cells: round.state().cells().clone(),
            score: round.score(),
            ended: round.is_ended(),
        }
    }

    pub fn status(&self, coords: Coord2) -> Option<CellStatus> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    pub fn to_json(&self) -> serde_json::Result<alloc::string::String> {
        serde_json::to_string(self)
    }
}

impl fmt::Display for BoardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for y in 0..self.size {
            for x in 0..self.size {
                let glyph = self.status((x, y)).map_or('?', CellStatus::glyph);
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
