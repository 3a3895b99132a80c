use core::num::Saturating;

use ndarray::Array2;
use serde::{Deserialize, Serialize};

use crate::*;

/// Why a round stopped accepting moves.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RoundEnd {
    Detonated(Coord2),
    /// Every safe cell was revealed.
    Cleared,
    /// Ended from outside, e.g. the player handed over to the AI.
    Stopped,
}

/// Result of one top-level move.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MoveResult {
    Lost,
    Continued { adjacent: u8, opened: CellCount },
    Cleared { adjacent: u8, opened: CellCount },
}

impl MoveResult {
    pub const fn ends_round(self) -> bool {
        matches!(self, Self::Lost | Self::Cleared { .. })
    }
}

/// Mutable per-round board, created fresh for every round.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundState {
    cells: Array2<CellStatus>,
    score: Saturating<CellCount>,
    revealed_count: CellCount,
    end: Option<RoundEnd>,
}

impl RoundState {
    pub fn new(side: Coord) -> Self {
        Self {
            cells: Array2::default((side, side).to_nd_index()),
            score: Saturating(0),
            revealed_count: 0,
            end: None,
        }
    }

    pub fn get(&self, coords: Coord2) -> Option<CellStatus> {
        self.cells.get(coords.to_nd_index()).copied()
    }

    /// Caller guarantees `coords` is in bounds.
    pub(crate) fn status(&self, coords: Coord2) -> CellStatus {
        self.cells[coords.to_nd_index()]
    }

    pub fn cells(&self) -> &Array2<CellStatus> {
        &self.cells
    }

    pub fn score(&self) -> CellCount {
        self.score.0
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn end(&self) -> Option<RoundEnd> {
        self.end
    }

    pub fn is_ended(&self) -> bool {
        self.end.is_some()
    }

    pub(crate) fn open(&mut self, coords: Coord2, adjacent_mines: u8) {
        self.cells[coords.to_nd_index()] = CellStatus::Revealed(adjacent_mines);
        self.revealed_count += 1;
    }

    pub(crate) fn detonate(&mut self, coords: Coord2) {
        self.cells[coords.to_nd_index()] = CellStatus::Detonated;
    }
}

/// Drives one player's round over a single grid.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoundController {
    grid: Grid,
    state: RoundState,
    score_multiplier: CellCount,
}

impl RoundController {
    pub fn new(grid: Grid, score_multiplier: CellCount) -> Self {
        let state = RoundState::new(grid.size());
        Self {
            grid,
            state,
            score_multiplier,
        }
    }

    pub fn apply_move(&mut self, coords: Coord2) -> Result<MoveResult> {
        if self.state.is_ended() {
            return Err(GameError::RoundAlreadyOver);
        }

        let outcome = reveal(&self.grid, &mut self.state, coords)?;
        if outcome.is_mine_hit() {
            self.finish(RoundEnd::Detonated(coords));
            return Ok(MoveResult::Lost);
        }

        self.state.score += Saturating(self.score_multiplier);
        let adjacent = outcome.adjacent_count().unwrap_or_default();
        let opened = outcome.cells_opened();

        if self.state.revealed_count >= self.grid.safe_cell_count() {
            self.finish(RoundEnd::Cleared);
            Ok(MoveResult::Cleared { adjacent, opened })
        } else {
            Ok(MoveResult::Continued { adjacent, opened })
        }
    }

    /// Ends an open round without a move. Has no effect on a finished round.
    pub fn stop(&mut self) {
        if !self.state.is_ended() {
            self.finish(RoundEnd::Stopped);
        }
    }

    fn finish(&mut self, end: RoundEnd) {
        log::debug!("Round ended: {:?}, score: {}", end, self.state.score());
        self.state.end = Some(end);
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn state(&self) -> &RoundState {
        &self.state
    }

    pub fn size(&self) -> Coord {
        self.grid.size()
    }

    pub fn score(&self) -> CellCount {
        self.state.score()
    }

    pub fn score_multiplier(&self) -> CellCount {
        self.score_multiplier
    }

    pub fn is_ended(&self) -> bool {
        self.state.is_ended()
    }

    pub fn end(&self) -> Option<RoundEnd> {
        self.state.end()
    }

    pub fn cell_status(&self, coords: Coord2) -> Result<CellStatus> {
        let coords = self.grid.validate_coords(coords)?;
        Ok(self.state.status(coords))
    }

    pub fn is_cell_hidden(&self, coords: Coord2) -> bool {
        self.cell_status(coords).is_ok_and(CellStatus::is_hidden)
    }

    pub fn revealed_count(&self) -> CellCount {
        self.state.revealed_count()
    }

    pub fn safe_cells_remaining(&self) -> CellCount {
        self.grid.safe_cell_count().saturating_sub(self.state.revealed_count())
    }

    pub fn detonated_at(&self) -> Option<Coord2> {
        match self.state.end() {
            Some(RoundEnd::Detonated(coords)) => Some(coords),
            _ => None,
        }
    }
}
