use alloc::collections::{BTreeSet, VecDeque};
use alloc::vec;
use alloc::vec::Vec;

use crate::*;

/// What a single reveal did to the board.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    MineHit,
    /// One cell opened, showing its adjacent mine count.
    SafeReveal(u8),
    /// A zero cell opened and the cascade opened every listed cell, origin first.
    SafeRevealWithCascade(Vec<Coord2>),
}

impl RevealOutcome {
    pub const fn is_mine_hit(&self) -> bool {
        matches!(self, Self::MineHit)
    }

    pub fn cells_opened(&self) -> CellCount {
        match self {
            Self::MineHit => 0,
            Self::SafeReveal(_) => 1,
            Self::SafeRevealWithCascade(opened) => {
                opened.len().try_into().unwrap_or(CellCount::MAX)
            }
        }
    }

    /// Count shown on the cell that was clicked.
    pub const fn adjacent_count(&self) -> Option<u8> {
        match self {
            Self::MineHit => None,
            Self::SafeReveal(count) => Some(*count),
            Self::SafeRevealWithCascade(_) => Some(0),
        }
    }
}

/// Opens `coords` on `state`, flood filling zero regions. Never touches the score.
pub fn reveal(grid: &Grid, state: &mut RoundState, coords: Coord2) -> Result<RevealOutcome> {
    let coords = grid.validate_coords(coords)?;
    if !state.status(coords).is_hidden() {
        return Err(MoveProblem::NotHidden.into());
    }

    if grid[coords] {
        log::debug!("Mine detonated at {:?}", coords);
        state.detonate(coords);
        return Ok(RevealOutcome::MineHit);
    }

    let adjacent_mines = grid.adjacent_mines(coords);
    state.open(coords, adjacent_mines);
    log::debug!("Open cell at {:?}, mine count: {}", coords, adjacent_mines);

    if adjacent_mines > 0 {
        return Ok(RevealOutcome::SafeReveal(adjacent_mines));
    }

    let mut opened = vec![coords];
    let mut visited = BTreeSet::from([coords]);
    let mut to_visit: VecDeque<_> = hidden_neighbors(grid, state, coords).collect();

    while let Some(visit_coords) = to_visit.pop_front() {
        if !visited.insert(visit_coords) {
            continue;
        }

        if !state.status(visit_coords).is_hidden() || grid[visit_coords] {
            log::trace!("Skipping cell at {:?}", visit_coords);
            continue;
        }

        let visit_adjacent_mines = grid.adjacent_mines(visit_coords);
        state.open(visit_coords, visit_adjacent_mines);
        opened.push(visit_coords);
        log::trace!(
            "Cascade opened {:?}, mine count: {}",
            visit_coords,
            visit_adjacent_mines
        );

        if visit_adjacent_mines == 0 {
            to_visit.extend(
                hidden_neighbors(grid, state, visit_coords).filter(|pos| !visited.contains(pos)),
            );
        }
    }

    Ok(RevealOutcome::SafeRevealWithCascade(opened))
}

fn hidden_neighbors(grid: &Grid, state: &RoundState, coords: Coord2) -> impl Iterator<Item = Coord2> {
    grid.neighbors(coords)
        .filter(move |&pos| state.status(pos).is_hidden())
}
