use rand::Rng;
use rand::seq::IndexedRandom;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::*;

/// How an AI round finished.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AiRoundEnding {
    Detonated,
    Cleared,
    /// The step budget ran out with the round still open.
    StepsExhausted,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiTurnReport {
    pub score: CellCount,
    pub ending: AiRoundEnding,
    pub steps_taken: CellCount,
}

/// Scripted opponent. It knows where the mines are and only walks onto one
/// when a random whole-grid pick lands there and the survival roll succeeds.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct AiPlayer {
    survival_chance: f64,
    last_move: Option<Coord2>,
}

impl AiPlayer {
    pub fn new(survival_chance: f64) -> Self {
        Self {
            survival_chance: survival_chance.clamp(0.0, 1.0),
            last_move: None,
        }
    }

    pub fn survival_chance(&self) -> f64 {
        self.survival_chance
    }

    pub fn last_move(&self) -> Option<Coord2> {
        self.last_move
    }

    /// Plays `round` for at most one step per cell, returning early once it ends.
    pub fn play_round<R: Rng + ?Sized>(
        &mut self,
        round: &mut RoundController,
        rng: &mut R,
    ) -> AiTurnReport {
        let budget = area(round.size());
        let mut steps_taken: CellCount = 0;

        while steps_taken < budget && !round.is_ended() {
            steps_taken += 1;

            let coords = self.pick_candidate(round, rng);
            if !round.is_cell_hidden(coords) {
                log::trace!("AI skips open cell {:?}", coords);
                continue;
            }
            if round.grid()[coords] && rng.random::<f64>() >= self.survival_chance {
                log::trace!("AI passes on mine at {:?}", coords);
                continue;
            }

            self.last_move = Some(coords);

            match round.apply_move(coords) {
                Ok(result) => log::trace!("AI opened {:?}: {:?}", coords, result),
                Err(err) => log::warn!("AI move at {:?} rejected: {}", coords, err),
            }
        }

        round.stop();
        let ending = match round.end() {
            Some(RoundEnd::Detonated(_)) => AiRoundEnding::Detonated,
            Some(RoundEnd::Cleared) => AiRoundEnding::Cleared,
            Some(RoundEnd::Stopped) | None => AiRoundEnding::StepsExhausted,
        };
        log::debug!(
            "AI round finished after {} steps: {:?}, score: {}",
            steps_taken,
            ending,
            round.score()
        );

        AiTurnReport {
            score: round.score(),
            ending,
            steps_taken,
        }
    }

    /// A safe hidden neighbour of the last move if there is one, otherwise any cell.
    fn pick_candidate<R: Rng + ?Sized>(&self, round: &RoundController, rng: &mut R) -> Coord2 {
        let grid = round.grid();
        if let Some(last) = self.last_move {
            let candidates: SmallVec<[Coord2; 8]> = grid
                .neighbors(last)
                .filter(|&pos| round.is_cell_hidden(pos) && !grid[pos])
                .collect();
            if let Some(&coords) = candidates.choose(rng) {
                return coords;
            }
        }

        let side = grid.size();
        (rng.random_range(0..side), rng.random_range(0..side))
    }
}
