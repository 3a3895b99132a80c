use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::*;

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchOutcome {
    HumanWins,
    AiWins,
    Tie,
}

impl MatchOutcome {
    pub fn decide(human_score: CellCount, ai_score: CellCount) -> Self {
        use core::cmp::Ordering::*;

        match human_score.cmp(&ai_score) {
            Greater => Self::HumanWins,
            Less => Self::AiWins,
            Equal => Self::Tie,
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiRoundResult {
    pub ai_score: CellCount,
    pub human_score: CellCount,
    pub outcome: MatchOutcome,
    pub ending: AiRoundEnding,
    pub steps_taken: CellCount,
}

#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MatchPhase {
    /// The human round accepts moves.
    #[default]
    HumanTurn,
    /// The human round is over and the AI has not played yet.
    AwaitingAi,
}

/// Handle handed to a front end by [`start_new_game`].
pub type GameHandle = MatchDirector<SmallRng>;

/// Starts an Easy/Medium/Hard match on the default grid, seeded by the caller.
pub fn start_new_game(difficulty: Difficulty, seed: u64) -> Result<GameHandle> {
    MatchDirector::with_rng(MatchConfig::new(difficulty), SmallRng::seed_from_u64(seed))
}

/// Runs a session of human-then-AI round pairs and keeps the top score.
#[derive(Clone, Debug)]
pub struct MatchDirector<R> {
    config: MatchConfig,
    rng: R,
    round: RoundController,
    phase: MatchPhase,
    top_score: CellCount,
    rounds_played: u32,
    last_ai_round: Option<AiRoundResult>,
}

impl<R: Rng> MatchDirector<R> {
    pub fn with_rng(config: MatchConfig, mut rng: R) -> Result<Self> {
        let round = new_round(&config, &mut rng)?;
        log::debug!(
            "Match started: {} on a {}x{} grid",
            config.difficulty,
            config.grid_size,
            config.grid_size
        );
        Ok(Self {
            config,
            rng,
            round,
            phase: MatchPhase::HumanTurn,
            top_score: 0,
            rounds_played: 0,
            last_ai_round: None,
        })
    }

    /// Starts over at `difficulty`. The grid size and the top score carry over.
    /// Custom settings are dropped in favour of the difficulty's own table.
    pub fn start_match(&mut self, difficulty: Difficulty) -> Result<()> {
        if let Some(custom) = self.config.custom {
            log::debug!("Dropping custom settings {:?} for {}", custom, difficulty);
        }
        let config = MatchConfig {
            difficulty,
            custom: None,
            ..self.config
        };
        self.round = new_round(&config, &mut self.rng)?;
        self.config = config;
        self.phase = MatchPhase::HumanTurn;
        self.last_ai_round = None;
        log::debug!("New {} match, top score: {}", difficulty, self.top_score);
        Ok(())
    }

    /// Human move. Once it ends the round, further moves are rejected until
    /// [`MatchDirector::run_ai_round`] has played.
    pub fn reveal(&mut self, coords: Coord2) -> Result<MoveResult> {
        let result = self.round.apply_move(coords)?;
        self.top_score = self.top_score.max(self.round.score());
        if result.ends_round() {
            log::debug!("Human round over with score {}", self.round.score());
            self.phase = MatchPhase::AwaitingAi;
        }
        Ok(result)
    }

    /// Plays the AI on a freshly mined grid and then deals a new human round.
    /// An unfinished human round is stopped first and keeps its score.
    pub fn run_ai_round(&mut self) -> Result<AiRoundResult> {
        self.round.stop();
        let human_score = self.round.score();
        let settings = self.config.settings();

        let mut ai_round = new_round(&self.config, &mut self.rng)?;
        let mut ai = AiPlayer::new(settings.ai_survival_chance);
        let report = ai.play_round(&mut ai_round, &mut self.rng);

        let result = AiRoundResult {
            ai_score: report.score,
            human_score,
            outcome: MatchOutcome::decide(human_score, report.score),
            ending: report.ending,
            steps_taken: report.steps_taken,
        };
        log::debug!("AI round result: {:?}", result);

        self.round = new_round(&self.config, &mut self.rng)?;
        self.phase = MatchPhase::HumanTurn;
        self.rounds_played += 1;
        self.last_ai_round = Some(result);
        Ok(result)
    }
}

impl<R> MatchDirector<R> {
    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.difficulty
    }

    pub fn phase(&self) -> MatchPhase {
        self.phase
    }

    pub fn round(&self) -> &RoundController {
        &self.round
    }

    pub fn cell_status(&self, coords: Coord2) -> Result<CellStatus> {
        self.round.cell_status(coords)
    }

    pub fn current_score(&self) -> CellCount {
        self.round.score()
    }

    pub fn top_score(&self) -> CellCount {
        self.top_score
    }

    pub fn rounds_played(&self) -> u32 {
        self.rounds_played
    }

    pub fn last_ai_round(&self) -> Option<AiRoundResult> {
        self.last_ai_round
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot::from_round(&self.round)
    }
}

fn new_round<R: Rng + ?Sized>(config: &MatchConfig, rng: &mut R) -> Result<RoundController> {
    let settings = config.settings();
    settings.validate(config.grid_size)?;
    let grid = Grid::generate(config.grid_size, settings.mine_count, rng)?;
    Ok(RoundController::new(grid, settings.score_multiplier))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn find_cell(game: &GameHandle, wanted: impl Fn(&Grid, Coord2) -> bool) -> Coord2 {
        let grid = game.round().grid();
        all_coords(grid.size())
            .find(|&coords| wanted(grid, coords))
            .unwrap()
    }

    fn find_mine(game: &GameHandle) -> Coord2 {
        find_cell(game, |grid, coords| grid[coords])
    }

    fn find_safe(game: &GameHandle) -> Coord2 {
        find_cell(game, |grid, coords| !grid[coords])
    }

    #[test]
    fn new_game_starts_on_a_fresh_board() {
        let game = start_new_game(Difficulty::Medium, 1).unwrap();

        assert_eq!(game.phase(), MatchPhase::HumanTurn);
        assert_eq!(game.current_score(), 0);
        assert_eq!(game.top_score(), 0);
        assert_eq!(game.round().grid().size(), 10);
        assert_eq!(game.round().grid().mine_count(), 20);
        assert_eq!(game.cell_status((9, 9)), Ok(CellStatus::Hidden));
    }

    #[test]
    fn human_loss_waits_for_the_ai() {
        let mut game = start_new_game(Difficulty::Easy, 2).unwrap();
        let mine = find_mine(&game);

        assert_eq!(game.reveal(mine), Ok(MoveResult::Lost));
        assert_eq!(game.phase(), MatchPhase::AwaitingAi);
        assert_eq!(game.cell_status(mine), Ok(CellStatus::Detonated));
        assert_eq!(game.reveal(find_safe(&game)), Err(GameError::RoundAlreadyOver));
    }

    #[test]
    fn ai_round_reports_and_deals_new_round() {
        let mut game = start_new_game(Difficulty::Hard, 3).unwrap();
        let safe = find_safe(&game);
        game.reveal(safe).unwrap();
        let human_score = game.current_score();
        assert_eq!(human_score, 3);
        if game.phase() == MatchPhase::HumanTurn {
            game.reveal(find_mine(&game)).unwrap();
        }

        let result = game.run_ai_round().unwrap();

        assert_eq!(result.human_score, human_score);
        assert_eq!(result.outcome, MatchOutcome::decide(human_score, result.ai_score));
        assert_eq!(result.ai_score % 3, 0);
        assert_eq!(game.phase(), MatchPhase::HumanTurn);
        assert_eq!(game.current_score(), 0);
        assert_eq!(game.top_score(), human_score);
        assert_eq!(game.rounds_played(), 1);
        assert_eq!(game.last_ai_round(), Some(result));
        assert_eq!(game.round().revealed_count(), 0);
        assert_eq!(game.round().grid().mine_count(), 30);
    }

    #[test]
    fn top_score_never_decreases() {
        let mut game = start_new_game(Difficulty::Easy, 4).unwrap();
        let mut best = 0;

        for _ in 0..5 {
            while game.phase() == MatchPhase::HumanTurn {
                let coords = find_cell(&game, |grid, coords| {
                    !grid[coords] && game.round().is_cell_hidden(coords)
                });
                game.reveal(coords).unwrap();
                best = best.max(game.current_score());
                assert_eq!(game.top_score(), best);
                if game.phase() == MatchPhase::HumanTurn && game.current_score() >= 3 {
                    game.reveal(find_mine(&game)).unwrap();
                }
            }
            game.run_ai_round().unwrap();
            assert_eq!(game.top_score(), best);
        }
    }

    #[test]
    fn ai_round_can_stop_an_open_human_round() {
        let mut game = start_new_game(Difficulty::Easy, 5).unwrap();
        game.reveal(find_safe(&game)).unwrap();

        let result = game.run_ai_round().unwrap();

        assert_eq!(result.human_score, 1);
        assert_eq!(game.top_score(), 1);
    }

    #[test]
    fn start_match_keeps_top_score() {
        let mut game = start_new_game(Difficulty::Easy, 6).unwrap();
        game.reveal(find_safe(&game)).unwrap();

        game.start_match(Difficulty::Hard).unwrap();

        assert_eq!(game.difficulty(), Difficulty::Hard);
        assert_eq!(game.current_score(), 0);
        assert_eq!(game.top_score(), 1);
        assert_eq!(game.round().grid().mine_count(), 30);
    }

    #[test]
    fn start_match_replaces_custom_settings() {
        let config = MatchConfig::new(Difficulty::Easy).with_custom(DifficultySettings {
            mine_count: 3,
            score_multiplier: 7,
            ai_survival_chance: 0.5,
        });
        let mut game = MatchDirector::with_rng(config, SmallRng::seed_from_u64(8)).unwrap();
        assert_eq!(game.round().grid().mine_count(), 3);
        assert_eq!(game.round().score_multiplier(), 7);

        game.start_match(Difficulty::Medium).unwrap();

        assert_eq!(game.config().custom, None);
        assert_eq!(game.config().settings(), Difficulty::Medium.settings());
        assert_eq!(game.round().grid().mine_count(), 20);
        assert_eq!(game.round().score_multiplier(), 2);
    }

    #[test]
    fn grid_too_small_for_difficulty_is_rejected_at_setup() {
        let config = MatchConfig::new(Difficulty::Hard).with_grid_size(5);

        let err = MatchDirector::with_rng(config, SmallRng::seed_from_u64(0)).unwrap_err();

        assert_eq!(err, GameError::InvalidConfiguration(ConfigProblem::TooManyMines));
    }

    #[test]
    fn same_seed_same_match() {
        let mut a = start_new_game(Difficulty::Medium, 77).unwrap();
        let mut b = start_new_game(Difficulty::Medium, 77).unwrap();
        assert_eq!(a.round(), b.round());

        assert_eq!(a.run_ai_round(), b.run_ai_round());
        assert_eq!(a.round(), b.round());
    }

    #[test]
    fn outcome_compares_scores() {
        assert_eq!(MatchOutcome::decide(4, 2), MatchOutcome::HumanWins);
        assert_eq!(MatchOutcome::decide(2, 4), MatchOutcome::AiWins);
        assert_eq!(MatchOutcome::decide(3, 3), MatchOutcome::Tie);
    }
}
