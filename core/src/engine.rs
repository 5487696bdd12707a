use serde::{Deserialize, Serialize};

use crate::*;

/// Valid transitions:
/// - NotStarted -> Playing (first reveal places the mines)
/// - Playing -> Won
/// - Playing -> Lost
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameState {
    NotStarted,
    Playing,
    Won,
    Lost,
}

impl GameState {
    pub const fn is_started(self) -> bool {
        !matches!(self, Self::NotStarted)
    }

    pub const fn is_finished(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::NotStarted
    }
}

/// One game from first click to win or loss.
///
/// The engine owns its board and placement strategy; every move is a method
/// call that runs to completion. Mines are placed on the first reveal, keeping
/// that cell and its neighbors safe when the placer supports it.
#[derive(Clone, Debug)]
pub struct GameEngine<P = RandomPlacer> {
    config: BoardConfig,
    board: Board,
    placer: P,
    state: GameState,
    detonated: Option<Coord2>,
}

impl GameEngine<RandomPlacer> {
    pub fn new(config: BoardConfig, seed: u64) -> Self {
        Self::with_placer(config, RandomPlacer::new(seed))
    }
}

impl<P: MinePlacer> GameEngine<P> {
    pub fn with_placer(config: BoardConfig, placer: P) -> Self {
        Self {
            config,
            board: Board::new(config),
            placer,
            state: Default::default(),
            detonated: None,
        }
    }

    /// Throws the current board away and starts over with `config`.
    pub fn new_game(&mut self, config: BoardConfig) {
        log::debug!("New game on {}", config);
        self.config = config;
        self.board = Board::new(config);
        self.state = GameState::NotStarted;
        self.detonated = None;
    }

    /// Starts over with the same configuration.
    pub fn restart(&mut self) {
        self.new_game(self.config);
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn difficulty(&self) -> Difficulty {
        self.config.into()
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn is_finished(&self) -> bool {
        self.state.is_finished()
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn total_mines(&self) -> CellCount {
        self.config.mines()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.board.flags_remaining()
    }

    pub fn revealed_count(&self) -> CellCount {
        self.board.revealed_count()
    }

    /// The mine that ended the game, if it was lost.
    pub fn detonated(&self) -> Option<Coord2> {
        self.detonated
    }

    pub fn placer(&self) -> &P {
        &self.placer
    }

    /// What the player may see at `coords`. Mines stay hidden until the game ends.
    pub fn cell_view(&self, coords: Coord2) -> Result<CellView> {
        let cell = self.board.cell(coords)?;
        Ok(match self.state {
            GameState::Won => cell.final_view(true),
            GameState::Lost => cell.final_view(false),
            _ => cell.player_view(),
        })
    }

    /// Whether a chord at `coords` would reveal anything right now.
    pub fn can_chord(&self, coords: Coord2) -> bool {
        matches!(self.state, GameState::Playing) && self.board.can_chord(coords)
    }

    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.state.is_started() {
            if !self.board.cell(coords)?.is_covered() {
                return Ok(RevealOutcome::Blocked);
            }
            self.start(coords)?;
        }

        let outcome = self.board.reveal(coords)?;
        self.apply(outcome);
        Ok(outcome)
    }

    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        let outcome = self.board.toggle_flag(coords)?;
        log::trace!("Flag at {:?}: {:?}", coords, outcome);
        Ok(outcome)
    }

    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        self.check_not_finished()?;

        if !self.state.is_started() {
            return Ok(RevealOutcome::Blocked);
        }

        let outcome = self.board.chord(coords)?;
        self.apply(outcome);
        Ok(outcome)
    }

    fn start(&mut self, first: Coord2) -> Result<()> {
        let layout = self.placer.place(&self.config, first);
        self.board.place_mines(&layout)?;
        self.state = GameState::Playing;
        log::debug!("Game started on {} at {:?}", self.config, first);
        Ok(())
    }

    fn apply(&mut self, outcome: RevealOutcome) {
        match outcome {
            RevealOutcome::Lost(coords) => {
                self.detonated = Some(coords);
                self.end_game(false);
            }
            RevealOutcome::Won => self.end_game(true),
            RevealOutcome::Blocked | RevealOutcome::Continue => {}
        }
    }

    fn end_game(&mut self, won: bool) {
        if self.state.is_finished() {
            return;
        }

        self.state = if won { GameState::Won } else { GameState::Lost };
        log::debug!(
            "Game {} with {} cells revealed",
            if won { "won" } else { "lost" },
            self.board.revealed_count()
        );
    }

    fn check_not_finished(&self) -> Result<()> {
        if self.state.is_finished() {
            Err(GameError::AlreadyEnded)
        } else {
            Ok(())
        }
    }
}
