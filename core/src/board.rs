use alloc::collections::{BTreeSet, VecDeque};
use ndarray::Array2;

use crate::*;

/// The grid of cells for one game, plus its counters.
///
/// Mines are not part of a fresh board: they are placed with [`Board::place_mines`]
/// when the first reveal position is known, and hints are computed right after.
#[derive(Clone, Debug, PartialEq)]
pub struct Board {
    config: BoardConfig,
    cells: Array2<Cell>,
    flags_remaining: CellCount,
    revealed_count: CellCount,
    mines_placed: bool,
}

impl Board {
    pub fn new(config: BoardConfig) -> Self {
        let cells = Array2::from_shape_fn(config.size().to_nd_index(), |(x, y)| {
            Cell::new((x as Coord, y as Coord))
        });
        Self {
            config,
            cells,
            flags_remaining: config.mines(),
            revealed_count: 0,
            mines_placed: false,
        }
    }

    pub fn config(&self) -> &BoardConfig {
        &self.config
    }

    pub fn size(&self) -> Coord2 {
        self.config.size()
    }

    pub fn flags_remaining(&self) -> CellCount {
        self.flags_remaining
    }

    pub fn flagged_count(&self) -> CellCount {
        self.config.mines() - self.flags_remaining
    }

    pub fn revealed_count(&self) -> CellCount {
        self.revealed_count
    }

    pub fn mines_placed(&self) -> bool {
        self.mines_placed
    }

    /// Every safe cell is revealed.
    pub fn is_cleared(&self) -> bool {
        self.revealed_count == self.config.safe_cells()
    }

    pub fn cell(&self, coords: Coord2) -> Result<&Cell> {
        let coords = self.config.validate_coords(coords)?;
        Ok(&self.cells[coords.to_nd_index()])
    }

    /// All cells, column by column.
    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn iter_neighbors(&self, coords: Coord2) -> NeighborIter {
        self.cells.iter_neighbors(coords)
    }

    /// Writes the mines once and computes every hint.
    pub fn place_mines(&mut self, layout: &MineLayout) -> Result<()> {
        if self.mines_placed {
            return Err(GameError::MinesAlreadyPlaced);
        }
        if !layout.matches(&self.config) {
            return Err(GameError::LayoutMismatch);
        }

        for cell in self.cells.iter_mut() {
            cell.mine = layout[cell.position()];
        }
        self.compute_hints();
        self.mines_placed = true;
        Ok(())
    }

    fn compute_hints(&mut self) {
        let (columns, rows) = self.size();
        for x in 0..columns {
            for y in 0..rows {
                let coords = (x, y);
                let adjacent_mines = self
                    .cells
                    .iter_neighbors(coords)
                    .filter(|&pos| self.cells[pos.to_nd_index()].mine)
                    .count();
                debug_assert!(adjacent_mines <= 8);
                self.cells[coords.to_nd_index()].adjacent_mines = adjacent_mines as u8;
            }
        }
    }

    /// Reveals a cell, flooding through zero-hint cells.
    ///
    /// Flagged and already revealed cells are left alone (`Blocked`). The flood
    /// uses a worklist and a visited set, so each cell is revealed at most once.
    pub fn reveal(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        if !self.mines_placed {
            return Err(GameError::MinesNotPlaced);
        }

        let cell = &mut self.cells[coords.to_nd_index()];
        if !cell.is_covered() {
            return Ok(RevealOutcome::Blocked);
        }

        if cell.mine {
            cell.revealed = true;
            self.revealed_count += 1;
            log::debug!("Revealed mine at {:?}", coords);
            return Ok(RevealOutcome::Lost(coords));
        }

        let mut visited = BTreeSet::from([coords]);
        let mut to_visit = VecDeque::from([coords]);

        while let Some(visit_coords) = to_visit.pop_front() {
            let cell = &mut self.cells[visit_coords.to_nd_index()];
            if !cell.is_covered() {
                log::trace!("Skipping cell at {:?}", visit_coords);
                continue;
            }

            // zero-hint cells never border a mine, so the flood cannot hit one
            debug_assert!(!cell.mine);
            cell.revealed = true;
            self.revealed_count += 1;
            let adjacent_mines = cell.adjacent_mines;
            log::trace!("Revealed cell at {:?}, hint {}", visit_coords, adjacent_mines);

            if adjacent_mines == 0 {
                for pos in self.cells.iter_neighbors(visit_coords) {
                    if self.cells[pos.to_nd_index()].is_covered() && visited.insert(pos) {
                        to_visit.push_back(pos);
                    }
                }
            }
        }

        if self.is_cleared() {
            Ok(RevealOutcome::Won)
        } else {
            Ok(RevealOutcome::Continue)
        }
    }

    /// Flags or unflags a covered cell. Placing a flag is refused once none are left.
    pub fn toggle_flag(&mut self, coords: Coord2) -> Result<FlagOutcome> {
        let coords = self.config.validate_coords(coords)?;
        let cell = &mut self.cells[coords.to_nd_index()];

        Ok(match (cell.revealed, cell.flagged) {
            (true, _) => FlagOutcome::Refused,
            (false, true) => {
                cell.flagged = false;
                self.flags_remaining += 1;
                FlagOutcome::Unflagged
            }
            (false, false) if self.flags_remaining == 0 => FlagOutcome::Refused,
            (false, false) => {
                cell.flagged = true;
                self.flags_remaining -= 1;
                FlagOutcome::Flagged
            }
        })
    }

    pub fn count_flagged_neighbors(&self, coords: Coord2) -> u8 {
        self.cells
            .iter_neighbors(coords)
            .filter(|&pos| self.cells[pos.to_nd_index()].flagged)
            .count() as u8
    }

    /// Whether [`Board::chord`] on this cell would reveal anything.
    pub fn can_chord(&self, coords: Coord2) -> bool {
        let Ok(cell) = self.cell(coords) else {
            return false;
        };
        cell.revealed
            && cell.adjacent_mines > 0
            && cell.adjacent_mines == self.count_flagged_neighbors(coords)
            && self
                .cells
                .iter_neighbors(coords)
                .any(|pos| self.cells[pos.to_nd_index()].is_covered())
    }

    /// Reveals all covered neighbors of a revealed cell whose hint matches its
    /// flagged neighbor count. Stops as soon as the game is decided.
    pub fn chord(&mut self, coords: Coord2) -> Result<RevealOutcome> {
        let coords = self.config.validate_coords(coords)?;
        let cell = self.cells[coords.to_nd_index()];

        if !cell.revealed || cell.adjacent_mines == 0 {
            return Ok(RevealOutcome::Blocked);
        }

        let flagged = self.count_flagged_neighbors(coords);
        if flagged != cell.adjacent_mines {
            log::debug!(
                "Chord at {:?} blocked, hint {} but {} flags",
                coords,
                cell.adjacent_mines,
                flagged
            );
            return Ok(RevealOutcome::Blocked);
        }

        let mut outcome = RevealOutcome::Blocked;
        for pos in self.cells.iter_neighbors(coords) {
            outcome = outcome | self.reveal(pos)?;
            if outcome.is_final() {
                break;
            }
        }
        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(size: Coord2, mines: &[Coord2]) -> Board {
        let layout = MineLayout::from_mine_coords(size, mines).unwrap();
        let config = BoardConfig::new(size.0, size.1, layout.mine_count()).unwrap();
        let mut board = Board::new(config);
        board.place_mines(&layout).unwrap();
        board
    }

    fn revealed(board: &Board) -> usize {
        board.cells().filter(|cell| cell.is_revealed()).count()
    }

    #[test]
    fn fresh_board_is_blank() {
        let board = Board::new(BoardConfig::new(4, 3, 2).unwrap());

        assert_eq!(board.cells().count(), 12);
        assert!(board.cells().all(|cell| cell.is_covered() && !cell.is_mine()));
        assert_eq!(board.flags_remaining(), 2);
        assert_eq!(board.revealed_count(), 0);
        assert!(!board.mines_placed());
        assert_eq!(board.cell((3, 2)).unwrap().position(), (3, 2));
    }

    #[test]
    fn reveal_before_placement_is_an_error() {
        let mut board = Board::new(BoardConfig::new(4, 3, 2).unwrap());

        assert_eq!(board.reveal((0, 0)), Err(GameError::MinesNotPlaced));
    }

    #[test]
    fn placement_happens_once_and_must_match() {
        let mut board = Board::new(BoardConfig::new(3, 3, 1).unwrap());
        let wrong = MineLayout::from_mine_coords((3, 3), &[(0, 0), (1, 1)]).unwrap();
        let right = MineLayout::from_mine_coords((3, 3), &[(2, 2)]).unwrap();

        assert_eq!(board.place_mines(&wrong), Err(GameError::LayoutMismatch));
        assert_eq!(board.place_mines(&right), Ok(()));
        assert_eq!(board.place_mines(&right), Err(GameError::MinesAlreadyPlaced));
        assert_eq!(board.cells().filter(|cell| cell.is_mine()).count(), 1);
    }

    #[test]
    fn hints_count_neighbor_mines() {
        let board = board((4, 4), &[(0, 0), (1, 0), (3, 3)]);

        for cell in board.cells() {
            let expected = board
                .iter_neighbors(cell.position())
                .filter(|&pos| board.cell(pos).unwrap().is_mine())
                .count() as u8;
            assert_eq!(cell.adjacent_mine_count(), expected, "{:?}", cell.position());
        }
        assert_eq!(board.cell((0, 1)).unwrap().adjacent_mine_count(), 2);
        assert_eq!(board.cell((2, 2)).unwrap().adjacent_mine_count(), 1);
    }

    #[test]
    fn zero_hint_floods_whole_board() {
        let mut board = board((3, 3), &[(2, 2)]);

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::Won));
        assert_eq!(board.revealed_count(), 8);
        assert_eq!(revealed(&board), 8);
        assert!(!board.cell((2, 2)).unwrap().is_revealed());
    }

    #[test]
    fn flood_stops_at_hint_cells() {
        // column 3 borders the mines in column 4
        let mut walled = board((5, 3), &[(4, 0), (4, 1), (4, 2)]);
        assert_eq!(walled.reveal((0, 1)), Ok(RevealOutcome::Won));

        let mut gapped = board((5, 3), &[(4, 0), (4, 2)]);
        assert_eq!(gapped.reveal((0, 0)), Ok(RevealOutcome::Continue));
        assert!(gapped.cell((3, 1)).unwrap().is_revealed());
        assert!(!gapped.cell((4, 1)).unwrap().is_revealed());
        assert_eq!(gapped.revealed_count(), 12);
    }

    #[test]
    fn flood_skips_flagged_cells() {
        let mut board = board((4, 1), &[(3, 0)]);
        board.toggle_flag((1, 0)).unwrap();

        assert_eq!(board.reveal((0, 0)), Ok(RevealOutcome::Continue));
        assert!(board.cell((0, 0)).unwrap().is_revealed());
        assert!(board.cell((1, 0)).unwrap().is_flagged());
        assert!(!board.cell((2, 0)).unwrap().is_revealed());
        assert_eq!(board.revealed_count(), 1);
    }

    #[test]
    fn reveal_is_blocked_on_revealed_and_flagged_cells() {
        let mut board = board((3, 3), &[(2, 2)]);
        board.toggle_flag((1, 1)).unwrap();

        assert_eq!(board.reveal((1, 1)), Ok(RevealOutcome::Blocked));
        assert!(!board.cell((1, 1)).unwrap().is_revealed());

        board.reveal((2, 1)).unwrap();
        let count = board.revealed_count();
        assert_eq!(board.reveal((2, 1)), Ok(RevealOutcome::Blocked));
        assert_eq!(board.revealed_count(), count);
    }

    #[test]
    fn reveal_mine_reports_position() {
        let mut board = board((2, 2), &[(1, 0)]);

        assert_eq!(board.reveal((1, 0)), Ok(RevealOutcome::Lost((1, 0))));
        assert!(board.cell((1, 0)).unwrap().is_revealed());
    }

    #[test]
    fn reveal_out_of_bounds_is_an_error() {
        let mut board = board((2, 2), &[(1, 0)]);

        assert_eq!(board.reveal((2, 0)), Err(GameError::InvalidCoords));
        assert_eq!(board.toggle_flag((0, 2)), Err(GameError::InvalidCoords));
        assert_eq!(board.chord((9, 9)), Err(GameError::InvalidCoords));
    }

    #[test]
    fn flags_are_bounded_by_mine_count() {
        let mut board = board((4, 4), &[(0, 0), (3, 3)]);

        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::Flagged));
        assert_eq!(board.toggle_flag((2, 2)), Ok(FlagOutcome::Flagged));
        assert_eq!(board.flags_remaining(), 0);
        assert_eq!(board.toggle_flag((3, 2)), Ok(FlagOutcome::Refused));
        assert!(!board.cell((3, 2)).unwrap().is_flagged());

        assert_eq!(board.toggle_flag((1, 1)), Ok(FlagOutcome::Unflagged));
        assert_eq!(board.flags_remaining(), 1);
        assert_eq!(board.toggle_flag((3, 2)), Ok(FlagOutcome::Flagged));

        let flagged = board.cells().filter(|cell| cell.is_flagged()).count() as CellCount;
        assert_eq!(board.flags_remaining() + flagged, 2);
        assert_eq!(board.flagged_count(), flagged);
    }

    #[test]
    fn flagging_revealed_cell_is_refused() {
        let mut board = board((3, 1), &[(2, 0)]);
        board.reveal((1, 0)).unwrap();

        assert_eq!(board.toggle_flag((1, 0)), Ok(FlagOutcome::Refused));
        assert_eq!(board.flags_remaining(), 1);
        assert!(!board.cell((1, 0)).unwrap().is_flagged());
    }

    #[test]
    fn chord_reveals_covered_neighbors() {
        let mut board = board((3, 3), &[(0, 1), (2, 1)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        board.toggle_flag((2, 1)).unwrap();

        assert!(board.can_chord((1, 1)));
        assert_eq!(board.chord((1, 1)), Ok(RevealOutcome::Won));
        assert_eq!(board.cell((1, 0)).unwrap().adjacent_mine_count(), 2);
        assert!(board.cell((1, 0)).unwrap().is_revealed());
        assert!(board.cell((2, 2)).unwrap().is_revealed());
        assert!(!board.can_chord((1, 1)));
    }

    #[test]
    fn chord_with_wrong_flag_detonates() {
        // hint 2 at (1, 1), the flag on (0, 0) is wrong
        let mut board = board((3, 3), &[(0, 1), (2, 1)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        assert_eq!(board.chord((1, 1)), Ok(RevealOutcome::Lost((2, 1))));
    }

    #[test]
    fn chord_with_mismatched_flags_is_blocked() {
        let mut board = board((3, 3), &[(0, 1), (2, 1)]);
        board.reveal((1, 1)).unwrap();
        board.toggle_flag((0, 1)).unwrap();
        let before = board.clone();

        assert!(!board.can_chord((1, 1)));
        assert_eq!(board.chord((1, 1)), Ok(RevealOutcome::Blocked));
        assert_eq!(board, before);
    }

    #[test]
    fn chord_on_covered_or_zero_cell_is_blocked() {
        let mut board = board((4, 1), &[(3, 0)]);

        assert_eq!(board.chord((0, 0)), Ok(RevealOutcome::Blocked));
        board.reveal((0, 0)).unwrap();
        assert_eq!(board.cell((0, 0)).unwrap().adjacent_mine_count(), 0);
        assert_eq!(board.chord((0, 0)), Ok(RevealOutcome::Blocked));
    }

    #[test]
    fn hints_survive_play() {
        let mut board = board((4, 4), &[(0, 0), (3, 3)]);
        let hints: alloc::vec::Vec<u8> = board.cells().map(Cell::adjacent_mine_count).collect();

        board.toggle_flag((0, 0)).unwrap();
        board.reveal((3, 0)).unwrap();
        board.toggle_flag((0, 0)).unwrap();

        let after: alloc::vec::Vec<u8> = board.cells().map(Cell::adjacent_mine_count).collect();
        assert_eq!(hints, after);
    }
}
