use serde::{Deserialize, Serialize};

use crate::*;

/// One square of the board.
///
/// Fields are only mutated by [`Board`], which keeps the invariants: `revealed`
/// never goes back to `false`, a revealed cell is never flagged, and `mine` and
/// `adjacent_mines` are written once during mine placement.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cell {
    position: Coord2,
    pub(crate) revealed: bool,
    pub(crate) flagged: bool,
    pub(crate) mine: bool,
    pub(crate) adjacent_mines: u8,
}

impl Cell {
    pub(crate) const fn new(position: Coord2) -> Self {
        Self {
            position,
            revealed: false,
            flagged: false,
            mine: false,
            adjacent_mines: 0,
        }
    }

    pub const fn position(&self) -> Coord2 {
        self.position
    }

    pub const fn is_revealed(&self) -> bool {
        self.revealed
    }

    pub const fn is_flagged(&self) -> bool {
        self.flagged
    }

    pub const fn is_mine(&self) -> bool {
        self.mine
    }

    pub const fn adjacent_mine_count(&self) -> u8 {
        self.adjacent_mines
    }

    /// Neither revealed nor flagged.
    pub const fn is_covered(&self) -> bool {
        !self.revealed && !self.flagged
    }

    /// What the player may see of this cell while the game is still going.
    pub const fn player_view(&self) -> CellView {
        if self.revealed {
            if self.mine {
                CellView::Exploded
            } else {
                CellView::Revealed(self.adjacent_mines)
            }
        } else if self.flagged {
            CellView::Flagged
        } else {
            CellView::Hidden
        }
    }

    /// What the player sees once the game is over: the full mine layout is shown.
    pub const fn final_view(&self, won: bool) -> CellView {
        match (self.revealed, self.flagged, self.mine) {
            (true, _, true) => CellView::Exploded,
            (true, _, false) => CellView::Revealed(self.adjacent_mines),
            (false, true, true) => CellView::Flagged,
            (false, true, false) => CellView::WrongFlag,
            (false, false, true) if won => CellView::Flagged,
            (false, false, true) => CellView::Mine,
            (false, false, false) => CellView::Hidden,
        }
    }
}

/// Player-visible state of a cell, safe to hand to a renderer.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CellView {
    Hidden,
    Flagged,
    Revealed(u8),
    /// The mine that ended the game
    Exploded,
    /// Unflagged mine shown after a loss
    Mine,
    /// Flag on a safe cell, shown after a loss
    WrongFlag,
}

impl CellView {
    /// Whether the cell still looks closed to the player.
    pub const fn is_closed(self) -> bool {
        use CellView::*;
        match self {
            Hidden => true,
            Flagged => true,
            Revealed(_) => false,
            Exploded => false,
            Mine => false,
            WrongFlag => true,
        }
    }
}

impl Default for CellView {
    fn default() -> Self {
        Self::Hidden
    }
}
