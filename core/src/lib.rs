#![no_std]

extern crate alloc;

use core::ops::BitOr;
use serde::{Deserialize, Serialize};

pub use board::*;
pub use cell::*;
pub use config::*;
pub use engine::*;
pub use error::*;
pub use generator::*;
pub use types::*;

mod board;
mod cell;
mod config;
mod engine;
mod error;
mod generator;
mod types;

/// Result of a flag toggle.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlagOutcome {
    Flagged,
    Unflagged,
    /// The cell is revealed, or no flags are left to place
    Refused,
}

impl FlagOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        match self {
            Self::Flagged => true,
            Self::Unflagged => true,
            Self::Refused => false,
        }
    }
}

/// Result of a reveal or a chord.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum RevealOutcome {
    /// Nothing was revealed
    Blocked,
    /// Safe cells were revealed and the game goes on
    Continue,
    /// A mine was revealed at this position
    Lost(Coord2),
    /// The last safe cell was revealed
    Won,
}

impl RevealOutcome {
    /// Whether this outcome could have caused an update to the game
    pub const fn has_update(self) -> bool {
        use RevealOutcome::*;
        match self {
            Blocked => false,
            Continue => true,
            Lost(_) => true,
            Won => true,
        }
    }

    /// The game is decided, no more moves follow
    pub const fn is_final(self) -> bool {
        matches!(self, Self::Lost(_) | Self::Won)
    }
}

/// Used to merge outcomes when revealing several cells in one move
impl BitOr for RevealOutcome {
    type Output = RevealOutcome;

    fn bitor(self, rhs: Self) -> Self::Output {
        use RevealOutcome::*;
        match (self, rhs) {
            // a detonation has priority
            (Lost(coords), _) => Lost(coords),
            (_, Lost(coords)) => Lost(coords),
            (Won, _) => Won,
            (_, Won) => Won,
            (Continue, _) => Continue,
            (_, Continue) => Continue,
            (Blocked, Blocked) => Blocked,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reveal_outcomes_merge_by_priority() {
        use RevealOutcome::*;

        assert_eq!(Blocked | Blocked, Blocked);
        assert_eq!(Blocked | Continue, Continue);
        assert_eq!(Continue | Won, Won);
        assert_eq!(Won | Lost((1, 2)), Lost((1, 2)));
        assert_eq!(Lost((0, 0)) | Lost((1, 1)), Lost((0, 0)));
    }

    #[test]
    fn only_blocked_and_refused_mean_no_update() {
        assert!(!RevealOutcome::Blocked.has_update());
        assert!(RevealOutcome::Lost((0, 0)).has_update());
        assert!(!FlagOutcome::Refused.has_update());
        assert!(FlagOutcome::Unflagged.has_update());
    }
}
