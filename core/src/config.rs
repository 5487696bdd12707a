use core::fmt;
use core::str::FromStr;
use serde::{Deserialize, Serialize};

use crate::*;

/// Board dimensions and mine count for one game.
///
/// A value of this type always satisfies `columns > 0`, `rows > 0` and
/// `0 < mines < columns * rows`, unless it was built with [`BoardConfig::new_unchecked`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawBoardConfig")]
pub struct BoardConfig {
    columns: Coord,
    rows: Coord,
    mines: CellCount,
}

#[derive(Deserialize)]
struct RawBoardConfig {
    columns: Coord,
    rows: Coord,
    mines: CellCount,
}

impl TryFrom<RawBoardConfig> for BoardConfig {
    type Error = GameError;

    fn try_from(raw: RawBoardConfig) -> Result<Self> {
        Self::new(raw.columns, raw.rows, raw.mines)
    }
}

impl BoardConfig {
    /// Only for configs already known to be valid, such as the built-in presets.
    pub const fn new_unchecked(columns: Coord, rows: Coord, mines: CellCount) -> Self {
        Self {
            columns,
            rows,
            mines,
        }
    }

    pub fn new(columns: Coord, rows: Coord, mines: CellCount) -> Result<Self> {
        if columns == 0 || rows == 0 {
            return Err(GameError::EmptyBoard);
        }
        if mines == 0 {
            return Err(GameError::NoMines);
        }
        if mines >= mult(columns, rows) {
            return Err(GameError::TooManyMines);
        }
        Ok(Self::new_unchecked(columns, rows, mines))
    }

    pub const fn columns(&self) -> Coord {
        self.columns
    }

    pub const fn rows(&self) -> Coord {
        self.rows
    }

    pub const fn mines(&self) -> CellCount {
        self.mines
    }

    /// `(columns, rows)`
    pub const fn size(&self) -> Coord2 {
        (self.columns, self.rows)
    }

    pub const fn total_cells(&self) -> CellCount {
        mult(self.columns, self.rows)
    }

    pub const fn safe_cells(&self) -> CellCount {
        self.total_cells() - self.mines
    }

    pub fn validate_coords(&self, coords: Coord2) -> Result<Coord2> {
        if coords.0 < self.columns && coords.1 < self.rows {
            Ok(coords)
        } else {
            Err(GameError::InvalidCoords)
        }
    }
}

impl fmt::Display for BoardConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}x{}:{}", self.columns, self.rows, self.mines)
    }
}

/// Parses the `<columns>x<rows>:<mines>` form produced by `Display`.
impl FromStr for BoardConfig {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let (size, mines) = s.trim().split_once(':').ok_or(GameError::UnknownDifficulty)?;
        let (columns, rows) = size
            .split_once(['x', 'X'])
            .ok_or(GameError::UnknownDifficulty)?;

        let parse_err = |_| GameError::UnknownDifficulty;
        Self::new(
            columns.trim().parse().map_err(parse_err)?,
            rows.trim().parse().map_err(parse_err)?,
            mines.trim().parse().map_err(parse_err)?,
        )
    }
}

/// Preset board sizes, plus arbitrary custom boards.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner1,
    Beginner2,
    Beginner3,
    Intermediate1,
    Intermediate2,
    Expert,
    Extreme,
    Custom(BoardConfig),
}

impl Difficulty {
    pub const BEGINNER: Self = Self::Beginner1;
    pub const INTERMEDIATE: Self = Self::Intermediate1;

    /// Every non-custom preset, smallest first.
    pub const PRESETS: [Self; 7] = [
        Self::Beginner1,
        Self::Beginner2,
        Self::Beginner3,
        Self::Intermediate1,
        Self::Intermediate2,
        Self::Expert,
        Self::Extreme,
    ];

    pub const fn config(self) -> BoardConfig {
        use Difficulty::*;
        match self {
            Beginner1 => BoardConfig::new_unchecked(8, 8, 10),
            Beginner2 => BoardConfig::new_unchecked(10, 10, 10),
            Beginner3 => BoardConfig::new_unchecked(12, 12, 15),
            Intermediate1 => BoardConfig::new_unchecked(16, 16, 40),
            Intermediate2 => BoardConfig::new_unchecked(18, 18, 60),
            Expert => BoardConfig::new_unchecked(30, 16, 99),
            Extreme => BoardConfig::new_unchecked(60, 30, 375),
            Custom(config) => config,
        }
    }

    pub const fn name(self) -> &'static str {
        use Difficulty::*;
        match self {
            Beginner1 => "beginner-1",
            Beginner2 => "beginner-2",
            Beginner3 => "beginner-3",
            Intermediate1 => "intermediate-1",
            Intermediate2 => "intermediate-2",
            Expert => "expert",
            Extreme => "extreme",
            Custom(_) => "custom",
        }
    }
}

impl Default for Difficulty {
    fn default() -> Self {
        Self::BEGINNER
    }
}

impl From<BoardConfig> for Difficulty {
    fn from(config: BoardConfig) -> Self {
        Self::PRESETS
            .into_iter()
            .find(|preset| preset.config() == config)
            .unwrap_or(Self::Custom(config))
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Custom(config) => write!(f, "{config}"),
            preset => f.write_str(preset.name()),
        }
    }
}

fn normalized(text: &str) -> impl Iterator<Item = char> + '_ {
    text.chars()
        .filter(|&c| c != '-' && c != '_')
        .map(|c| c.to_ascii_lowercase())
}

/// Accepts preset names (`expert`, `beginner-2`, `beginner2`, plain `beginner`)
/// or a custom `<columns>x<rows>:<mines>` board.
impl FromStr for Difficulty {
    type Err = GameError;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();

        if s.eq_ignore_ascii_case("beginner") {
            return Ok(Self::BEGINNER);
        }
        if s.eq_ignore_ascii_case("intermediate") {
            return Ok(Self::INTERMEDIATE);
        }

        Self::PRESETS
            .into_iter()
            .find(|preset| normalized(preset.name()).eq(normalized(s)))
            .map_or_else(|| s.parse().map(Self::Custom), Ok)
    }
}
