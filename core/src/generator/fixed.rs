use super::*;

/// Hands out the same predefined layout for every game, ignoring the first click.
///
/// Meant for scripted boards and tests; there is no first-click safety here.
#[derive(Clone, Debug, PartialEq)]
pub struct FixedPlacer {
    layout: MineLayout,
}

impl FixedPlacer {
    pub fn new(layout: MineLayout) -> Self {
        Self { layout }
    }

    pub fn from_mine_coords(size: Coord2, mine_coords: &[Coord2]) -> Result<Self> {
        MineLayout::from_mine_coords(size, mine_coords).map(Self::new)
    }

    pub fn layout(&self) -> &MineLayout {
        &self.layout
    }
}

impl MinePlacer for FixedPlacer {
    fn place(&mut self, _config: &BoardConfig, first: Coord2) -> MineLayout {
        if self.layout.contains_mine(first) {
            log::debug!("Fixed layout has a mine under the first click at {:?}", first);
        }
        self.layout.clone()
    }
}
