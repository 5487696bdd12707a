use std::fmt::Write;

use sweeper_core::*;

fn glyph(view: CellView) -> char {
    use CellView::*;
    match view {
        Hidden => '#',
        Flagged => 'F',
        Revealed(0) => '.',
        Revealed(count) => char::from_digit(count.into(), 10).unwrap_or('?'),
        Exploded => 'X',
        Mine => '*',
        WrongFlag => 'x',
    }
}

fn status<P: MinePlacer>(engine: &GameEngine<P>) -> &'static str {
    match engine.state() {
        GameState::NotStarted => "ready",
        GameState::Playing => "playing",
        GameState::Won => "you won!",
        GameState::Lost => "boom, game over",
    }
}

/// Text rendering of what the player can see, one board row per line.
pub(crate) fn render<P: MinePlacer>(engine: &GameEngine<P>) -> String {
    let (columns, rows) = engine.size();
    let mut out = String::new();

    for row in 0..rows {
        for col in 0..columns {
            // every position inside the board size is valid
            let view = engine.cell_view((col, row)).unwrap_or_default();
            out.push(glyph(view));
        }
        out.push('\n');
    }

    let _ = write!(
        out,
        "{} | flags left: {} | revealed: {}/{} | {}",
        engine.difficulty(),
        engine.flags_remaining(),
        engine.revealed_count(),
        engine.config().safe_cells(),
        status(engine),
    );
    if let Some((col, row)) = engine.detonated() {
        let _ = write!(out, " at {col} {row}");
    }
    out
}
