/// Everything the renderer is allowed to know about a single tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TileView {
    /// Unrevealed, unflagged.
    Concealed,
    /// Unrevealed, flagged by the player.
    Flagged,
    /// Revealed with no mines around it.
    Blank,
    /// Revealed with 1 to 8 mines around it.
    Adjacent(u8),
    /// A revealed mine. Only shows up in the final frame of a lost,
    /// won or quit game.
    Mine,
}

impl TileView {
    /// The one-character display symbol for this tile.
    pub fn symbol(self) -> char {
        match self {
            TileView::Concealed => '@',
            TileView::Flagged => 'F',
            TileView::Blank => ' ',
            TileView::Adjacent(n) => char::from_digit(n.into(), 10).unwrap_or('?'),
            TileView::Mine => '*',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn symbols_match_the_display_contract() {
        assert_eq!(TileView::Concealed.symbol(), '@');
        assert_eq!(TileView::Flagged.symbol(), 'F');
        assert_eq!(TileView::Blank.symbol(), ' ');
        assert_eq!(TileView::Adjacent(1).symbol(), '1');
        assert_eq!(TileView::Adjacent(8).symbol(), '8');
        assert_eq!(TileView::Mine.symbol(), '*');
    }
}
