use rand::rngs::SmallRng;

/// One grid cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Tile {
    pub mine: bool,
    pub revealed: bool,
    pub flagged: bool,
}

/// The playing field. Tiles are stored row-major and indexed `x + y * width`.
///
/// `found_count` tracks how many of the flagged tiles actually hold a mine,
/// so `0 <= found_count <= flag_count <= width * height` at all times.
/// Mines are placed lazily: `initialized` stays false until the first
/// board-affecting command, which lets the opening reveal relocate a mine
/// out from under itself.
#[derive(Debug)]
pub struct Board {
    pub width: usize,
    pub height: usize,
    pub mine_count: usize,
    pub flag_count: usize,
    pub found_count: usize,
    pub initialized: bool,
    pub tiles: Vec<Tile>,
    pub(crate) rng: SmallRng,
}
