use rand::{Rng, SeedableRng, rngs::SmallRng};
use tracing::{debug, info};

use crate::{
    data::{Board, Tile},
    model::{Command, GameParams, Pos, TileView},
};

/// What [`Board::reveal`] found under the target tile.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RevealOutcome {
    /// The target holds a mine. The board is left untouched; presenting the
    /// loss is the caller's job.
    Mine,
    /// The target (and possibly a region around it) is now revealed.
    Opened,
}

/// What [`Board::toggle_flag`] did.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FlagOutcome {
    /// The tile is already revealed; nothing happened.
    Ignored,
    Flagged,
    Unflagged,
}

/// Session states. Everything except `Playing` is terminal.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Playing,
    Won,
    Lost,
    Quit,
}

/// What the game loop should do after handing a command to [`Game::command`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Print the board and read the next command.
    Render,
    /// The reveal target is flagged; tell the player to unflag it first.
    Blocked,
    /// Print the in-game help.
    Help,
    /// Ask the player to confirm, then call [`Game::quit`] or drop it.
    ConfirmQuit,
    /// Terminal: every mine is flagged and nothing else is.
    Won,
    /// Terminal: the player revealed a mine.
    Lost,
    /// Terminal: the player quit without finishing.
    Quit,
}

impl Board {
    /// A fully concealed board with no mines placed yet.
    ///
    /// Without a seed the generator runs off OS entropy; passing one makes
    /// the whole game reproducible.
    pub fn new(params: GameParams, seed: Option<u64>) -> Self {
        let params = params.clamped();
        let rng = match seed {
            Some(seed) => SmallRng::seed_from_u64(seed),
            None => SmallRng::from_os_rng(),
        };
        Self {
            width: params.width,
            height: params.height,
            mine_count: params.mines,
            flag_count: 0,
            found_count: 0,
            initialized: false,
            tiles: vec![Tile::default(); params.width * params.height],
            rng,
        }
    }

    pub fn in_bounds(&self, pos: Pos) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    pub fn tile(&self, pos: Pos) -> &Tile {
        &self.tiles[pos.x + pos.y * self.width]
    }

    /// Distributes the configured number of mines across the board. Called at
    /// most once per game; later calls are no-ops.
    pub fn place_mines(&mut self) {
        if self.initialized {
            return;
        }
        self.initialized = true;
        for tile in self.tiles.iter_mut().take(self.mine_count) {
            tile.mine = true;
        }
        // One swap per mine against a uniformly chosen partner. Every tile
        // ends with a nonzero mine probability.
        let total = self.tiles.len();
        for i in 0..self.mine_count {
            let j = self.rng.random_range(0..total);
            self.tiles.swap(i, j);
        }
        debug!(mines = self.mine_count, total, "placed mines");
    }

    /// Moves a mine under `pos` to a random unmined tile, provided one
    /// exists. Keeps the opening reveal of a game survivable.
    ///
    /// The target is the n-th unmined tile in board order for a uniformly
    /// drawn n, so the scan is a single bounded pass, never a retry loop.
    pub fn relocate_if_mined(&mut self, pos: Pos) {
        let from = pos.x + pos.y * self.width;
        if !self.tiles[from].mine {
            return;
        }
        let unmined = self.tiles.len() - self.mine_count;
        if unmined == 0 {
            return;
        }
        let mut nth = self.rng.random_range(0..unmined);
        for to in 0..self.tiles.len() {
            if !self.tiles[to].mine {
                if nth == 0 {
                    self.tiles[from].mine = false;
                    self.tiles[to].mine = true;
                    debug!(from, to, "relocated the opening mine");
                    return;
                }
                nth -= 1;
            }
        }
    }

    /// Mines among the up-to-8 neighboring tiles, clipped at the edges.
    ///
    /// Counted on demand, so a relocated mine can never leave a stale count
    /// behind.
    pub fn adjacent_mines(&self, pos: Pos) -> u8 {
        let mut count = 0;
        for dy in -1..=1 {
            for dx in -1..=1 {
                if dx == 0 && dy == 0 {
                    continue;
                }
                let nx = pos.x as i32 + dx;
                let ny = pos.y as i32 + dy;
                if nx < 0 || ny < 0 {
                    continue;
                }
                let npos = Pos {
                    x: nx as usize,
                    y: ny as usize,
                };
                if self.in_bounds(npos) && self.tile(npos).mine {
                    count += 1;
                }
            }
        }
        count
    }

    /// Reveals `pos` and, from zero-count tiles, the mine-free region around
    /// it.
    ///
    /// The fill runs off an explicit work stack: a fully empty board of the
    /// maximum 26x30 size could otherwise chain 780 calls deep. Flagged and
    /// already-revealed tiles are never entered, and every visited tile is
    /// revealed before its neighbors are considered, so the loop terminates.
    pub fn reveal(&mut self, pos: Pos) -> RevealOutcome {
        if self.tile(pos).mine {
            return RevealOutcome::Mine;
        }
        if self.tile(pos).revealed {
            return RevealOutcome::Opened;
        }
        let mut stack = vec![pos];
        while let Some(pos) = stack.pop() {
            let tile = &mut self.tiles[pos.x + pos.y * self.width];
            if tile.revealed || tile.flagged {
                continue;
            }
            tile.revealed = true;
            if self.adjacent_mines(pos) != 0 {
                continue;
            }
            // A zero-count tile has no mined neighbor, so the fill can never
            // reach a mine.
            for dy in -1..=1 {
                for dx in -1..=1 {
                    if dx == 0 && dy == 0 {
                        continue;
                    }
                    let nx = pos.x as i32 + dx;
                    let ny = pos.y as i32 + dy;
                    if nx < 0 || ny < 0 {
                        continue;
                    }
                    let npos = Pos {
                        x: nx as usize,
                        y: ny as usize,
                    };
                    if self.in_bounds(npos) && !self.tile(npos).revealed && !self.tile(npos).flagged
                    {
                        stack.push(npos);
                    }
                }
            }
        }
        RevealOutcome::Opened
    }

    /// Toggles the flag on an unrevealed tile and keeps both flag counters in
    /// step. Revealed tiles are left alone.
    pub fn toggle_flag(&mut self, pos: Pos) -> FlagOutcome {
        let tile = &mut self.tiles[pos.x + pos.y * self.width];
        if tile.revealed {
            return FlagOutcome::Ignored;
        }
        if tile.flagged {
            tile.flagged = false;
            let mined = tile.mine;
            self.flag_count -= 1;
            if mined {
                self.found_count -= 1;
            }
            FlagOutcome::Unflagged
        } else {
            tile.flagged = true;
            let mined = tile.mine;
            self.flag_count += 1;
            if mined {
                self.found_count += 1;
            }
            FlagOutcome::Flagged
        }
    }

    /// Every mine flagged and nothing else flagged.
    pub fn is_won(&self) -> bool {
        self.found_count == self.mine_count && self.flag_count == self.found_count
    }

    /// Uncovers the whole board for the final frame. Flags stay set; the
    /// view gives the revealed state precedence.
    pub fn reveal_all(&mut self) {
        for tile in &mut self.tiles {
            tile.revealed = true;
        }
    }

    /// What the renderer gets to see at `pos`.
    pub fn view(&self, pos: Pos) -> TileView {
        let tile = self.tile(pos);
        if tile.revealed {
            if tile.mine {
                TileView::Mine
            } else {
                match self.adjacent_mines(pos) {
                    0 => TileView::Blank,
                    n => TileView::Adjacent(n),
                }
            }
        } else if tile.flagged {
            TileView::Flagged
        } else {
            TileView::Concealed
        }
    }
}

/// Drives a [`Board`] through the command state machine.
pub struct Game {
    pub board: Board,
    status: Status,
}

impl Game {
    pub fn new(params: GameParams, seed: Option<u64>) -> Self {
        Self {
            board: Board::new(params, seed),
            status: Status::Playing,
        }
    }

    pub fn status(&self) -> Status {
        self.status
    }

    /// Applies one parsed command.
    ///
    /// Once a terminal [`Step`] has been returned the loop is expected to
    /// stop; a command that arrives anyway does nothing.
    pub fn command(&mut self, command: Command) -> Step {
        if self.status != Status::Playing {
            return Step::Render;
        }
        match command {
            Command::Empty => Step::Render,
            Command::Help => Step::Help,
            Command::Quit => {
                if self.board.initialized {
                    Step::ConfirmQuit
                } else {
                    self.quit()
                }
            }
            Command::Reveal(pos) => self.reveal(pos),
            Command::Flag(pos) => self.flag(pos),
        }
    }

    /// Ends the session as quit and uncovers the board for the final frame.
    /// Quitting before the first action still gets a freshly mined board to
    /// look at.
    pub fn quit(&mut self) -> Step {
        self.board.place_mines();
        self.finish(Status::Quit);
        Step::Quit
    }

    /// Final score. Rewards partial flagging progress even on a loss or a
    /// quit.
    pub fn score(&self) -> usize {
        self.board.found_count * self.board.found_count * 1000
            / (self.board.width * self.board.height)
    }

    fn reveal(&mut self, pos: Pos) -> Step {
        if !self.board.initialized {
            self.board.place_mines();
            // The opening reveal must not be an instant loss.
            self.board.relocate_if_mined(pos);
        }
        if self.board.tile(pos).flagged {
            return Step::Blocked;
        }
        match self.board.reveal(pos) {
            RevealOutcome::Mine => {
                self.finish(Status::Lost);
                Step::Lost
            }
            RevealOutcome::Opened => Step::Render,
        }
    }

    fn flag(&mut self, pos: Pos) -> Step {
        // Flag-triggered initialization never relocates: flagging does not
        // buy a safe first reveal.
        self.board.place_mines();
        if self.board.toggle_flag(pos) != FlagOutcome::Ignored && self.board.is_won() {
            self.finish(Status::Won);
            return Step::Won;
        }
        Step::Render
    }

    fn finish(&mut self, status: Status) {
        self.status = status;
        self.board.reveal_all();
        info!(?status, score = self.score(), "game over");
    }
}
