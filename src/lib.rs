//! Board engine and command interpreter for a terminal mine-finding game.
//!
//! The core lives in [`logic`]: a lazily mined [`data::Board`] driven by the
//! [`logic::Game`] state machine, one parsed [`model::Command`] at a time.
//! Everything user-facing (argument parsing, board printing, line input) sits
//! in [`ui`] and the binary, behind narrow contracts.
//!
//! ```
//! use mines::logic::{Game, Status, Step};
//! use mines::model::{Command, GameParams};
//!
//! let params = GameParams { width: 2, height: 1, mines: 0 };
//! let mut game = Game::new(params, Some(7));
//!
//! let command = Command::parse("a1", params.width, params.height).unwrap();
//! assert_eq!(game.command(command), Step::Render);
//! assert_eq!(game.status(), Status::Playing);
//! ```

pub mod data;
pub mod logic;
pub mod model;
pub mod ui;
