use std::io::{self, Write};

use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use mines::{
    logic::{Game, Step},
    model::{Command, GameParams, MAX_HEIGHT, MAX_MINES, MAX_WIDTH},
    ui,
};

#[derive(Debug, Parser)]
#[command(version, about = "A mine finding game.")]
struct Args {
    /// Board width in columns
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=MAX_WIDTH as i64))]
    width: u16,

    /// Board height in rows
    #[arg(long, default_value_t = 20, value_parser = clap::value_parser!(u16).range(1..=MAX_HEIGHT as i64))]
    height: u16,

    /// Number of mines on the board, capped at the board area
    #[arg(long, default_value_t = 40, value_parser = clap::value_parser!(u16).range(0..=MAX_MINES as i64))]
    mines: u16,

    /// Text printed before each frame. ANSI escape sequences let you clear
    /// the screen between frames.
    #[arg(long, default_value = "\n\n\n\n")]
    separator: String,

    /// Fixed RNG seed for a reproducible game
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> io::Result<()> {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .init();

    let params = GameParams {
        width: args.width as usize,
        height: args.height as usize,
        mines: args.mines as usize,
    }
    .clamped();
    info!(
        width = params.width,
        height = params.height,
        mines = params.mines,
        seed = args.seed,
        "starting game"
    );

    let mut game = Game::new(params, args.seed);
    let mut input = io::stdin().lock();
    let mut out = io::stdout().lock();

    ui::draw_board(&game.board, &args.separator, &mut out)?;
    writeln!(out, "Type a command. For help, type '?' then ENTER.")?;

    loop {
        out.flush()?;
        let Some(line) = ui::read_command(&mut input)? else {
            // End of input is an implicit quit, no confirmation asked.
            game.quit();
            ui::draw_board(&game.board, &args.separator, &mut out)?;
            writeln!(out, "Game quit.")?;
            break;
        };
        let command = match Command::parse(&line, game.board.width, game.board.height) {
            Ok(command) => command,
            Err(_) => {
                writeln!(out, "Invalid command. Use command '?' for help.")?;
                continue;
            }
        };
        match game.command(command) {
            Step::Render => ui::draw_board(&game.board, &args.separator, &mut out)?,
            Step::Blocked => writeln!(out, "Unflag the space before you reveal it.")?,
            Step::Help => ui::print_help(&mut out)?,
            Step::ConfirmQuit => {
                if ui::confirm_quit(&mut input, &mut out)? {
                    game.quit();
                    ui::draw_board(&game.board, &args.separator, &mut out)?;
                    writeln!(out, "Game quit.")?;
                    break;
                }
            }
            Step::Won => {
                ui::draw_board(&game.board, &args.separator, &mut out)?;
                writeln!(out, "All mines found! You win!")?;
                break;
            }
            Step::Lost => {
                ui::draw_board(&game.board, &args.separator, &mut out)?;
                writeln!(out, "You hit a mine! Game over.")?;
                break;
            }
            Step::Quit => {
                ui::draw_board(&game.board, &args.separator, &mut out)?;
                writeln!(out, "Game quit.")?;
                break;
            }
        }
    }
    writeln!(out, "Score: {}", game.score())?;
    Ok(())
}
