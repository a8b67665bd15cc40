//! Terminal surface of the game: board printing, line input and help text.
//! The core never prints; everything user-visible flows through here.

use std::io::{self, BufRead, Write};

use crate::{data::Board, model::Pos};

const HELP: &str = "\
The purpose of this game is to flag all the mines hidden under tiles on the
board. You must flag the correct tiles, and nothing more, to win. If a tile
has one or more mines adjacent or immediately diagonal, it is displayed as
that number from 1 to 8. Try to reveal tiles which you know to be safe to
isolate the mines.

Commands are used to interact with the program. A command is an optional
lowercase letter followed by an optional position. A position is a capital
letter indicating a column followed by a positive integer indicating a row.
These quantities must fit within the board.

Commands:
  <nothing>    Perform no action and print out the board.
  r<position>  Reveal <position>. If a mine is there, you're dead.
  <position>   Same as r<position>.
  f<position>  Toggle the flag at <position>. Nothing happens if the tile is
               already revealed.
  ?            Print this help information.
  q            Quit the game. You will have to confirm your quitting unless
               you have yet to perform any action.
";

/// Prints the separator and the bordered board, flag tally included.
pub fn draw_board(board: &Board, separator: &str, out: &mut impl Write) -> io::Result<()> {
    write!(out, "{separator}")?;
    draw_column_names(board.width, out)?;
    draw_border(board.width, out)?;
    for y in 0..board.height {
        let row = y + 1;
        write!(out, "{row:2} |")?;
        for x in 0..board.width {
            write!(out, "`{}", board.view(Pos { x, y }).symbol())?;
        }
        writeln!(out, "`| {row}")?;
    }
    draw_border(board.width, out)?;
    draw_column_names(board.width, out)?;
    writeln!(out, "Flags: {}/{}", board.flag_count, board.mine_count)
}

fn draw_column_names(width: usize, out: &mut impl Write) -> io::Result<()> {
    write!(out, "    ")?;
    for x in 0..width {
        write!(out, " {}", (b'A' + x as u8) as char)?;
    }
    writeln!(out)
}

fn draw_border(width: usize, out: &mut impl Write) -> io::Result<()> {
    write!(out, "    -")?;
    for _ in 0..width {
        write!(out, " -")?;
    }
    writeln!(out)
}

pub fn print_help(out: &mut impl Write) -> io::Result<()> {
    writeln!(out, "\n{HELP}")
}

/// Reads the next input line with surrounding whitespace trimmed. `None`
/// means the input is exhausted.
pub fn read_command(input: &mut impl BufRead) -> io::Result<Option<String>> {
    let mut line = String::new();
    if input.read_line(&mut line)? == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// Asks for quit confirmation. Anything but a leading `y` keeps playing; end
/// of input counts as a yes so that a closed stdin always winds the game
/// down.
pub fn confirm_quit(input: &mut impl BufRead, out: &mut impl Write) -> io::Result<bool> {
    write!(out, "Are you sure you want to quit? [yN] ")?;
    out.flush()?;
    match read_command(input)? {
        None => Ok(true),
        Some(reply) => Ok(reply.chars().next().is_some_and(|c| c.eq_ignore_ascii_case(&'y'))),
    }
}
