//! Bogorps - Rock Paper Scissors in the terminal
//!
//! A thin presentation layer: every line read from stdin becomes a call into
//! the match engine, and each result is rendered through a `Scoreboard`.

mod command;

use std::io::{self, BufRead, Write};

use match_engine::{MatchEngine, RoundObserver, Scoreboard};
use tracing::{info, Level};

use command::{Command, HELP};

fn main() -> io::Result<()> {
    // Logs go to stderr so they never interleave with the game screen
    tracing_subscriber::fmt()
        .with_max_level(Level::INFO)
        .with_writer(io::stderr)
        .with_target(false)
        .init();

    info!("Starting Bogorps");

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    run(stdin.lock(), &mut stdout)?;

    info!("Session over");
    Ok(())
}

/// Drive one session until `quit` or end of input
fn run<I: BufRead, O: Write>(input: I, out: &mut O) -> io::Result<()> {
    let mut engine = MatchEngine::new();
    let mut board = Scoreboard::new();

    writeln!(out, "Bogorps\n{}\n", HELP)?;
    render(out, &board)?;

    for line in input.lines() {
        let line = line?;
        let command = match Command::parse(&line) {
            None => continue,
            Some(Ok(command)) => command,
            Some(Err(e)) => {
                writeln!(out, "{}", e)?;
                continue;
            }
        };

        match command {
            Command::Play(user_move) => {
                let result = engine.play_round(user_move);
                board.on_round(&result, engine.tally());
                render(out, &board)?;
            }
            Command::Reset => {
                engine.reset();
                board.on_reset();
                render(out, &board)?;
            }
            Command::Score => {
                writeln!(out, "{} after {} rounds", engine.tally(), engine.rounds_played())?;
            }
            Command::Help => writeln!(out, "{}", HELP)?,
            Command::Quit => break,
        }
    }

    Ok(())
}

fn render<O: Write>(out: &mut O, board: &Scoreboard) -> io::Result<()> {
    writeln!(out, "{}", board.headline)?;
    writeln!(out, "{}\n", board.counters().join("   "))?;
    out.flush()
}
