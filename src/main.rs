//! The Black entry point
//!
//! On the web the puzzle is driven from JavaScript through `the_black::web`.
//! Natively this runs a small text front end on stdin/stdout.

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("The Black (native) starting...");

    if let Err(e) = native::run() {
        log::error!("{}", e);
        std::process::exit(1);
    }
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is the_black::web::start, this is just to satisfy the compiler
}

#[cfg(not(target_arch = "wasm32"))]
mod native {
    use std::error::Error;
    use std::io::{self, BufRead, Write};
    use std::time::Instant;

    use the_black::{GridSize, PuzzlePhase, Session, Settings, clock_seed};

    enum Command {
        Toggle(usize, usize),
        New(Option<GridSize>),
        Quit,
    }

    fn parse(line: &str) -> Option<Command> {
        let mut words = line.split_whitespace();
        match words.next()? {
            "quit" | "q" => Some(Command::Quit),
            "new" | "n" => match words.next() {
                Some(size) => GridSize::from_str(size).map(|g| Command::New(Some(g))),
                None => Some(Command::New(None)),
            },
            first => {
                let row = first.parse().ok()?;
                let col = words.next()?.parse().ok()?;
                Some(Command::Toggle(row, col))
            }
        }
    }

    fn show(session: &Session) {
        print!("{}", session.board());
        match session.phase() {
            PuzzlePhase::InProgress => println!(
                "{}s left, {} moves",
                session.remaining_seconds(),
                session.moves()
            ),
            PuzzlePhase::Solved => println!("All black! Type `new` to play again."),
            PuzzlePhase::TimedOut => println!("Time's up! Type `new` to play again."),
        }
    }

    pub fn run() -> Result<(), Box<dyn Error>> {
        let mut settings = Settings::load();
        let mut session = Session::new(settings.grid_size.dimension(), clock_seed())?;
        let mut last = Instant::now();

        println!("Commands: <row> <col> | new [3|4] | quit");
        show(&session);
        io::stdout().flush()?;

        for line in io::stdin().lock().lines() {
            let line = line?;
            let now = Instant::now();
            let mut events = session.advance(now.duration_since(last).as_secs_f32());
            last = now;

            match parse(&line) {
                Some(Command::Quit) => break,
                Some(Command::New(size)) => {
                    if let Some(size) = size {
                        settings.grid_size = size;
                        settings.save();
                    }
                    session.restart(settings.grid_size.dimension(), clock_seed())?;
                }
                Some(Command::Toggle(row, col)) => match session.toggle(row, col) {
                    Ok(more) => events.extend(more),
                    Err(e) => println!("{}", e),
                },
                None => println!("Unrecognized command: {}", line.trim()),
            }

            for event in &events {
                log::debug!("{:?}", event);
            }
            show(&session);
            io::stdout().flush()?;
        }

        Ok(())
    }

    #[cfg(test)]
    mod tests {
        use super::*;

        #[test]
        fn test_parse_commands() {
            assert!(matches!(parse("1 2"), Some(Command::Toggle(1, 2))));
            assert!(matches!(parse("new 4"), Some(Command::New(Some(GridSize::FourByFour)))));
            assert!(matches!(parse("new"), Some(Command::New(None))));
            assert!(matches!(parse("quit"), Some(Command::Quit)));
            assert!(parse("new 9").is_none());
            assert!(parse("1").is_none());
            assert!(parse("a b").is_none());
            assert!(parse("").is_none());
        }

        #[test]
        fn test_solved_event_reaches_front_end() {
            use the_black::{Board, Coord, PuzzleEvent};
            let board = Board::from_black_cells(
                3,
                &[Coord::new(0, 0), Coord::new(0, 2), Coord::new(2, 0), Coord::new(2, 2)],
            )
            .unwrap();
            let mut session = Session::from_board(board, 0);
            let events = session.toggle(1, 1).unwrap();
            assert!(events.contains(&PuzzleEvent::Solved));
        }
    }
}
