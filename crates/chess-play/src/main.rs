//! Play chess against a computer that picks random pseudo-legal moves.
//!
//! Enter moves as origin and destination squares (`e2e4`); enter `0` to
//! stop. Only pawns and knights can move in this engine.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use chess_core::Color;
use chess_play::{parse_player_color, Command, PlayConfig, Session};
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;

/// Play against the random computer player.
#[derive(Parser)]
#[command(name = "chess-play")]
#[command(about = "Play against a computer that picks random pseudo-legal moves")]
struct Args {
    /// Path to the TOML configuration file
    #[arg(long, default_value = PlayConfig::FILE_NAME)]
    config: PathBuf,

    /// Color you play: w or b
    #[arg(long)]
    color: Option<String>,

    /// FEN to start from instead of the standard starting position
    #[arg(long)]
    fen: Option<String>,

    /// Seed for the computer player
    #[arg(long)]
    seed: Option<u64>,

    /// Print occupancy bitboards after every move
    #[arg(long)]
    show_bitboards: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_writer(io::stderr).init();
    let args = Args::parse();

    let mut config = PlayConfig::load(&args.config)?;
    if args.color.is_some() {
        config.player_color = args.color;
    }
    if args.fen.is_some() {
        config.start_fen = args.fen;
    }
    if args.seed.is_some() {
        config.seed = args.seed;
    }
    config.show_bitboards |= args.show_bitboards;

    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    let player_color = match config.player_color()? {
        Some(color) => color,
        None => match ask_player_color(&mut lines)? {
            Some(color) => color,
            None => return Ok(()),
        },
    };

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let mut session = Session::new(config.start_position()?, player_color, rng);
    print_position(&session, config.show_bitboards);

    loop {
        if session.is_player_turn() {
            print!("Please, enter the next move: ");
            io::stdout().flush()?;
            let Some(line) = lines.next() else {
                break;
            };
            let mv = match Command::parse(&line?) {
                Ok(Command::Quit) => break,
                Ok(Command::Play(mv)) => mv,
                Err(e) => {
                    tracing::warn!(error = %e, "unreadable move");
                    eprintln!("Error: {}", e);
                    continue;
                }
            };
            if let Err(e) = session.play_human(mv) {
                tracing::warn!(error = %e, mv = %mv, "move refused");
                eprintln!("Error: {}", e);
                continue;
            }
        } else {
            match session.play_computer() {
                Ok(played) => println!("Computer plays {}", played.mv),
                Err(e) => {
                    eprintln!("Error: {}", e);
                    break;
                }
            }
        }
        print_position(&session, config.show_bitboards);
    }

    tracing::info!(moves = session.history().len(), "game over");
    Ok(())
}

/// Prompts until a valid color is entered. Returns `None` at end of input.
fn ask_player_color(
    lines: &mut impl Iterator<Item = io::Result<String>>,
) -> anyhow::Result<Option<Color>> {
    loop {
        print!("Choose your color (w/b): ");
        io::stdout().flush()?;
        let Some(line) = lines.next() else {
            return Ok(None);
        };
        match parse_player_color(&line?) {
            Ok(color) => return Ok(Some(color)),
            Err(_) => eprintln!("Wrong input!"),
        }
    }
}

fn print_position<R>(session: &Session<R>, show_bitboards: bool) {
    let position = session.position();
    println!("{}", position);
    println!("{}", position.to_fen());
    if show_bitboards {
        for color in Color::ALL {
            println!("{} pieces:", color);
            println!("{:?}", position.colors[color.index()]);
        }
    }
}
