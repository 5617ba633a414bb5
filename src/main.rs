//! Checkers-Rust: play checkers in a terminal.
//!
//! ## Usage
//!
//! - `checkers-rust` - Human (White) against the computer (Black)
//! - `checkers-rust play --white random --black random` - Watch a game
//! - `checkers-rust selfplay --games 20` - Run random games without a clock

use std::io;
use std::time::Duration;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand, ValueEnum};

use checkers_rust::board::Board;
use checkers_rust::constants::{DEFAULT_COLS, DEFAULT_ROWS, MAX_HEADLESS_TICKS, TICK_SECONDS};
use checkers_rust::driver::{run, run_headless};
use checkers_rust::game::{Game, GameOptions, Player};
use checkers_rust::piece::Side;
use checkers_rust::player::{HumanInput, HumanPlayer, RandomPlayer};
use checkers_rust::terminal::TerminalFrontend;

/// Checkers-Rust: play checkers against the computer
#[derive(Parser)]
#[command(name = "checkers-rust")]
#[command(author, version, about, long_about = None)]
#[command(args_conflicts_with_subcommands = true)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    #[command(flatten)]
    play: PlayArgs,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a game in the terminal (the default)
    Play(PlayArgs),
    /// Play random games against each other and report the results
    Selfplay(SelfplayArgs),
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
enum PlayerKind {
    /// Moves typed in the terminal
    Human,
    /// Uniformly random legal moves
    Random,
}

#[derive(Args)]
struct PlayArgs {
    /// Size of the board
    #[arg(long, num_args = 2, value_names = ["COLS", "ROWS"], default_values_t = [DEFAULT_COLS, DEFAULT_ROWS])]
    board_size: Vec<i32>,

    /// Who plays White. White always moves first.
    #[arg(long, value_enum, default_value_t = PlayerKind::Human)]
    white: PlayerKind,

    /// Who plays Black.
    #[arg(long, value_enum, default_value_t = PlayerKind::Random)]
    black: PlayerKind,

    /// Seed for the random players
    #[arg(long)]
    seed: Option<u64>,

    /// Report turns and moves on stderr
    #[arg(long)]
    verbose: bool,
}

#[derive(Args)]
struct SelfplayArgs {
    /// Number of games to play
    #[arg(long, default_value_t = 10)]
    games: u32,

    /// Size of the board
    #[arg(long, num_args = 2, value_names = ["COLS", "ROWS"], default_values_t = [DEFAULT_COLS, DEFAULT_ROWS])]
    board_size: Vec<i32>,

    /// Seed for the first game; later games use the following seeds
    #[arg(long, default_value_t = 1)]
    seed: u64,

    /// Give up on a game after this many ticks
    #[arg(long, default_value_t = MAX_HEADLESS_TICKS)]
    max_ticks: u64,

    /// Report turns and moves on stderr
    #[arg(long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Play(args)) => play(args),
        Some(Commands::Selfplay(args)) => selfplay(args),
        None => play(cli.play),
    }
}

fn make_board(size: &[i32]) -> Result<Board> {
    let &[cols, rows] = size else {
        bail!("--board-size takes exactly two values");
    };
    Board::new(cols, rows).context("cannot create board")
}

fn make_player(
    kind: PlayerKind,
    side: Side,
    seed: u64,
    humans: &mut Vec<HumanInput>,
) -> Box<dyn Player> {
    match kind {
        PlayerKind::Human => {
            let player = HumanPlayer::new(side);
            humans.push(player.input());
            Box::new(player)
        }
        PlayerKind::Random => Box::new(RandomPlayer::new(side, seed)),
    }
}

fn play(args: PlayArgs) -> Result<()> {
    let board = make_board(&args.board_size)?;
    let seed = args.seed.unwrap_or_else(|| fastrand::u64(..));

    let mut humans = Vec::new();
    let white = make_player(args.white, Side::White, seed, &mut humans);
    let black = make_player(args.black, Side::Black, seed.wrapping_add(1), &mut humans);

    let options = GameOptions {
        first: Side::White,
        verbose: args.verbose,
    };
    let mut game = Game::new(board, white, black, options);

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut frontend = TerminalFrontend::new(stdin.lock(), stdout.lock(), humans);
    let winner = run(&mut game, &mut frontend, Duration::from_secs_f64(TICK_SECONDS))?;

    println!("{winner} won after {} moves.", game.state().moves_played());
    Ok(())
}

fn selfplay(args: SelfplayArgs) -> Result<()> {
    let mut wins = [0u32; 2];
    let mut unfinished = 0u32;

    for i in 0..args.games {
        let seed = args.seed.wrapping_add(2 * i as u64);
        let options = GameOptions {
            first: Side::White,
            verbose: args.verbose,
        };
        let mut game = Game::new(
            make_board(&args.board_size)?,
            Box::new(RandomPlayer::instant(Side::White, seed)),
            Box::new(RandomPlayer::instant(Side::Black, seed.wrapping_add(1))),
            options,
        );

        match run_headless(&mut game, args.max_ticks)? {
            Some(winner) => {
                wins[winner.index()] += 1;
                println!(
                    "game {}: {winner} won after {} moves",
                    i + 1,
                    game.state().moves_played()
                );
            }
            None => {
                unfinished += 1;
                println!("game {}: no result after {} ticks", i + 1, args.max_ticks);
            }
        }
    }

    println!(
        "White {} - Black {} ({} unfinished)",
        wins[Side::White.index()],
        wins[Side::Black.index()],
        unfinished
    );
    Ok(())
}
