//! Y-MCTS driver: a thin command-line front end over the engine.
//!
//! ## Usage
//!
//! - `y-mcts` - Show a short demo
//! - `y-mcts demo` - Same
//! - `y-mcts selfplay` - Engine plays itself from the empty board
//! - `y-mcts play b a1 w b2 ...` - Replay moves, then search for the
//!   next player's best cell

use anyhow::{Result, bail};
use clap::{Parser, Subcommand, ValueEnum};

use y_mcts::board::{Board, Move, cell_name, parse_cell};
use y_mcts::connect::has_win;
use y_mcts::constants::{BLACK, DEFAULT_ROLLOUTS, EMPTY, TOTAL_CELLS, WHITE, color_char, opponent};
use y_mcts::genmove::{monte_carlo, rand_move, uct_move};

/// Y-MCTS: a Monte-Carlo move generator for the game of Y
#[derive(Parser)]
#[command(name = "y-mcts")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Copy, Clone, Debug, ValueEnum)]
enum Selector {
    /// UCT tree search
    Uct,
    /// Flat Monte-Carlo
    Mc,
    /// Uniform random (baseline)
    Rand,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a short demonstration of the engine
    Demo,
    /// Let the engine play a full game against itself
    Selfplay {
        /// Playouts per move
        #[arg(long, default_value_t = DEFAULT_ROLLOUTS)]
        rollouts: usize,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
        /// Disable bridge (miai) maintenance
        #[arg(long)]
        no_miai: bool,
        /// Move selector
        #[arg(long, value_enum, default_value = "uct")]
        selector: Selector,
    },
    /// Replay a move list ("b a1 w b2 ..."), then search for the side to move
    Play {
        /// Alternating color/cell tokens
        tokens: Vec<String>,
        /// Playouts for the final search
        #[arg(long, default_value_t = DEFAULT_ROLLOUTS)]
        rollouts: usize,
        /// RNG seed; random when omitted
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Demo) | None => run_demo(),
        Some(Commands::Selfplay {
            rollouts,
            seed,
            no_miai,
            selector,
        }) => run_selfplay(rollouts, seed, !no_miai, selector),
        Some(Commands::Play {
            tokens,
            rollouts,
            seed,
        }) => run_play(&tokens, rollouts, seed),
    }
}

fn make_rng(seed: Option<u64>) -> fastrand::Rng {
    match seed {
        Some(s) => fastrand::Rng::with_seed(s),
        None => fastrand::Rng::new(),
    }
}

fn run_demo() -> Result<()> {
    println!("Y-MCTS: Monte-Carlo move generation for the game of Y\n");
    let mut rng = fastrand::Rng::with_seed(1);
    let mut board = Board::new();

    let opening = ["c3", "d5"];
    for (i, name) in opening.iter().enumerate() {
        let s = if i % 2 == 0 { BLACK } else { WHITE };
        let Some(lcn) = parse_cell(name) else {
            bail!("bad demo cell {name}");
        };
        board.place(Move::new(s, lcn), true, &mut rng);
    }
    println!("{board}");

    println!("Running 400 flat Monte-Carlo playouts for black...");
    let (mc_cell, summary) = monte_carlo(&board, BLACK, true, false, 400, &mut rng);
    println!("{summary}");
    println!("monte_carlo suggests {}\n", cell_name(mc_cell));

    println!("Running 400 UCT iterations for black...");
    let uct_cell = uct_move(&board, BLACK, true, 400, &mut rng);
    println!("uct_move suggests {}", cell_name(uct_cell));
    Ok(())
}

fn run_selfplay(rollouts: usize, seed: Option<u64>, use_miai: bool, selector: Selector) -> Result<()> {
    let mut rng = make_rng(seed);
    let mut board = Board::new();
    let mut history: Vec<Move> = Vec::new();
    let mut to_play = BLACK;

    for _ in 0..TOTAL_CELLS {
        let lcn = match selector {
            Selector::Uct => uct_move(&board, to_play, use_miai, rollouts, &mut rng),
            Selector::Mc => {
                let (cell, summary) = monte_carlo(&board, to_play, use_miai, false, rollouts, &mut rng);
                println!("{summary}");
                cell
            }
            Selector::Rand => rand_move(&board, &mut rng),
        };
        let placed = board.place(Move::new(to_play, lcn), use_miai, &mut rng);
        history.push(Move::new(to_play, lcn));
        if placed.opp_reply != lcn {
            // the move broke an opponent bridge; recompute their connectivity
            board.rebuild_from_history(opponent(to_play), &history, use_miai, &mut rng);
        }
        println!("play {} {}", color_char(to_play), cell_name(lcn));
        println!("{board}");
        if has_win(placed.edges) {
            let solid = board.solid_edges(to_play, &history, &mut rng);
            if has_win(solid) {
                println!(" {} wins", color_char(to_play));
            } else {
                println!(" {} can win (bridges decide)", color_char(to_play));
            }
            return Ok(());
        }
        to_play = opponent(to_play);
    }
    bail!("board filled without a winner; connectivity is broken")
}

fn run_play(tokens: &[String], rollouts: usize, seed: Option<u64>) -> Result<()> {
    if tokens.len() % 2 != 0 {
        bail!("expected alternating color/cell tokens, got {}", tokens.len());
    }
    let mut rng = make_rng(seed);
    let mut board = Board::new();
    let mut history: Vec<Move> = Vec::new();
    let mut last_color = WHITE;
    for pair in tokens.chunks(2) {
        let s = match pair[0].as_str() {
            "b" | "black" => BLACK,
            "w" | "white" => WHITE,
            other => bail!("unknown color {other:?}"),
        };
        let Some(lcn) = parse_cell(&pair[1]) else {
            bail!("bad cell name {:?}", pair[1]);
        };
        if board.color[lcn] != EMPTY {
            bail!("cell {} is occupied", pair[1]);
        }
        let placed = board.place(Move::new(s, lcn), true, &mut rng);
        history.push(Move::new(s, lcn));
        if placed.opp_reply != lcn {
            board.rebuild_from_history(opponent(s), &history, true, &mut rng);
        }
        if has_win(placed.edges) {
            println!("{board}");
            println!(" {} already wins", color_char(s));
            return Ok(());
        }
        last_color = s;
    }
    let to_play = opponent(last_color);
    println!("{board}");
    let best = uct_move(&board, to_play, true, rollouts, &mut rng);
    println!("genmove {} {}", color_char(to_play), cell_name(best));
    Ok(())
}
