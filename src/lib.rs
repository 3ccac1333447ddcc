//! Y-MCTS: a Monte-Carlo move generator for the game of Y.
//!
//! Y is a connection game on a triangular grid: a player wins by forming
//! one group of stones touching all three edges of the triangle. This
//! crate decides, given a position, which cell to play next, combining
//! an incremental union-find connectivity tracker, miai (bridge) reply
//! maintenance, randomized playouts, and a UCT tree that proves forced
//! wins and losses.
//!
//! ## Modules
//!
//! - [`constants`] - Board geometry, offset tables, search parameters
//! - [`connect`] - Disjoint-set forest and the win predicate
//! - [`board`] - Position state, stone placement, bridge maintenance
//! - [`shuffle`] - Seeded interval shuffling
//! - [`playout`] - Randomized full-game simulation
//! - [`mcts`] - UCT tree with win/loss proofs
//! - [`genmove`] - Move selectors (`rand_move`, `monte_carlo`, `uct_move`)
//!
//! ## Example
//!
//! ```
//! use y_mcts::board::{Board, Move, cell_name};
//! use y_mcts::constants::{BLACK, WHITE, fatten};
//! use y_mcts::genmove::uct_move;
//!
//! let mut rng = fastrand::Rng::with_seed(7);
//! let mut board = Board::new();
//!
//! // Black takes the top-left corner
//! board.place(Move::new(BLACK, fatten(0, 0)), true, &mut rng);
//!
//! // Search for White's reply
//! let best = uct_move(&board, WHITE, true, 200, &mut rng);
//! println!("White plays {}", cell_name(best));
//! ```

pub mod board;
pub mod connect;
pub mod constants;
pub mod genmove;
pub mod mcts;
pub mod playout;
pub mod shuffle;
