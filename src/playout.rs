//! Randomized playouts (full-game simulation).
//!
//! A playout walks a shuffled list of the empty cells, placing stones for
//! alternating colors until one group touches all three borders. Y has no
//! draws, so every playout ends with a winner in at most one pass over
//! the list.
//!
//! With miai enabled, a move that lands on an opponent carrier schedules
//! the opponent's committed reply as the very next cell, instead of
//! resuming random selection: the reply is provably forced, so the swap
//! speeds convergence without biasing the result.

use fastrand::Rng;

use crate::board::{Board, Move};
use crate::constants::*;

/// Playout state shared across repeated runs from one root position: the
/// available-cell list plus per-cell and per-color win statistics.
pub struct Playout {
    /// Empty cells of the root position; a run plays a prefix of it.
    pub avail: Vec<Cell>,
    /// Playout wins keyed by the winning (final) cell.
    pub wins: [u32; TOTAL_FAT_CELLS],
    /// As `wins`, split by winning color.
    pub wins_bw: [[u32; TOTAL_FAT_CELLS]; 2],
    /// Wins per color.
    pub color_score: [u32; 2],
    /// Sum over wins of the number of stones in the winning game.
    pub win_length: [u32; 2],
}

impl Playout {
    /// Collect the empty cells of `b`.
    pub fn new(b: &Board) -> Self {
        let mut avail = Vec::with_capacity(TOTAL_CELLS);
        for r in 0..N {
            for c in 0..N - r {
                let lcn = fatten(r, c);
                if b.color[lcn] == EMPTY {
                    avail.push(lcn);
                }
            }
        }
        Playout {
            avail,
            wins: [0; TOTAL_FAT_CELLS],
            wins_bw: [[0; TOTAL_FAT_CELLS]; 2],
            color_score: [0; 2],
            win_length: [0; 2],
        }
    }

    /// Play one full game on `b`, starting with `first` to move, walking
    /// `avail` in order. Returns the winner and the number of stones
    /// placed; `avail[plies - 1]` is the winning cell.
    ///
    /// The caller shuffles `avail` between runs and passes a fresh clone
    /// of the root board.
    pub fn single_playout(
        &mut self,
        b: &mut Board,
        first: u8,
        use_miai: bool,
        rng: &mut Rng,
    ) -> (u8, usize) {
        debug_assert!(!self.avail.is_empty());
        let mut turn = opponent(first);
        let mut k = 0;
        let mut bd_set = BRDR_NIL;
        while bd_set != BRDR_ALL {
            turn = opponent(turn);
            let lcn = self.avail[k];
            debug_assert_eq!(b.color[lcn], EMPTY);
            let placed = b.place(Move::new(turn, lcn), use_miai, rng);
            bd_set = placed.edges;
            if placed.opp_reply != lcn {
                // hit an opponent carrier: their reply is forced, so it
                // becomes the next cell played
                let resp = placed.opp_reply;
                let z = self.avail[k + 1..].iter().position(|&a| a == resp);
                debug_assert!(z.is_some(), "committed reply cell must still be available");
                if let Some(i) = z {
                    self.avail.swap(k + 1, k + 1 + i);
                }
            }
            k += 1;
        }
        (turn, k)
    }
}
