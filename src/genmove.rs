//! Move selectors: uniform random, flat Monte-Carlo, and UCT.
//!
//! Each selector takes the position, the color to move, and an explicit
//! playout budget, and returns the chosen cell. The selectors never print;
//! `monte_carlo` also returns a [`SearchSummary`] the driver can display.

use std::fmt;

use fastrand::Rng;

use crate::board::Board;
use crate::constants::*;
use crate::mcts::{ROOT, Tree};
use crate::playout::Playout;
use crate::shuffle::shuffle_interval;

/// `n / d`, saturating to infinity on an empty denominator.
pub fn ratio(n: u32, d: u32) -> f32 {
    if d == 0 { Y_INFINITY } else { n as f32 / d as f32 }
}

/// Zero-sum position score from playout statistics: win probability plus
/// the difference of mean win lengths (faster wins score higher).
pub fn score(wins: u32, opp_wins: u32, sum_lengths: u32, opp_sum_lengths: u32, rollouts: usize) -> f32 {
    if wins == 0 {
        return -Y_INFINITY;
    }
    if opp_wins == 0 {
        return Y_INFINITY;
    }
    -0.5 + wins as f32 / rollouts as f32 + opp_sum_lengths as f32 / opp_wins as f32
        - sum_lengths as f32 / wins as f32
}

/// Aggregate result of a `monte_carlo` search, from the point of view of
/// the color searched for.
#[derive(Copy, Clone, Debug)]
pub struct SearchSummary {
    pub color: u8,
    pub rollouts: usize,
    pub wins: u32,
    pub opp_wins: u32,
    pub win_lengths: u32,
    pub opp_win_lengths: u32,
}

impl SearchSummary {
    pub fn win_rate(&self) -> f32 {
        self.wins as f32 / self.rollouts as f32
    }

    pub fn score(&self) -> f32 {
        score(
            self.wins,
            self.opp_wins,
            self.win_lengths,
            self.opp_win_lengths,
            self.rollouts,
        )
    }
}

impl fmt::Display for SearchSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} wins {:.2}   length {:2.2} (oppt {:2.2})   score {:2.2}",
            color_char(self.color),
            self.win_rate(),
            ratio(self.win_lengths, self.wins),
            ratio(self.opp_win_lengths, self.opp_wins),
            self.score()
        )
    }
}

/// Index of the first maximum.
fn index_of_max(xs: &[u32]) -> usize {
    let mut best = 0;
    for (j, &x) in xs.iter().enumerate() {
        if x > xs[best] {
            best = j;
        }
    }
    best
}

/// A uniformly random empty cell.
pub fn rand_move(b: &Board, rng: &mut Rng) -> Cell {
    let pl = Playout::new(b);
    debug_assert!(!pl.avail.is_empty());
    pl.avail[rng.usize(..pl.avail.len())]
}

/// Flat Monte-Carlo selection: run `rollouts` playouts from `b` with `s`
/// to move and return the cell that most often ended a winning game,
/// plus the aggregate statistics.
///
/// With `accelerate`, cells that won earlier playouts stay in a front
/// sublist that is reshuffled separately, so proven finishers are retried
/// early while the remainder is still fully shuffled. A cheap stateful
/// bias, not correctness-critical.
pub fn monte_carlo(
    b: &Board,
    s: u8,
    use_miai: bool,
    accelerate: bool,
    rollouts: usize,
    rng: &mut Rng,
) -> (Cell, SearchSummary) {
    let mut pl = Playout::new(b);
    debug_assert!(!pl.avail.is_empty());
    let count = pl.avail.len();
    // winners sublist: avail[0..num_winners]
    let mut num_winners = 0;
    let mut just_won = usize::MAX;
    shuffle_interval(&mut pl.avail, 0, count - 1, rng);
    for _ in 0..rollouts {
        let mut local = b.clone();
        if !accelerate {
            shuffle_interval(&mut pl.avail, 0, count - 1, rng);
        } else {
            if just_won != usize::MAX && just_won >= num_winners {
                // new winning cell joins the front; reshuffle the rest
                pl.avail.swap(num_winners, just_won);
                num_winners += 1;
                if num_winners < count {
                    shuffle_interval(&mut pl.avail, num_winners, count - 1, rng);
                }
            }
            if num_winners > 0 {
                shuffle_interval(&mut pl.avail, 0, num_winners - 1, rng);
            }
        }
        let (winner, plies) = pl.single_playout(&mut local, s, use_miai, rng);
        just_won = plies - 1;
        if just_won == 1 {
            // the opponent's immediate reply refuted our opening cell
            pl.wins[pl.avail[0]] = 0;
        }
        pl.color_score[ndx(winner)] += 1;
        pl.win_length[ndx(winner)] += plies as u32;
        pl.wins[pl.avail[just_won]] += 1;
        pl.wins_bw[ndx(winner)][pl.avail[just_won]] += 1;
    }
    let summary = SearchSummary {
        color: s,
        rollouts,
        wins: pl.color_score[ndx(s)],
        opp_wins: pl.color_score[ndx(opponent(s))],
        win_lengths: pl.win_length[ndx(s)],
        opp_win_lengths: pl.win_length[ndx(opponent(s))],
    };
    (index_of_max(&pl.wins), summary)
}

/// UCT selection: run up to `rollouts` tree iterations from `b` with `s`
/// to move. Returns as soon as some root child is a proven loss for the
/// opponent (a forced win), else the most-visited child.
pub fn uct_move(b: &Board, s: u8, use_miai: bool, rollouts: usize, rng: &mut Rng) -> Cell {
    let mut tree = Tree::new();
    tree.expand(ROOT, b);
    for _ in 0..rollouts {
        let mut local = b.clone();
        tree.descend(ROOT, &mut local, s, use_miai, rng);
        if let Some(lcn) = tree.winning_child(ROOT) {
            return lcn;
        }
    }
    tree.best_move(ROOT)
}
