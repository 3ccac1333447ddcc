//! Integration tests for y-mcts.
//!
//! These exercise the engine the way the search drives it: whole games,
//! incremental connectivity checked against from-scratch recomputation,
//! miai invariants over random move sequences, and proof soundness of
//! the UCT selectors.

use fastrand::Rng;

use y_mcts::board::{Board, Move, parse_cell};
use y_mcts::connect::{find, has_win};
use y_mcts::constants::*;
use y_mcts::genmove::{monte_carlo, rand_move, uct_move};
use y_mcts::playout::Playout;
use y_mcts::shuffle::shuffle_interval;

// =============================================================================
// Helper functions
// =============================================================================

/// Play a named move list with miai on, rebuilding the opponent's
/// connectivity whenever a move breaks one of their bridges, the way a
/// real driver does. Colors alternate starting with black.
fn play_named(moves: &[&str], rng: &mut Rng) -> (Board, Vec<Move>) {
    let mut b = Board::new();
    let mut history = Vec::new();
    for (i, name) in moves.iter().enumerate() {
        let s = if i % 2 == 0 { BLACK } else { WHITE };
        let lcn = parse_cell(name).unwrap_or_else(|| panic!("bad cell {}", name));
        assert_eq!(b.color[lcn], EMPTY, "illegal move {} in fixture", name);
        let placed = b.place(Move::new(s, lcn), true, rng);
        history.push(Move::new(s, lcn));
        if placed.opp_reply != lcn {
            b.rebuild_from_history(opponent(s), &history, true, rng);
        }
    }
    (b, history)
}

/// All empty cells of the playable triangle.
fn empties(b: &Board) -> Vec<Cell> {
    let mut out = Vec::new();
    for r in 0..N {
        for c in 0..N - r {
            let lcn = fatten(r, c);
            if b.color[lcn] == EMPTY {
                out.push(lcn);
            }
        }
    }
    out
}

/// Border set of each occupied cell's group root, keyed by cell.
fn root_edges(b: &mut Board, s: u8) -> Vec<(Cell, u8)> {
    let mut out = Vec::new();
    for r in 0..N {
        for c in 0..N - r {
            let lcn = fatten(r, c);
            if b.color[lcn] == s {
                let root = find(&mut b.parent, lcn);
                out.push((lcn, b.edges[root]));
            }
        }
    }
    out
}

/// Rebuild the position's solid connectivity on a fresh board by placing
/// every stone again, miai off.
fn scratch_board(b: &Board) -> Board {
    let mut rng = Rng::with_seed(0);
    let mut fresh = Board::new();
    for r in 0..N {
        for c in 0..N - r {
            let lcn = fatten(r, c);
            if b.color[lcn] == BLACK || b.color[lcn] == WHITE {
                fresh.place(Move::new(b.color[lcn], lcn), false, &mut rng);
            }
        }
    }
    fresh
}

// =============================================================================
// Incremental connectivity vs. from-scratch recomputation
// =============================================================================

#[test]
fn test_incremental_edges_match_recomputation() {
    for seed in 0..6 {
        let mut rng = Rng::with_seed(seed);
        let mut b = Board::new();
        let mut turn = BLACK;
        for _ in 0..TOTAL_CELLS / 2 {
            let open = empties(&b);
            let lcn = open[rng.usize(..open.len())];
            b.place(Move::new(turn, lcn), false, &mut rng);
            let mut fresh = scratch_board(&b);
            for s in [BLACK, WHITE] {
                assert_eq!(
                    root_edges(&mut b, s),
                    root_edges(&mut fresh, s),
                    "seed {}: incremental and recomputed edge sets diverge",
                    seed
                );
            }
            turn = opponent(turn);
        }
    }
}

#[test]
fn test_zero_connectivity_replay_is_idempotent() {
    // black builds a bridge ladder in the interior while white plays a
    // far corner; no carrier is ever contested, so replaying black's
    // history with the same per-color rng stream reproduces the exact
    // incremental state
    let black_moves = [(2, 2), (3, 3), (4, 4)];
    let white_moves = [(7, 0), (7, 1), (7, 2)];
    let mut rng_b = Rng::with_seed(100);
    let mut rng_w = Rng::with_seed(200);
    let mut b = Board::new();
    let mut history = Vec::new();
    for i in 0..3 {
        let (r, c) = black_moves[i];
        let mv = Move::new(BLACK, fatten(r, c));
        b.place(mv, true, &mut rng_b);
        history.push(mv);
        let (r, c) = white_moves[i];
        let mv = Move::new(WHITE, fatten(r, c));
        b.place(mv, true, &mut rng_w);
        history.push(mv);
    }
    let before_edges = root_edges(&mut b, BLACK);
    let before_reply = b.reply[ndx(BLACK)];

    let mut replay_rng = Rng::with_seed(100);
    b.rebuild_from_history(BLACK, &history, true, &mut replay_rng);

    assert_eq!(before_edges, root_edges(&mut b, BLACK));
    assert_eq!(before_reply[..], b.reply[ndx(BLACK)][..]);
}

#[test]
fn test_break_separates_bridged_groups() {
    let mut rng = Rng::with_seed(12);
    let mut b = Board::new();
    b.place(Move::new(BLACK, fatten(2, 2)), true, &mut rng);
    b.place(Move::new(BLACK, fatten(3, 3)), true, &mut rng);
    let ra = find(&mut b.parent, fatten(2, 2));
    let rb = find(&mut b.parent, fatten(3, 3));
    assert_eq!(ra, rb, "bridged stones start unioned");

    // white takes a carrier; black's connectivity is stale until rebuilt
    let hit = b.place(Move::new(WHITE, fatten(3, 2)), true, &mut rng);
    assert_eq!(hit.opp_reply, fatten(2, 3));
    b.rebuild_from_stones(BLACK, true, &mut rng);
    let ra = find(&mut b.parent, fatten(2, 2));
    let rb = find(&mut b.parent, fatten(3, 3));
    assert_ne!(ra, rb, "a bridge with an occupied carrier no longer unions");
}

// =============================================================================
// Miai invariants over random games
// =============================================================================

#[test]
fn test_reply_tables_symmetric_and_carriers_empty() {
    for seed in 0..6 {
        let mut rng = Rng::with_seed(seed);
        let mut b = Board::new();
        let mut turn = BLACK;
        for _ in 0..TOTAL_CELLS - 1 {
            let open = empties(&b);
            if open.is_empty() {
                break;
            }
            let lcn = open[rng.usize(..open.len())];
            b.place(Move::new(turn, lcn), true, &mut rng);
            for s in [BLACK, WHITE] {
                for x in 0..TOTAL_FAT_CELLS {
                    let y = b.reply[ndx(s)][x];
                    if y != x {
                        assert_eq!(b.reply[ndx(s)][y], x, "seed {}: pairing asymmetric", seed);
                        assert_eq!(b.color[x], EMPTY, "seed {}: carrier occupied", seed);
                        assert_eq!(b.color[y], EMPTY, "seed {}: carrier occupied", seed);
                    }
                }
            }
            turn = opponent(turn);
        }
    }
}

// =============================================================================
// Game-end properties
// =============================================================================

#[test]
fn test_corner_stones_collect_two_edges_each() {
    let mut rng = Rng::with_seed(1);
    let mut b = Board::new();
    let corners = [
        (fatten(0, 0), BRDR_TOP | BRDR_LEFT),
        (fatten(0, N - 1), BRDR_TOP | BRDR_RIGHT),
        (fatten(N - 1, 0), BRDR_LEFT | BRDR_RIGHT),
    ];
    for (lcn, want) in corners {
        let placed = b.place(Move::new(BLACK, lcn), false, &mut rng);
        assert_eq!(placed.edges, want);
        assert!(!has_win(placed.edges), "two edges are not a win");
    }
}

#[test]
fn test_filled_board_has_exactly_one_winner() {
    for seed in 0..6 {
        let mut rng = Rng::with_seed(seed);
        let mut b = Board::new();
        let mut cells = empties(&b);
        let n = cells.len();
        shuffle_interval(&mut cells, 0, n - 1, &mut rng);
        let mut turn = BLACK;
        for &lcn in &cells {
            b.place(Move::new(turn, lcn), false, &mut rng);
            turn = opponent(turn);
        }
        let mut winners = 0;
        for s in [BLACK, WHITE] {
            if root_edges(&mut b, s).iter().any(|&(_, e)| e == BRDR_ALL) {
                winners += 1;
            }
        }
        assert_eq!(winners, 1, "seed {}: a full Y board has one winner", seed);
    }
}

#[test]
fn test_playout_terminates_from_midgame() {
    let mut rng = Rng::with_seed(21);
    let (b, _) = play_named(&["c3", "d4", "e5", "b2", "a1", "f6"], &mut rng);
    let open = empties(&b).len();
    for seed in 0..4 {
        let mut rng = Rng::with_seed(seed);
        let mut pl = Playout::new(&b);
        let n = pl.avail.len();
        shuffle_interval(&mut pl.avail, 0, n - 1, &mut rng);
        let mut local = b.clone();
        let (winner, plies) = pl.single_playout(&mut local, WHITE, true, &mut rng);
        assert!(winner == BLACK || winner == WHITE);
        assert!(plies <= open, "a playout never outlives the empty cells");
    }
}

// =============================================================================
// Move selectors
// =============================================================================

#[test]
fn test_selectors_return_legal_cells() {
    let mut rng = Rng::with_seed(31);
    let (b, _) = play_named(&["b2", "c3", "d4"], &mut rng);
    let r = rand_move(&b, &mut rng);
    assert_eq!(b.color[r], EMPTY);
    let (m, summary) = monte_carlo(&b, WHITE, true, false, 60, &mut rng);
    assert_eq!(b.color[m], EMPTY);
    assert_eq!(summary.wins + summary.opp_wins, 60);
    let u = uct_move(&b, WHITE, true, 120, &mut rng);
    assert_eq!(b.color[u], EMPTY);
}

#[test]
fn test_uct_proves_and_wins_the_forced_cell() {
    let mut rng = Rng::with_seed(41);
    let mut b = Board::new();
    let mut history = Vec::new();
    // black's left column has one middle gap, the only cell that joins
    // its two halves into a three-border group; white sits far right
    let gap = N / 2;
    for row in 0..N {
        if row != gap {
            let mv = Move::new(BLACK, fatten(row, 0));
            b.place(mv, false, &mut rng);
            history.push(mv);
        }
    }
    for row in 0..3 {
        let mv = Move::new(WHITE, fatten(row, N - 1 - row));
        b.place(mv, false, &mut rng);
        history.push(mv);
    }
    let win_cell = fatten(gap, 0);
    let chosen = uct_move(&b, BLACK, false, 2_000, &mut rng);
    assert_eq!(chosen, win_cell);

    // the proven line survives direct verification on the board
    let mv = Move::new(BLACK, chosen);
    let placed = b.place(mv, false, &mut rng);
    history.push(mv);
    assert!(has_win(placed.edges));
    let solid = b.solid_edges(BLACK, &history, &mut rng);
    assert!(has_win(solid), "the proven win is solid, not virtual");
}

#[test]
fn test_uct_with_miai_sees_bridged_wins_early() {
    let mut rng = Rng::with_seed(51);
    let mut b = Board::new();
    // under bridge adjacency several cells finish this column at once;
    // whichever the search proves must actually win on the spot
    for row in 0..N - 2 {
        b.place(Move::new(BLACK, fatten(row, 0)), true, &mut rng);
    }
    let chosen = uct_move(&b, BLACK, true, 2_000, &mut rng);
    let placed = b.place(Move::new(BLACK, chosen), true, &mut rng);
    assert!(has_win(placed.edges), "the proven cell wins immediately");
}

// =============================================================================
// History reconstruction (undo support)
// =============================================================================

#[test]
fn test_from_history_reproduces_position() {
    let mut rng = Rng::with_seed(61);
    let moves = ["c3", "g2", "d4", "f3", "e5", "b7"];
    let (b, history) = play_named(&moves, &mut rng);

    let mut replay_rng = Rng::with_seed(62);
    let again = Board::from_history(&history, true, &mut replay_rng);
    assert_eq!(again.color[..], b.color[..], "same stones in the same cells");

    // truncating the history is undo: the last move's cell is empty again
    let mut undo_rng = Rng::with_seed(63);
    let undone = Board::from_history(&history[..history.len() - 1], true, &mut undo_rng);
    let last = history.last().unwrap().lcn;
    assert_eq!(undone.color[last], EMPTY);
    let mut solid_now = scratch_board(&b);
    let mut solid_undone = scratch_board(&undone);
    for s in [BLACK, WHITE] {
        let now: Vec<_> = root_edges(&mut solid_now, s);
        let then: Vec<_> = root_edges(&mut solid_undone, s);
        let dropped: Vec<_> = now
            .iter()
            .filter(|&&(lcn, _)| lcn != last)
            .cloned()
            .collect();
        if s == history.last().unwrap().s {
            assert_eq!(dropped.len(), then.len());
        } else {
            assert_eq!(now, then, "the other color is untouched by undo");
        }
    }
}
