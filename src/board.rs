//! Y board state and move execution.
//!
//! This module provides the core game logic for Y, including:
//! - Board state as a 1D fat grid with a guard ring (no bounds checks)
//! - Incremental group connectivity via a disjoint-set forest whose roots
//!   accumulate a touched-border bitmask
//! - Miai (bridge) maintenance: after a stone lands, safe two-carrier
//!   bridge patterns are committed as forced reply pairs, so simulations
//!   can treat bridged groups as connected
//!
//! A stone placement never fails: callers check legality first, and the
//! debug build asserts it. The board is a plain value; search components
//! clone it per branch and never share state.

use std::fmt;

use fastrand::Rng;

use crate::connect::{find, union};
use crate::constants::*;
use crate::shuffle::shuffle_interval;

/// A move: a stone of color `s` on cell `lcn`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Move {
    pub s: u8,
    pub lcn: Cell,
}

impl Move {
    pub fn new(s: u8, lcn: Cell) -> Self {
        Move { s, lcn }
    }
}

/// Outcome of a placement.
#[derive(Copy, Clone, Debug)]
pub struct Placement {
    /// Border bitmask of the mover's group after the move (bridges
    /// included when miai is enabled). `has_win` on this detects a win.
    pub edges: u8,
    /// The opponent's committed reply to this cell, or the played cell
    /// itself if the move hit no opponent carrier. When these differ, the
    /// opponent's connectivity is stale until rebuilt.
    pub opp_reply: Cell,
}

/// The mutable position: cell colors, the disjoint-set forest, per-root
/// border sets, and one miai reply table per color.
///
/// `reply[color][x] == y` with `y != x` means `x` and `y` are the two
/// carriers of a committed bridge: if the opponent takes one, `color`
/// keeps its connection by taking the other. Uncommitted cells map to
/// themselves.
#[derive(Clone)]
pub struct Board {
    pub color: [u8; TOTAL_FAT_CELLS],
    pub parent: [Cell; TOTAL_FAT_CELLS],
    pub edges: [u8; TOTAL_FAT_CELLS],
    pub reply: [[Cell; TOTAL_FAT_CELLS]; 2],
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl Board {
    /// An empty board: guard ring everywhere, the playable triangle
    /// empty, identity forest and reply tables, border values on the
    /// guard cells adjacent to each of the three edges.
    pub fn new() -> Self {
        let mut b = Board {
            color: [GUARD; TOTAL_FAT_CELLS],
            parent: [0; TOTAL_FAT_CELLS],
            edges: [BRDR_NIL; TOTAL_FAT_CELLS],
            reply: [[0; TOTAL_FAT_CELLS]; 2],
        };
        for j in 0..TOTAL_FAT_CELLS {
            b.parent[j] = j;
            b.reply[0][j] = j;
            b.reply[1][j] = j;
        }
        for r in 0..N {
            for c in 0..N - r {
                b.color[fatten(r, c)] = EMPTY;
            }
        }
        // Guard cells along each edge carry that edge's value; row r of
        // the triangle ends one cell earlier than row r-1, so the right
        // guards advance by NP2G-1 per row.
        let origin = fatten(0, 0);
        for j in 0..=N {
            b.edges[origin - NP2G + j] = BRDR_TOP;
            b.edges[origin - 1 + j * NP2G] = BRDR_LEFT;
            b.edges[origin + N + j * (NP2G - 1)] = BRDR_RIGHT;
        }
        b
    }

    /// True if `mv.lcn` carries no committed reply for `mv.s`; a free
    /// cell maps to itself.
    pub fn not_in_miai(&self, mv: Move) -> bool {
        self.reply[ndx(mv.s)][mv.lcn] == mv.lcn
    }

    /// Commit the symmetric pair `x <-> y` for `s`.
    pub fn set_miai(&mut self, s: u8, x: Cell, y: Cell) {
        self.reply[ndx(s)][x] = y;
        self.reply[ndx(s)][y] = x;
    }

    /// Release the pair through `mv.lcn`, if any. Does not repair any
    /// connectivity derived from the pair.
    pub fn release_miai(&mut self, mv: Move) {
        let y = self.reply[ndx(mv.s)][mv.lcn];
        self.reply[ndx(mv.s)][mv.lcn] = mv.lcn;
        self.reply[ndx(mv.s)][y] = y;
    }

    fn put_stone(&mut self, mv: Move) {
        debug_assert!(
            self.color[mv.lcn] == EMPTY || self.color[mv.lcn] == TMP || self.color[mv.lcn] == mv.s,
            "cell must be empty or awaiting replay"
        );
        self.color[mv.lcn] = mv.s;
    }

    /// Count cells holding `kind`.
    pub fn num(&self, kind: u8) -> usize {
        self.color.iter().filter(|&&c| c == kind).count()
    }

    /// Place a stone and update the mover's connectivity.
    ///
    /// Same-color neighbor groups are unioned into the stone's group and
    /// guard neighbors contribute their border value, so a lone border
    /// stone gets edge credit immediately. With `use_miai` the bridge
    /// scan of [`Board::miai_update`] runs as well.
    ///
    /// Hitting an opponent carrier leaves the opponent's connectivity
    /// stale; the caller decides whether to rebuild (tree descent) or to
    /// schedule the forced reply (playouts).
    pub fn place(&mut self, mv: Move, use_miai: bool, rng: &mut Rng) -> Placement {
        let lcn = mv.lcn;
        let s = mv.s;
        self.put_stone(mv);
        let mut cpt = lcn; // root of the group containing lcn
        for nbr in neighbors(lcn) {
            if self.color[nbr] == s {
                let nbr_root = find(&mut self.parent, nbr);
                self.edges[nbr_root] |= self.edges[cpt];
                cpt = union(&mut self.parent, cpt, nbr_root);
            } else if self.color[nbr] == GUARD {
                self.edges[cpt] |= self.edges[nbr];
            }
        }
        if !use_miai {
            return Placement {
                edges: self.edges[cpt],
                opp_reply: lcn,
            };
        }
        self.miai_update(mv, cpt, rng)
    }

    /// Bridge maintenance for a just-placed stone.
    ///
    /// Releases the mover's own pair through the cell (that connection is
    /// now solid), releases and reports the opponent's pair through it,
    /// then scans the six bridge directions in shuffled order. A bridge to
    /// an own stone unions the two groups and commits its carriers; a
    /// bridge to a guard commits the carriers and credits that border.
    fn miai_update(&mut self, mv: Move, mut cpt: Cell, rng: &mut Rng) -> Placement {
        let lcn = mv.lcn;
        let s = mv.s;
        self.release_miai(mv);
        let opp_reply = self.reply[ndx(opponent(s))][lcn];
        if opp_reply != lcn {
            self.release_miai(Move::new(opponent(s), lcn));
        }
        // random scan order avoids a directional bias in which bridges
        // get claimed across many playouts
        let mut perm: [usize; NUM_NBRS] = [0, 1, 2, 3, 4, 5];
        shuffle_interval(&mut perm, 0, NUM_NBRS - 1, rng);
        let bridges = bridge_targets(lcn);
        for &t in &perm {
            let nbr = bridges[t];
            let c1 = (lcn as isize + NBR_OFFSETS[t]) as Cell;
            let c2 = (lcn as isize + NBR_OFFSETS[t + 1]) as Cell;
            let m1 = Move::new(s, c1);
            let m2 = Move::new(s, c2);
            if self.color[nbr] == s
                && self.color[c1] == EMPTY
                && self.color[c2] == EMPTY
                && (self.not_in_miai(m1) || self.not_in_miai(m2))
            {
                if !self.not_in_miai(m1) {
                    if near_edge(lcn) && near_edge(c1) {
                        let old = self.reply[ndx(s)][c1];
                        cpt = self.border_realign(Move::new(s, nbr), cpt, c1, old, c2);
                    }
                } else if !self.not_in_miai(m2) {
                    if near_edge(lcn) && near_edge(c2) {
                        let old = self.reply[ndx(s)][c2];
                        cpt = self.border_realign(Move::new(s, nbr), cpt, c2, old, c1);
                    }
                } else if find(&mut self.parent, nbr) != find(&mut self.parent, cpt) {
                    // new miai
                    let nbr_root = find(&mut self.parent, nbr);
                    self.edges[nbr_root] |= self.edges[cpt];
                    cpt = union(&mut self.parent, cpt, nbr_root);
                    self.set_miai(s, c1, c2);
                }
            } else if self.color[nbr] == GUARD
                && self.color[c1] == EMPTY
                && self.color[c2] == EMPTY
                && self.not_in_miai(m1)
                && self.not_in_miai(m2)
            {
                // border miai
                self.edges[cpt] |= self.edges[nbr];
                self.set_miai(s, c1, c2);
            }
        }
        Placement {
            edges: self.edges[cpt],
            opp_reply,
        }
    }

    /// Re-pair a carrier that a new bridge shares with an existing pair
    /// at a board corner, where the plain two-carrier rule is not
    /// exhaustive:
    ///
    /// ```text
    ///   * * * *       * * * *
    ///    2 1 y         . 1 y
    ///     x             x 3
    /// ```
    ///
    /// Carrier `1` leaves its old pair (with `2`) and pairs with `3`;
    /// the bridge target's group is unioned like any other bridge.
    /// Returns the new group root.
    fn border_realign(&mut self, mv: Move, cpt: Cell, c1: Cell, old_partner: Cell, c3: Cell) -> Cell {
        debug_assert!(near_edge(c1) && near_edge(old_partner));
        self.release_miai(Move::new(mv.s, c1));
        self.set_miai(mv.s, c1, c3);
        debug_assert!(self.not_in_miai(Move::new(mv.s, old_partner)));
        let root = find(&mut self.parent, mv.lcn);
        self.edges[root] |= self.edges[cpt];
        union(&mut self.parent, cpt, root)
    }

    /// Reset one color's connectivity to identity: its forest entries,
    /// border sets, and reply table. Stones are removed, or re-marked
    /// [`TMP`] so a replay can rebuild from the layout.
    pub fn zero_connectivity(&mut self, s: u8, remove_stones: bool) {
        for j in 0..TOTAL_FAT_CELLS {
            self.reply[ndx(s)][j] = j;
            if self.color[j] == s {
                self.parent[j] = j;
                self.edges[j] = BRDR_NIL;
                self.color[j] = if remove_stones { EMPTY } else { TMP };
            }
        }
    }

    /// Rebuild one color's connectivity from its stones on the board,
    /// after an opponent move broke a committed bridge. Returns the last
    /// placed group's border set.
    pub fn rebuild_from_stones(&mut self, s: u8, use_miai: bool, rng: &mut Rng) -> u8 {
        self.zero_connectivity(s, false);
        let mut bd_set = BRDR_NIL;
        for j in 0..TOTAL_FAT_CELLS {
            if self.color[j] == TMP {
                bd_set = self.place(Move::new(s, j), use_miai, rng).edges;
            }
        }
        bd_set
    }

    /// Rebuild one color's connectivity by replaying its moves from the
    /// game history in order. Returns the border set after the color's
    /// last move.
    pub fn rebuild_from_history(
        &mut self,
        s: u8,
        history: &[Move],
        use_miai: bool,
        rng: &mut Rng,
    ) -> u8 {
        self.zero_connectivity(s, true);
        let mut bd_set = BRDR_NIL;
        for &mv in history {
            if mv.s == s {
                bd_set = self.place(mv, use_miai, rng).edges;
            }
        }
        bd_set
    }

    /// Border set of `s` counting solid (stone-adjacent) connections
    /// only. Distinguishes a stone-solid win from a bridge-backed one.
    pub fn solid_edges(&mut self, s: u8, history: &[Move], rng: &mut Rng) -> u8 {
        let mut best = BRDR_NIL;
        self.rebuild_from_history(s, history, false, rng);
        for &mv in history {
            if mv.s == s {
                let root = find(&mut self.parent, mv.lcn);
                if self.edges[root].count_ones() > best.count_ones() {
                    best = self.edges[root];
                }
            }
        }
        best
    }

    /// Reconstruct a position from a (possibly truncated) history. Each
    /// color's connectivity is computed with the other color's stones
    /// already on the board, so bridge pairings respect occupied
    /// carriers. This is how the caller implements undo.
    pub fn from_history(history: &[Move], use_miai: bool, rng: &mut Rng) -> Board {
        let mut b = Board::new();
        let Some(first) = history.first() else {
            return b;
        };
        let p1 = first.s;
        for &mv in history {
            if mv.s == p1 {
                b.put_stone(mv);
            }
        }
        for &mv in history {
            if mv.s == opponent(p1) {
                b.place(mv, use_miai, rng);
            }
        }
        b.zero_connectivity(p1, true);
        for &mv in history {
            if mv.s == p1 {
                b.place(mv, use_miai, rng);
            }
        }
        b
    }
}

/// Coordinate name of a cell: column letter then 1-based row, "a1" style.
pub fn cell_name(lcn: Cell) -> String {
    let r = board_row(lcn);
    let c = board_col(lcn);
    format!("{}{}", (b'a' + c as u8) as char, r + 1)
}

/// Parse an "a1"-style coordinate into a cell. Returns `None` for names
/// outside the playable triangle.
pub fn parse_cell(name: &str) -> Option<Cell> {
    let mut chars = name.chars();
    let col_ch = chars.next()?;
    if !col_ch.is_ascii_alphabetic() {
        return None;
    }
    let col = (col_ch.to_ascii_lowercase() as u8 - b'a') as usize;
    let row: usize = chars.as_str().parse().ok()?;
    if row == 0 {
        return None;
    }
    let r = row - 1;
    if r >= N || col >= N - r {
        return None;
    }
    Some(fatten(r, col))
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "     ")?;
        for c in 0..N {
            write!(f, " {} ", (b'a' + c as u8) as char)?;
        }
        writeln!(f)?;
        for r in 0..N {
            for _ in 0..r {
                write!(f, " ")?;
            }
            write!(f, "{:2}   ", r + 1)?;
            for c in 0..N - r {
                write!(f, "{}  ", color_char(self.color[fatten(r, c)]))?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
