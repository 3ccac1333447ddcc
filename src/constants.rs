//! Constants for board geometry, cell values, and search parameters.
//!
//! The Y board has `N` cells per side and `N*(N+1)/2` cells in total. It is
//! embedded in a square "fat" grid with `GUARDS` extra rows and columns of
//! guard cells on every side, so neighbor and bridge lookups use fixed
//! offsets with no bounds checks:
//!
//! ```text
//!         . . g g g g g g g
//!          . g g g g g g g g
//!           g g * * * * * g g
//!            g g * * * * g g .
//!             g g * * * g g . .
//!              g g * * g g . . .
//!               g g * g g . . . .
//!                g g g g . . . . .
//!                 g g g . . . . . .
//! ```
//!
//! # Board Size Configuration
//!
//! The board side is controlled by Cargo features:
//! - `side10` (default): 10 cells per side
//! - `side13`: 13 cells per side
//!
//! ```sh
//! cargo build                                        # side 10 (default)
//! cargo build --no-default-features --features side13  # side 13
//! ```

/// A cell of the fat grid, as an index into the 1D board arrays.
pub type Cell = usize;

// =============================================================================
// Board Geometry
// =============================================================================

/// Cells per board side.
#[cfg(feature = "side10")]
pub const N: usize = 10;

#[cfg(feature = "side13")]
pub const N: usize = 13;

// Compile-time check: exactly one board size feature must be enabled
#[cfg(all(feature = "side10", feature = "side13"))]
compile_error!("Cannot enable both 'side10' and 'side13' features at the same time");

#[cfg(not(any(feature = "side10", feature = "side13")))]
compile_error!("Must enable exactly one board size feature: 'side10' or 'side13'");

/// Width of the guard ring. Bridges reach two cells away, so two rings.
pub const GUARDS: usize = 2;

/// Width of the fat grid (`N` plus guards on both sides).
pub const NP2G: usize = N + 2 * GUARDS;

/// Number of playable cells.
pub const TOTAL_CELLS: usize = N * (N + 1) / 2;

/// Total fat grid size, including all guard cells.
pub const TOTAL_FAT_CELLS: usize = NP2G * NP2G;

/// Number of neighbors of a cell (triangular lattice).
pub const NUM_NBRS: usize = 6;

/// Map a board coordinate (row 0 at the top, column 0 at the left of each
/// row) to its fat grid cell.
pub const fn fatten(row: usize, col: usize) -> Cell {
    NP2G * (row + GUARDS) + col + GUARDS
}

/// Board row of a fat grid cell; negative for guards above the board.
pub const fn board_row(lcn: Cell) -> isize {
    (lcn / NP2G) as isize - GUARDS as isize
}

/// Board column of a fat grid cell; negative for guards left of the board.
pub const fn board_col(lcn: Cell) -> isize {
    (lcn % NP2G) as isize - GUARDS as isize
}

/// True if the cell lies on one of the three board edges.
pub const fn near_edge(lcn: Cell) -> bool {
    let r = board_row(lcn);
    let c = board_col(lcn);
    r == 0 || c == 0 || r + c + 1 == N as isize
}

// =============================================================================
// Neighbor and Bridge Offsets
// =============================================================================

/// Offsets to the 6 neighbors in clockwise order: up, up-right, right,
/// down, down-left, left. The last entry repeats the first so that a bridge
/// direction `t` has carriers `t` and `t + 1` without a modulo.
pub const NBR_OFFSETS: [isize; NUM_NBRS + 1] = [
    -(NP2G as isize),     // up
    1 - NP2G as isize,    // up-right
    1,                    // right
    NP2G as isize,        // down
    NP2G as isize - 1,    // down-left
    -1,                   // left
    -(NP2G as isize),     // up again
];

/// Offsets to the 6 bridge targets, two steps away. Bridge `t` is the sum
/// of neighbor offsets `t` and `t + 1`; those two neighbors are its
/// carrier cells.
pub const BRIDGE_OFFSETS: [isize; NUM_NBRS] = [
    1 - 2 * (NP2G as isize), // up + up-right
    2 - NP2G as isize,       // up-right + right
    NP2G as isize + 1,       // right + down
    2 * (NP2G as isize) - 1, // down + down-left
    NP2G as isize - 2,       // down-left + left
    -(NP2G as isize) - 1,    // left + up
];

/// The 6 neighbors of a cell, clockwise from straight up. Guard padding
/// keeps every result inside the fat grid.
#[inline]
pub fn neighbors(lcn: Cell) -> [Cell; NUM_NBRS] {
    std::array::from_fn(|t| (lcn as isize + NBR_OFFSETS[t]) as Cell)
}

/// The 6 bridge targets of a cell; target `t`'s carriers are neighbors
/// `t` and `t + 1` (the offset table wraps).
#[inline]
pub fn bridge_targets(lcn: Cell) -> [Cell; NUM_NBRS] {
    std::array::from_fn(|t| (lcn as isize + BRIDGE_OFFSETS[t]) as Cell)
}

// =============================================================================
// Border Bitmask Values
// =============================================================================

/// No border touched.
pub const BRDR_NIL: u8 = 0; // 000

/// Top border (the horizontal edge).
pub const BRDR_TOP: u8 = 1; // 001

/// Left border.
pub const BRDR_LEFT: u8 = 2; // 010

/// Right border.
pub const BRDR_RIGHT: u8 = 4; // 100

/// All three borders: a group with this edge set has won.
pub const BRDR_ALL: u8 = 7; // 111

// =============================================================================
// Cell Values
// =============================================================================

/// Empty cell.
pub const EMPTY: u8 = 0;

/// Black stone.
pub const BLACK: u8 = 1;

/// White stone.
pub const WHITE: u8 = 2;

/// Guard cell (out of play, behaves as permanently occupied).
pub const GUARD: u8 = 3;

/// Transient marker for stones awaiting connectivity replay.
pub const TMP: u8 = 4;

/// The other player. Black and white are 1 and 2.
pub const fn opponent(s: u8) -> u8 {
    3 - s
}

/// Index of a player color into per-color tables.
pub const fn ndx(s: u8) -> usize {
    (s - 1) as usize
}

/// Display character for a cell value.
pub const fn color_char(c: u8) -> char {
    match c {
        BLACK => 'b',
        WHITE => 'w',
        EMPTY => '.',
        _ => '?',
    }
}

// =============================================================================
// Search Parameters
// =============================================================================

/// Visits a leaf needs before it is expanded into children.
pub const EXPAND_THRESHOLD: u32 = 2;

/// Exploration coefficient of the UCB child-selection formula.
pub const UCB_EXPLORE: f32 = 1.0;

/// Default playout budget for the move selectors.
pub const DEFAULT_ROLLOUTS: usize = 10_000;

/// Score larger than any finite evaluation.
pub const Y_INFINITY: f32 = 9999.0;
