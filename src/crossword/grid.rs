#![warn(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
//! The puzzle geometry: open cells, slots, and how slots cross.
//!
//! A slot is a maximal horizontal or vertical run of at least two open
//! cells — the unit a word gets assigned to. Slots are enumerated in a
//! fixed order (across slots in row-major scan order, then down slots in
//! column-major scan order) and referenced everywhere by their dense
//! [`SlotId`]; that enumeration order is what makes solver tie-breaking
//! reproducible.
//!
//! Everything here is computed once at construction and immutable after.

use bit_vec::BitVec;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;
use thiserror::Error;

/// A dense slot identifier, valid in `0..grid.num_slots()`.
pub type SlotId = usize;

/// The direction a slot runs in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    Across,
    Down,
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Across => write!(f, "across"),
            Self::Down => write!(f, "down"),
        }
    }
}

/// A maximal run of open cells: the variable a word is assigned to.
///
/// Two slots are equal iff all four fields match.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Slot {
    pub row: usize,
    pub col: usize,
    pub direction: Direction,
    pub length: usize,
}

impl Slot {
    #[must_use]
    pub const fn new(row: usize, col: usize, direction: Direction, length: usize) -> Self {
        Self {
            row,
            col,
            direction,
            length,
        }
    }

    /// The grid coordinates of the `k`-th cell of this slot.
    #[must_use]
    pub const fn cell(&self, k: usize) -> (usize, usize) {
        match self.direction {
            Direction::Across => (self.row, self.col + k),
            Direction::Down => (self.row + k, self.col),
        }
    }

    /// The cells this slot occupies, in word order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize)> + '_ {
        (0..self.length).map(|k| self.cell(k))
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({}, {}) {} [{}]",
            self.row, self.col, self.direction, self.length
        )
    }
}

/// Structural input errors. Fatal to grid construction; unsatisfiable
/// puzzles are never reported through this type.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum MalformedGridError {
    #[error("grid structure has no cells")]
    Empty,

    #[error("row {row} has {found} cells, expected {expected}")]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}

/// The fixed puzzle geometry: the open-cell mask plus everything derived
/// from it (slots, the overlap relation and the neighbor relation).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    height: usize,
    width: usize,
    open: Vec<BitVec>,
    slots: Vec<Slot>,
    overlaps: FxHashMap<(SlotId, SlotId), (usize, usize)>,
    neighbors: Vec<SmallVec<[SlotId; 4]>>,
}

impl Grid {
    /// Builds a grid from an open/blocked matrix (`true` = open).
    ///
    /// # Errors
    ///
    /// [`MalformedGridError::Empty`] when the matrix has no cells,
    /// [`MalformedGridError::RaggedRow`] when row widths differ.
    pub fn new(rows: Vec<Vec<bool>>) -> Result<Self, MalformedGridError> {
        if rows.is_empty() || rows[0].is_empty() {
            return Err(MalformedGridError::Empty);
        }

        let height = rows.len();
        let width = rows[0].len();

        for (row, cells) in rows.iter().enumerate() {
            if cells.len() != width {
                return Err(MalformedGridError::RaggedRow {
                    row,
                    expected: width,
                    found: cells.len(),
                });
            }
        }

        let open: Vec<BitVec> = rows
            .into_iter()
            .map(|row| row.into_iter().collect())
            .collect();

        let slots = scan_slots(&open, height, width);
        let overlaps = compute_overlaps(&slots);
        let neighbors = compute_neighbors(slots.len(), &overlaps);

        Ok(Self {
            height,
            width,
            open,
            slots,
            overlaps,
            neighbors,
        })
    }

    #[must_use]
    pub const fn height(&self) -> usize {
        self.height
    }

    #[must_use]
    pub const fn width(&self) -> usize {
        self.width
    }

    #[must_use]
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.open[row][col]
    }

    /// All slots, in the fixed enumeration order.
    #[must_use]
    pub fn slots(&self) -> &[Slot] {
        &self.slots
    }

    #[must_use]
    pub fn slot(&self, id: SlotId) -> Slot {
        self.slots[id]
    }

    #[must_use]
    pub fn num_slots(&self) -> usize {
        self.slots.len()
    }

    /// The crossing offsets for a pair of slots: `Some((i, j))` means
    /// character `i` of `x`'s word must equal character `j` of `y`'s word.
    /// `None` means the slots do not cross.
    #[must_use]
    pub fn overlap(&self, x: SlotId, y: SlotId) -> Option<(usize, usize)> {
        self.overlaps.get(&(x, y)).copied()
    }

    /// The slots crossing `x`, excluding `x` itself, in ascending id order.
    #[must_use]
    pub fn neighbors(&self, x: SlotId) -> &[SlotId] {
        &self.neighbors[x]
    }
}

/// Scans maximal open runs of length >= 2: rows left to right, then columns
/// top to bottom.
fn scan_slots(open: &[BitVec], height: usize, width: usize) -> Vec<Slot> {
    let mut slots = Vec::new();

    for row in 0..height {
        let mut run = 0;
        for col in 0..=width {
            if col < width && open[row][col] {
                run += 1;
            } else {
                if run >= 2 {
                    slots.push(Slot::new(row, col - run, Direction::Across, run));
                }
                run = 0;
            }
        }
    }

    for col in 0..width {
        let mut run = 0;
        for row in 0..=height {
            if row < height && open[row][col] {
                run += 1;
            } else {
                if run >= 2 {
                    slots.push(Slot::new(row - run, col, Direction::Down, run));
                }
                run = 0;
            }
        }
    }

    slots
}

/// Records, for every pair of slots sharing a cell, the character offsets
/// that must agree. Both orderings are stored, so `(x, y) -> (i, j)` always
/// coexists with `(y, x) -> (j, i)`.
fn compute_overlaps(slots: &[Slot]) -> FxHashMap<(SlotId, SlotId), (usize, usize)> {
    let mut by_cell: FxHashMap<(usize, usize), SmallVec<[(SlotId, usize); 2]>> =
        FxHashMap::default();

    for (id, slot) in slots.iter().enumerate() {
        for (k, cell) in slot.cells().enumerate() {
            by_cell.entry(cell).or_default().push((id, k));
        }
    }

    let mut overlaps = FxHashMap::default();
    for sharers in by_cell.values() {
        for a in 0..sharers.len() {
            for b in (a + 1)..sharers.len() {
                let (x, i) = sharers[a];
                let (y, j) = sharers[b];
                overlaps.insert((x, y), (i, j));
                overlaps.insert((y, x), (j, i));
            }
        }
    }

    overlaps
}

fn compute_neighbors(
    num_slots: usize,
    overlaps: &FxHashMap<(SlotId, SlotId), (usize, usize)>,
) -> Vec<SmallVec<[SlotId; 4]>> {
    let mut neighbors: Vec<SmallVec<[SlotId; 4]>> = vec![SmallVec::new(); num_slots];
    for &(x, y) in overlaps.keys() {
        neighbors[x].push(y);
    }
    for adjacent in &mut neighbors {
        adjacent.sort_unstable();
    }
    neighbors
}
