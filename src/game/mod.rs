//! Game state for a single session: marks, the 9-cell board, per-mark
//! scores, and winner detection over the 8 winning lines.

use serde::ser::SerializeSeq;
use serde::{Deserialize, Serialize, Serializer};

/// A player mark. `X` always starts a fresh session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    /// The opposing mark.
    #[must_use]
    pub const fn other(self) -> Self {
        match self {
            Self::X => Self::O,
            Self::O => Self::X,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::X => "X",
            Self::O => "O",
        }
    }
}

/// The 8 winning triples: 3 rows, 3 columns, 2 diagonals.
const WIN_LINES: [[usize; 3]; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// A 3x3 board in row-major order, index 0 = top-left.
///
/// Serializes as 9 strings (`""` for empty, `"X"`/`"O"` for occupied) to
/// match the wire format browser clients expect.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Board([Option<Mark>; 9]);

impl Board {
    /// Number of cells on the board.
    pub const CELLS: usize = 9;

    /// Write `mark` into the cell at `index`, overwriting whatever is there.
    /// Returns `false` (board untouched) if `index` is out of range.
    pub fn set(&mut self, index: usize, mark: Mark) -> bool {
        if let Some(cell) = self.0.get_mut(index) {
            *cell = Some(mark);
            true
        } else {
            false
        }
    }

    /// Reset every cell to empty.
    pub fn clear(&mut self) {
        self.0 = [None; 9];
    }

    /// Count of occupied cells.
    #[must_use]
    pub fn occupied(&self) -> usize {
        self.0.iter().filter(|cell| cell.is_some()).count()
    }

    /// Return the winning mark, if any line of three equal non-empty cells
    /// exists.
    #[must_use]
    pub fn winner(&self) -> Option<Mark> {
        for [a, b, c] in WIN_LINES {
            if let Some(mark) = self.0[a]
                && self.0[b] == Some(mark)
                && self.0[c] == Some(mark)
            {
                return Some(mark);
            }
        }
        None
    }
}

impl Serialize for Board {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut seq = serializer.serialize_seq(Some(Self::CELLS))?;
        for cell in &self.0 {
            seq.serialize_element(cell.map_or("", Mark::as_str))?;
        }
        seq.end()
    }
}

/// Win counts per mark. Monotonically non-decreasing; survive restarts and
/// are discarded only when the session itself is destroyed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Scores {
    #[serde(rename = "X")]
    pub x: u32,
    #[serde(rename = "O")]
    pub o: u32,
}

impl Scores {
    /// Credit a win to `mark`.
    pub fn record_win(&mut self, mark: Mark) {
        match mark {
            Mark::X => self.x += 1,
            Mark::O => self.o += 1,
        }
    }
}
