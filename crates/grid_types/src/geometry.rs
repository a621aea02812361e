use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

/// Cell position. Ordering is row-major, so the smallest coordinate of a set
/// is its topmost-leftmost cell.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct Coord {
    pub row: usize,
    pub col: usize,
}

impl Coord {
    pub const fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    pub fn offset(self, d_row: isize, d_col: isize) -> Option<Self> {
        let row = self.row.checked_add_signed(d_row)?;
        let col = self.col.checked_add_signed(d_col)?;
        Some(Self { row, col })
    }
}

impl Display for Coord {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Connectivity {
    #[default]
    Four,
    Eight,
}

static ORTHOGONAL: [(isize, isize); 4] = [(-1, 0), (0, -1), (0, 1), (1, 0)];
static DIAGONAL: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

impl Connectivity {
    pub fn offsets(self) -> impl Iterator<Item = (isize, isize)> {
        let diagonal: &'static [(isize, isize)] = match self {
            Self::Four => &[],
            Self::Eight => &DIAGONAL,
        };
        ORTHOGONAL.iter().chain(diagonal.iter()).copied()
    }

    pub fn degree(self) -> u8 {
        match self {
            Self::Four => 4,
            Self::Eight => 8,
        }
    }
}

impl TryFrom<u8> for Connectivity {
    type Error = String;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(Self::Four),
            8 => Ok(Self::Eight),
            other => Err(format!("connectivity must be 4 or 8, got {other}")),
        }
    }
}

impl From<Connectivity> for u8 {
    fn from(value: Connectivity) -> Self {
        value.degree()
    }
}

/// Inclusive rectangle of cells.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoundingBox {
    pub top: usize,
    pub left: usize,
    pub bottom: usize,
    pub right: usize,
}

impl BoundingBox {
    pub fn from_coords<'a, I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = &'a Coord>,
    {
        let mut iter = coords.into_iter();
        let first = iter.next()?;
        let mut bounds = Self {
            top: first.row,
            left: first.col,
            bottom: first.row,
            right: first.col,
        };
        for c in iter {
            bounds.top = bounds.top.min(c.row);
            bounds.left = bounds.left.min(c.col);
            bounds.bottom = bounds.bottom.max(c.row);
            bounds.right = bounds.right.max(c.col);
        }
        Some(bounds)
    }

    pub fn height(&self) -> usize {
        self.bottom - self.top + 1
    }

    pub fn width(&self) -> usize {
        self.right - self.left + 1
    }

    pub fn area(&self) -> usize {
        self.height() * self.width()
    }

    pub fn contains(&self, at: Coord) -> bool {
        (self.top..=self.bottom).contains(&at.row) && (self.left..=self.right).contains(&at.col)
    }

    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        (self.top..=self.bottom)
            .flat_map(move |row| (self.left..=self.right).map(move |col| Coord::new(row, col)))
    }
}

#[cfg(test)]
mod tests {
    use super::{BoundingBox, Connectivity, Coord};

    #[test]
    fn coord_order_is_row_major() {
        let mut coords = vec![Coord::new(1, 0), Coord::new(0, 2), Coord::new(0, 1)];
        coords.sort();
        assert_eq!(
            coords,
            vec![Coord::new(0, 1), Coord::new(0, 2), Coord::new(1, 0)]
        );
    }

    #[test]
    fn offset_rejects_negative_positions() {
        assert_eq!(Coord::new(0, 3).offset(-1, 0), None);
        assert_eq!(Coord::new(2, 3).offset(-1, 1), Some(Coord::new(1, 4)));
    }

    #[test]
    fn connectivity_offsets_match_degree() {
        assert_eq!(Connectivity::Four.offsets().count(), 4);
        assert_eq!(Connectivity::Eight.offsets().count(), 8);
        assert!(Connectivity::try_from(6u8).is_err());
        assert_eq!(Connectivity::try_from(8u8), Ok(Connectivity::Eight));
    }

    #[test]
    fn bounding_box_spans_all_coords() {
        let cells = [Coord::new(2, 1), Coord::new(0, 3), Coord::new(1, 2)];
        let bounds = BoundingBox::from_coords(&cells).expect("non-empty");
        assert_eq!((bounds.top, bounds.left, bounds.bottom, bounds.right), (0, 1, 2, 3));
        assert_eq!(bounds.area(), 9);
        assert_eq!(bounds.coords().count(), 9);
        assert!(bounds.contains(Coord::new(1, 1)));
        assert!(!bounds.contains(Coord::new(3, 1)));
        assert!(BoundingBox::from_coords(&[]).is_none());
    }
}
