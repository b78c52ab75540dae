//! Redraw directives.
//!
//! Every editing and navigation operation reports which screen region it
//! disturbed; the renderer repaints exactly that. The coarse regions
//! mirror classic full/partial repaints, while the `Shift*`/`Blank`
//! variants carry enough detail for the renderer to update single cells
//! instead of repainting a whole row on ordinary keystrokes.

/// Which screen region must be repainted after an operation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Redraw {
    /// Nothing changed on screen; only the cursor needs repositioning.
    Cursor,
    /// Blank `len` cells of the current row starting at column `from`
    /// (a killed span).
    Blank { from: usize, len: usize },
    /// The current row's tail was shifted right one cell: repaint cells
    /// from column `from` to the end of the row.
    ShiftRight { from: usize },
    /// The current row's tail was shifted left one cell: repaint cells
    /// from column `from` and blank the vacated cell after the end.
    ShiftLeft { from: usize },
    /// Repaint the current row.
    CurrentLine,
    /// A row above was merged away: repaint from the current row to the
    /// bottom of the window.
    RegionAbove,
    /// A row was inserted below: repaint from the row above the current
    /// one to the bottom of the window.
    RegionBelow,
    /// Repaint the entire window.
    Whole,
}

impl Redraw {
    fn rank(self) -> u8 {
        match self {
            Self::Cursor => 0,
            Self::Blank { .. } | Self::ShiftRight { .. } | Self::ShiftLeft { .. } => 1,
            Self::CurrentLine => 2,
            Self::RegionAbove | Self::RegionBelow => 3,
            Self::Whole => 4,
        }
    }

    /// Combine two directives into one that covers both. Distinct
    /// directives of the same extent widen to the next coarser region.
    #[must_use]
    pub fn strongest(self, other: Self) -> Self {
        if self == other {
            return self;
        }
        match self.rank().cmp(&other.rank()) {
            std::cmp::Ordering::Greater => self,
            std::cmp::Ordering::Less => other,
            std::cmp::Ordering::Equal => {
                if self.rank() >= 3 {
                    Self::Whole
                } else {
                    Self::CurrentLine
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_strongest_prefers_wider_region() {
        assert_eq!(Redraw::Cursor.strongest(Redraw::Whole), Redraw::Whole);
        assert_eq!(
            Redraw::CurrentLine.strongest(Redraw::ShiftRight { from: 3 }),
            Redraw::CurrentLine
        );
    }

    #[test]
    fn test_strongest_widens_on_conflict() {
        assert_eq!(
            Redraw::ShiftRight { from: 1 }.strongest(Redraw::ShiftRight { from: 5 }),
            Redraw::CurrentLine
        );
        assert_eq!(
            Redraw::RegionAbove.strongest(Redraw::RegionBelow),
            Redraw::Whole
        );
    }

    #[test]
    fn test_strongest_is_idempotent() {
        let d = Redraw::Blank { from: 2, len: 4 };
        assert_eq!(d.strongest(d), d);
    }
}
