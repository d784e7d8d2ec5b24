use std::{borrow::Cow, fmt};

use super::{
    cell::{Cell, Direction},
    grid::Grid,
};
use crate::distances::Distances;

impl Grid {
    /// Renders the grid as ASCII art, `contents` supplies the three characters inside each cell.
    ///
    /// East and south walls are left out where the passage is open.
    pub fn render_with<'a>(&'a self, contents: impl Fn(&'a Cell) -> Cow<'a, str>) -> String {
        let mut out = String::with_capacity((self.rows() * 2 + 1) * (self.columns() * 4 + 2));

        out.push('+');
        out.push_str(&"---+".repeat(self.columns()));
        out.push('\n');

        for row in self.each_row() {
            let mut top = String::from("|");
            let mut bottom = String::from("+");

            for cell in row {
                top.push_str(&contents(cell));
                top.push(if cell.is_linked(Direction::East) { ' ' } else { '|' });

                bottom.push_str(if cell.is_linked(Direction::South) {
                    "   "
                } else {
                    "---"
                });
                bottom.push('+');
            }

            out.push_str(&top);
            out.push('\n');
            out.push_str(&bottom);
            out.push('\n');
        }

        out
    }

    /// Walls only.
    pub fn render_plain(&self) -> String {
        self.render_with(|_| Cow::Borrowed(Cell::BLANK))
    }

    /// Cells covered by `distances` show their distance, zero padded.
    pub fn render_distances(&self, distances: &Distances) -> String {
        self.render_with(|cell| {
            let distance = self
                .id(cell.row(), cell.column())
                .ok()
                .and_then(|id| distances.get(id));
            match distance {
                Some(d) => Cow::Owned(format!("{:03}", d)),
                None => Cow::Borrowed(Cell::BLANK),
            }
        })
    }
}

/// Renders with the content of each cell.
impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render_with(|cell| Cow::Borrowed(cell.content())))
    }
}
