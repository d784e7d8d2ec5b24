use std::fmt;

use smallvec::SmallVec;

/// Index of a cell inside the arena of the grid that created it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub(crate) usize);

impl CellId {
    pub fn index(self) -> usize {
        self.0
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    North,
    East,
    South,
    West,
}

impl Direction {
    /// Enumeration order used everywhere a tie has to be broken.
    pub fn get_in_order() -> [Direction; 4] {
        use Direction::*;
        [North, East, South, West]
    }

    /// Offset as `(row, column)`.
    pub fn to_offset(self) -> (isize, isize) {
        match self {
            Self::North => (-1, 0),
            Self::East => (0, 1),
            Self::South => (1, 0),
            Self::West => (0, -1),
        }
    }

    pub fn reverse(self) -> Direction {
        use Direction::*;

        match self {
            North => South,
            East => West,
            South => North,
            West => East,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::North => "north",
            Self::East => "east",
            Self::South => "south",
            Self::West => "west",
        }
    }

    pub(crate) fn slot(self) -> usize {
        self as usize
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Normalizes a display string to exactly three characters.
///
/// Empty becomes blank, one character is centered, two are left aligned and anything longer
/// is cut after the third character.
pub fn normalize_content(content: &str) -> String {
    let chars: SmallVec<[char; 3]> = content.chars().take(3).collect();
    match chars.as_slice() {
        [] => Cell::BLANK.to_string(),
        [c] => format!(" {} ", c),
        [a, b] => format!("{}{} ", a, b),
        _ => chars.iter().collect(),
    }
}

/// A single maze vertex.
///
/// Neighbors are fixed when the grid is built, only the link flags change afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Cell {
    row: usize,
    column: usize,
    neighbors: [Option<CellId>; 4],
    links: [bool; 4],
    content: String,
}

impl Cell {
    pub const BLANK: &'static str = "   ";

    pub(crate) fn new(row: usize, column: usize, neighbors: [Option<CellId>; 4]) -> Cell {
        Cell {
            row,
            column,
            neighbors,
            links: [false; 4],
            content: Self::BLANK.to_string(),
        }
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn column(&self) -> usize {
        self.column
    }

    pub fn pos(&self) -> (usize, usize) {
        (self.row, self.column)
    }

    pub fn neighbor(&self, dir: Direction) -> Option<CellId> {
        self.neighbors[dir.slot()]
    }

    pub fn north(&self) -> Option<CellId> {
        self.neighbor(Direction::North)
    }

    pub fn east(&self) -> Option<CellId> {
        self.neighbor(Direction::East)
    }

    pub fn south(&self) -> Option<CellId> {
        self.neighbor(Direction::South)
    }

    pub fn west(&self) -> Option<CellId> {
        self.neighbor(Direction::West)
    }

    /// Structural neighbors in north, east, south, west order.
    pub fn neighbors(&self) -> SmallVec<[CellId; 4]> {
        self.neighbors.iter().flatten().copied().collect()
    }

    /// Direction in which `other` is a structural neighbor.
    pub fn direction_to(&self, other: CellId) -> Option<Direction> {
        Direction::get_in_order()
            .into_iter()
            .find(|dir| self.neighbor(*dir) == Some(other))
    }

    /// Returns true if there is an open passage in the given direction.
    pub fn is_linked(&self, dir: Direction) -> bool {
        self.links[dir.slot()]
    }

    /// Returns true if `other` is a neighbor reachable through a passage.
    ///
    /// `None` (the boundary) is never linked.
    pub fn linked(&self, other: Option<CellId>) -> bool {
        other
            .and_then(|other| self.direction_to(other))
            .map_or(false, |dir| self.is_linked(dir))
    }

    /// Linked neighbors in north, east, south, west order.
    pub fn links(&self) -> SmallVec<[CellId; 4]> {
        Direction::get_in_order()
            .into_iter()
            .filter(|dir| self.is_linked(*dir))
            .filter_map(|dir| self.neighbor(dir))
            .collect()
    }

    pub fn link_count(&self) -> usize {
        self.links.iter().filter(|l| **l).count()
    }

    pub fn is_dead_end(&self) -> bool {
        self.link_count() == 1
    }

    pub fn content(&self) -> &str {
        &self.content
    }

    pub fn set_content(&mut self, content: &str) {
        self.content = normalize_content(content);
    }

    pub fn clear_content(&mut self) {
        self.content = Self::BLANK.to_string();
    }

    pub(crate) fn set_link(&mut self, dir: Direction, open: bool) {
        self.links[dir.slot()] = open;
    }

    /// Verbose description listing every direction.
    pub fn describe(&self) -> String {
        let mut out = format!("Cell[{},{}], Linked neighbors: ", self.row, self.column);
        for dir in Direction::get_in_order() {
            let name = match dir {
                Direction::North => "North",
                Direction::East => "East",
                Direction::South => "South",
                Direction::West => "West",
            };
            let state = if self.is_linked(dir) { "YES" } else { "NO" };
            out.push_str(&format!(" {}: {} ", name, state));
        }
        out
    }
}

/// Compact form, `[row,column,N,E,S,W]` with `1` for every open passage.
impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{},{}", self.row, self.column)?;
        for dir in Direction::get_in_order() {
            write!(f, ",{}", u8::from(self.is_linked(dir)))?;
        }
        write!(f, "]")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn content_normalization() {
        assert_eq!(normalize_content(""), "   ");
        assert_eq!(normalize_content("X"), " X ");
        assert_eq!(normalize_content("@!"), "@! ");
        assert_eq!(normalize_content("abc"), "abc");
        assert_eq!(normalize_content("abcdef"), "abc");
        assert_eq!(normalize_content("é"), " é ");
    }

    #[test]
    fn reverse_is_involution() {
        for dir in Direction::get_in_order() {
            assert_eq!(dir.reverse().reverse(), dir);
            let (r, c) = dir.to_offset();
            let (rr, rc) = dir.reverse().to_offset();
            assert_eq!((r + rr, c + rc), (0, 0));
        }
    }

    #[test]
    fn compact_display() {
        let mut cell = Cell::new(2, 3, [Some(CellId(0)), None, Some(CellId(5)), None]);
        cell.set_link(Direction::South, true);

        assert_eq!(cell.to_string(), "[2,3,0,0,1,0]");
        assert!(cell.linked(Some(CellId(5))));
        assert!(!cell.linked(Some(CellId(0))));
        assert!(!cell.linked(None));
        assert_eq!(cell.links().as_slice(), &[CellId(5)]);
        assert_eq!(cell.neighbors().as_slice(), &[CellId(0), CellId(5)]);
        assert!(cell.describe().contains("South: YES"));
    }

    #[test]
    fn content_defaults_to_blank() {
        let mut cell = Cell::new(0, 0, [None; 4]);
        assert_eq!(cell.content(), Cell::BLANK);

        cell.set_content("X");
        assert_eq!(cell.content(), " X ");

        cell.clear_content();
        assert_eq!(cell.content(), "   ");
    }
}
