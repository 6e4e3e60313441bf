use arrayvec::ArrayVec;

use crate::grid::{Grid, Loc};
use crate::rules::Cell;

/// The 8 compass offsets, in the fixed enumeration order rule sets may rely
/// on. Cardinals come first.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Direction {
    West,
    East,
    North,
    South,
    NorthWest,
    NorthEast,
    SouthWest,
    SouthEast,
}

impl Direction {
    pub const ALL: [Direction; 8] = [
        Direction::West,
        Direction::East,
        Direction::North,
        Direction::South,
        Direction::NorthWest,
        Direction::NorthEast,
        Direction::SouthWest,
        Direction::SouthEast,
    ];

    /// `(dcol, drow)` with row 0 at the top.
    pub fn offset(self) -> (i32, i32) {
        match self {
            Direction::West => (-1, 0),
            Direction::East => (1, 0),
            Direction::North => (0, -1),
            Direction::South => (0, 1),
            Direction::NorthWest => (-1, -1),
            Direction::NorthEast => (1, -1),
            Direction::SouthWest => (-1, 1),
            Direction::SouthEast => (1, 1),
        }
    }

    pub fn is_cardinal(self) -> bool {
        matches!(
            self,
            Direction::West | Direction::East | Direction::North | Direction::South
        )
    }
}

/// The in-bounds cells adjacent to one grid coordinate. Offsets that fall
/// outside the grid are omitted, not reported as failures; edge cells
/// legitimately have fewer than 8 neighbors.
#[derive(Clone, Debug)]
pub struct Neighborhood<'a, C: Cell> {
    cells: ArrayVec<(Direction, &'a C), 8>,
}

impl<'a, C: Cell> Neighborhood<'a, C> {
    pub fn around(grid: &'a Grid<C>, center: Loc) -> Self {
        let mut cells = ArrayVec::new();
        for direction in Direction::ALL {
            let (dcol, drow) = direction.offset();
            if let Some(loc) = center.offset(dcol, drow)
                && let Some(cell) = grid.cell(loc)
            {
                cells.push((direction, cell));
            }
        }
        Self { cells }
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Direction, &'a C)> + '_ {
        self.cells.iter().copied()
    }

    pub fn cells(&self) -> impl Iterator<Item = &'a C> + '_ {
        self.cells.iter().map(|(_, cell)| *cell)
    }

    pub fn get(&self, direction: Direction) -> Option<&'a C> {
        self.cells
            .iter()
            .find(|(tagged, _)| *tagged == direction)
            .map(|(_, cell)| *cell)
    }
}
