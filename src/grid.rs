use std::fmt;

use crate::Pos2;

/// A fixed-size field of binary cells
///
/// Cells are stored row-major, `1` for alive and `0` for dead. Grids are
/// treated as values: the rule produces a new grid instead of editing one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<u8>,
}

impl Grid {
    /// Creates an all-dead grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            height,
            cells: vec![0; width * height],
        }
    }

    /// Creates a grid with the given cells alive, ignoring out of bounds positions
    pub fn from_alive<I: IntoIterator<Item = Pos2>>(width: usize, height: usize, alive: I) -> Self {
        let mut grid = Self::new(width, height);
        for pos in alive {
            grid.set(pos, true);
        }
        grid
    }

    pub(crate) fn from_cells(width: usize, height: usize, cells: Vec<u8>) -> Self {
        debug_assert_eq!(cells.len(), width * height, "cell count does not match dimensions");
        Self {
            width,
            height,
            cells,
        }
    }

    #[inline]
    pub fn width(&self) -> usize {
        self.width
    }
    #[inline]
    pub fn height(&self) -> usize {
        self.height
    }

    /// Whether the cell at (x, y) is alive; anything outside the grid is dead
    #[inline]
    pub fn is_alive(&self, x: i32, y: i32) -> bool {
        self.get(Pos2::new(x, y)) != 0
    }

    #[inline]
    pub fn get(&self, pos: Pos2) -> u8 {
        if pos.in_bounds(self.width, self.height) {
            self.cells[self.offset(pos)]
        } else {
            0
        }
    }

    /// Sets a cell, returning `false` if `pos` lies outside the grid
    pub fn set(&mut self, pos: Pos2, alive: bool) -> bool {
        if !pos.in_bounds(self.width, self.height) {
            return false;
        }
        let offset = self.offset(pos);
        self.cells[offset] = u8::from(alive);
        true
    }

    #[inline]
    fn offset(&self, pos: Pos2) -> usize {
        pos.y as usize * self.width + pos.x as usize
    }

    /// The cells of row `y`
    ///
    /// # Panics
    /// If `y >= height`
    #[inline]
    pub fn row(&self, y: usize) -> &[u8] {
        &self.cells[y * self.width..(y + 1) * self.width]
    }

    pub fn rows(&self) -> impl Iterator<Item = &[u8]> {
        // chunks(0) panics, so a zero width grid has no rows to yield
        self.cells.chunks(self.width.max(1)).take(self.height)
    }

    /// Copies the grid into the nested `cells[y][x]` layout renderers expect
    pub fn to_rows(&self) -> Vec<Vec<u8>> {
        self.rows().map(<[u8]>::to_vec).collect()
    }

    /// The 3x3 neighborhood around (x, y) packed into 9 bits
    ///
    /// Row `dy` occupies bits `3*dy..3*dy+3`, with the left-most column in
    /// the highest of the three bits. The center cell is `1 << 4`. Cells
    /// outside the grid contribute zero.
    pub fn neighborhood(&self, x: usize, y: usize) -> usize {
        let (x, y) = (x as i32, y as i32);
        let mut bits = 0usize;
        for dy in 0..3 {
            for dx in 0..3 {
                if self.is_alive(x + dx - 1, y + dy - 1) {
                    bits |= 1 << (dy * 3 + (2 - dx));
                }
            }
        }
        bits
    }

    pub fn alive_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != 0).count()
    }

    /// Positions of alive cells, sorted row-major
    pub fn alive(&self) -> impl Iterator<Item = Pos2> + '_ {
        let width = self.width.max(1);
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &c)| c != 0)
            .map(move |(i, _)| Pos2::new((i % width) as i32, (i / width) as i32))
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (y, row) in self.rows().enumerate() {
            if y > 0 {
                writeln!(f)?;
            }
            // trailing dead cells are not printed
            let end = row.iter().rposition(|&c| c != 0).map_or(0, |i| i + 1);
            for &cell in &row[..end] {
                f.write_str(if cell != 0 { "█" } else { " " })?;
            }
        }
        Ok(())
    }
}
