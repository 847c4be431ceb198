use anyhow::{Result, bail};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Cell {
    Empty,
    Wall,
}

impl Cell {
    /// Parses a single layout symbol.
    pub fn from_symbol(symbol: char) -> Option<Cell> {
        match symbol {
            '1' | '#' => Some(Cell::Wall),
            '.' | '0' | ' ' => Some(Cell::Empty),
            _ => None,
        }
    }
}

/// Fixed-size grid of wall/empty cells, addressed as (row, col).
#[derive(Debug, Clone)]
pub struct GridMap {
    pub width: usize,
    pub height: usize,
    /// World units per cell side.
    pub cell_size: f32,
    cells: Vec<Vec<Cell>>,
}

impl GridMap {
    /// An all-empty map.
    pub fn open(width: usize, height: usize, cell_size: f32) -> Self {
        Self {
            width,
            height,
            cell_size,
            cells: vec![vec![Cell::Empty; width]; height],
        }
    }

    /// Walls along the outer ring, empty inside.
    pub fn bordered(width: usize, height: usize, cell_size: f32) -> Self {
        let mut map = Self::open(width, height, cell_size);
        for row in 0..height {
            for col in 0..width {
                if row == 0 || col == 0 || row + 1 == height || col + 1 == width {
                    map.cells[row][col] = Cell::Wall;
                }
            }
        }
        map
    }

    /// Builds a map from a block of layout rows and checks it against the
    /// declared dimensions.
    pub fn from_layout<S: AsRef<str>>(
        rows: &[S],
        width: usize,
        height: usize,
        cell_size: f32,
    ) -> Result<Self> {
        if width == 0 || height == 0 {
            bail!("map dimensions must be at least 1x1 (got {}x{})", width, height);
        }
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            bail!("cell size must be a positive number (got {})", cell_size);
        }
        if rows.len() != height {
            bail!(
                "map has {} rows but the declared height is {}",
                rows.len(),
                height
            );
        }

        let mut cells = Vec::with_capacity(height);
        for (row_idx, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            let row_len = row.chars().count();
            if row_len != width {
                bail!(
                    "map row {} has {} columns but the declared width is {}",
                    row_idx,
                    row_len,
                    width
                );
            }
            let mut parsed = Vec::with_capacity(width);
            for (col_idx, symbol) in row.chars().enumerate() {
                match Cell::from_symbol(symbol) {
                    Some(cell) => parsed.push(cell),
                    None => bail!(
                        "unknown map symbol {:?} at row {}, column {}",
                        symbol,
                        row_idx,
                        col_idx
                    ),
                }
            }
            cells.push(parsed);
        }

        Ok(Self {
            width,
            height,
            cell_size,
            cells,
        })
    }

    /// `None` means the indices are outside the grid.
    #[inline(always)]
    pub fn get_cell_at(&self, row: usize, col: usize) -> Option<Cell> {
        if row < self.height && col < self.width {
            return Some(self.cells[row][col]);
        }
        None
    }

    #[inline(always)]
    pub fn is_wall_at(&self, row: usize, col: usize) -> bool {
        matches!(self.get_cell_at(row, col), Some(Cell::Wall))
    }

    /// Returns false, leaving the map untouched, for out-of-range indices.
    pub fn set_cell(&mut self, row: usize, col: usize, cell: Cell) -> bool {
        if row < self.height && col < self.width {
            self.cells[row][col] = cell;
            return true;
        }
        false
    }

    /// Cell containing a world position, if any.
    #[inline(always)]
    pub fn cell_of(&self, x: f32, y: f32) -> Option<(usize, usize)> {
        let row = (y / self.cell_size).floor();
        let col = (x / self.cell_size).floor();
        if row < 0.0 || col < 0.0 || !row.is_finite() || !col.is_finite() {
            return None;
        }
        let (row, col) = (row as usize, col as usize);
        if row < self.height && col < self.width {
            Some((row, col))
        } else {
            None
        }
    }

    /// Extent of the map in world units.
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.width as f32 * self.cell_size,
            self.height as f32 * self.cell_size,
        )
    }

    /// Iterates over every cell in row-major order.
    pub fn cells(&self) -> impl Iterator<Item = (usize, usize, Cell)> + '_ {
        self.cells.iter().enumerate().flat_map(|(row, cells)| {
            cells
                .iter()
                .enumerate()
                .map(move |(col, &cell)| (row, col, cell))
        })
    }

    pub fn wall_count(&self) -> usize {
        self.cells().filter(|&(_, _, cell)| cell == Cell::Wall).count()
    }
}
