use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GridError {
    #[error("Cell ({row}, {col}) is outside the {rows}x{cols} grid")]
    OutOfRange { row: u32, col: u32, rows: u32, cols: u32 },
    #[error("Unknown preset: {0}")]
    UnknownPreset(String),
}

/// Pixel rectangle in surface-local coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: i32,
    pub height: i32,
}

impl Rect {
    pub fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self { x, y, width, height }
    }

    /// Inclusive on all four edges.
    pub fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px <= self.x + self.width && py >= self.y && py <= self.y + self.height
    }

    pub fn translate(&self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy, self.width, self.height)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Cell {
    pub on: bool,
    pub hovered: bool,
    rect: Rect,
}

impl Cell {
    pub fn new(rect: Rect) -> Self {
        Self {
            on: false,
            hovered: false,
            rect,
        }
    }

    pub fn rect(&self) -> Rect {
        self.rect
    }
}

/// Built-in on/off patterns for an 8x8 grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Preset {
    Heart,
    Cross,
}

// (row, col) pairs switched on by each preset
#[rustfmt::skip]
const HEART: &[(u32, u32)] = &[
    (1, 2), (1, 3), (1, 6), (1, 7),
    (2, 1), (2, 2), (2, 3), (2, 4), (2, 5), (2, 6), (2, 7), (2, 8),
    (3, 1), (3, 2), (3, 3), (3, 4), (3, 5), (3, 6), (3, 7), (3, 8),
    (4, 1), (4, 2), (4, 3), (4, 4), (4, 5), (4, 6), (4, 7), (4, 8),
    (5, 2), (5, 3), (5, 4), (5, 5), (5, 6), (5, 7),
    (6, 3), (6, 4), (6, 5), (6, 6),
    (7, 4), (7, 5),
];

#[rustfmt::skip]
const CROSS: &[(u32, u32)] = &[
    (1, 1), (2, 2), (3, 3), (4, 4), (5, 5), (6, 6), (7, 7), (8, 8),
    (1, 8),
    (2, 7),
    (3, 6),
    (4, 5),
    (5, 4),
    (6, 3),
    (7, 2),
    (8, 1),
];

impl Preset {
    pub fn name(&self) -> &'static str {
        match self {
            Preset::Heart => "heart",
            Preset::Cross => "cross",
        }
    }

    pub fn pairs(&self) -> &'static [(u32, u32)] {
        match self {
            Preset::Heart => HEART,
            Preset::Cross => CROSS,
        }
    }
}

impl FromStr for Preset {
    type Err = GridError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "heart" => Ok(Preset::Heart),
            "cross" => Ok(Preset::Cross),
            other => Err(GridError::UnknownPreset(other.to_string())),
        }
    }
}

impl fmt::Display for Preset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Row-major cell storage addressed with 1-based (row, col).
#[derive(Debug, Clone)]
pub struct Grid {
    rows: u32,
    cols: u32,
    cell_width: u32,
    cell_height: u32,
    cells: Vec<Cell>,
}

impl Grid {
    pub fn new(cols: u32, rows: u32, cell_width: u32, cell_height: u32) -> Self {
        let mut grid = Self {
            rows,
            cols,
            cell_width,
            cell_height,
            cells: Vec::new(),
        };
        grid.reset();
        grid
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }

    pub fn cell_size(&self) -> (u32, u32) {
        (self.cell_width, self.cell_height)
    }

    /// Grid extent in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (self.cols * self.cell_width, self.rows * self.cell_height)
    }

    /// Replaces every cell with a fresh, switched-off one.
    pub fn reset(&mut self) {
        let (cw, ch) = (self.cell_width as i32, self.cell_height as i32);
        let mut cells = Vec::with_capacity((self.rows * self.cols) as usize);
        for row in 1..=self.rows as i32 {
            for col in 1..=self.cols as i32 {
                cells.push(Cell::new(Rect::new((col - 1) * cw, (row - 1) * ch, cw - 1, ch - 1)));
            }
        }
        self.cells = cells;
    }

    fn index(&self, row: u32, col: u32) -> Result<usize, GridError> {
        if row == 0 || col == 0 || row > self.rows || col > self.cols {
            return Err(GridError::OutOfRange {
                row,
                col,
                rows: self.rows,
                cols: self.cols,
            });
        }
        Ok(((row - 1) * self.cols + (col - 1)) as usize)
    }

    pub fn get_cell(&self, row: u32, col: u32) -> Result<&Cell, GridError> {
        let index = self.index(row, col)?;
        Ok(&self.cells[index])
    }

    pub fn cell_mut(&mut self, row: u32, col: u32) -> Result<&mut Cell, GridError> {
        let index = self.index(row, col)?;
        Ok(&mut self.cells[index])
    }

    pub fn set_cell(&mut self, row: u32, col: u32, cell: Cell) -> Result<(), GridError> {
        *self.cell_mut(row, col)? = cell;
        Ok(())
    }

    pub fn cells(&self) -> impl Iterator<Item = &Cell> {
        self.cells.iter()
    }

    pub fn cells_mut(&mut self) -> impl Iterator<Item = &mut Cell> {
        self.cells.iter_mut()
    }

    pub fn load_preset(&mut self, preset: Preset) {
        self.reset();
        for &(row, col) in preset.pairs() {
            match self.cell_mut(row, col) {
                Ok(cell) => {
                    cell.hovered = false;
                    cell.on = true;
                }
                Err(err) => log::warn!("Skipping {} pixel: {}", preset, err),
            }
        }
    }

    /// Per-row values, reading each row left to right as binary digits.
    pub fn row_bits(&self) -> Vec<u64> {
        self.cells
            .chunks(self.cols.max(1) as usize)
            .map(|row| row.iter().fold(0u64, |acc, cell| (acc << 1) | cell.on as u64))
            .collect()
    }

    /// Resets the grid and switches cells on from per-row values.
    pub fn load_rows(&mut self, rows: &[u64]) {
        self.reset();
        let cols = self.cols;
        for (row_cells, bits) in self.cells.chunks_mut(cols.max(1) as usize).zip(rows) {
            for (i, cell) in row_cells.iter_mut().enumerate() {
                let shift = cols - 1 - i as u32;
                cell.on = (bits >> shift) & 1 == 1;
            }
        }
    }

    /// Comma-separated decimal row values, first row first.
    pub fn encode(&self) -> String {
        self.row_bits()
            .iter()
            .map(|bits| bits.to_string())
            .collect::<Vec<_>>()
            .join(",")
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new(8, 8, 20, 20)
    }
}
