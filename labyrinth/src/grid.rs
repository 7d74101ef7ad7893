use std::{fmt::Display, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::ConfigError, vector::Vector2, wall::WallDetector};

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Wall,
    Open,
}

impl Display for Cell {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Cell::Wall => "#",
                Cell::Open => ".",
            }
        )
    }
}

/// A maze held in memory as a rectangular grid of cells, indexed
/// `cells[row][col]` with `row = y` and `col = x`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MazeGrid {
    pub rows: usize,
    pub columns: usize,
    pub cells: Vec<Vec<Cell>>,
}

impl MazeGrid {
    /// A grid where every cell is open.
    pub fn new(rows: usize, columns: usize) -> Self {
        Self {
            rows,
            columns,
            cells: vec![vec![Cell::Open; columns]; rows],
        }
    }

    /// Samples `detector` once for every cell of a `width` x `height` area.
    /// Useful to avoid re-sampling an image when the walker senses the same
    /// cells over and over.
    pub fn rasterize(width: usize, height: usize, detector: &impl WallDetector) -> Self {
        let mut cells = vec![vec![Cell::Wall; width]; height];

        for (row, line) in cells.iter_mut().enumerate() {
            for (col, cell) in line.iter_mut().enumerate() {
                if !detector.is_wall(Vector2::new(col as i32, row as i32)) {
                    *cell = Cell::Open;
                }
            }
        }

        Self {
            rows: height,
            columns: width,
            cells,
        }
    }

    pub fn get(&self, p: Vector2) -> Option<Cell> {
        if p.x < 0 || p.y < 0 {
            return None;
        }
        self.cells
            .get(p.y as usize)
            .and_then(|row| row.get(p.x as usize))
            .copied()
    }

    /// Blows every cell up into a `factor` x `factor` block, so corridors get
    /// `factor` cells wide.
    pub fn scale_up(&mut self, factor: usize) {
        self.cells = self
            .cells
            .iter()
            .flat_map(|row| {
                let wide: Vec<Cell> = row
                    .iter()
                    .flat_map(|&cell| std::iter::repeat(cell).take(factor))
                    .collect();
                std::iter::repeat(wide).take(factor)
            })
            .collect();

        self.rows *= factor;
        self.columns *= factor;
    }
}

impl WallDetector for MazeGrid {
    fn is_wall(&self, p: Vector2) -> bool {
        self.get(p) != Some(Cell::Open)
    }
}

impl Display for MazeGrid {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for row in &self.cells {
            for cell in row {
                write!(f, "{}", cell)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

impl FromStr for MazeGrid {
    type Err = ConfigError;

    /// Parses ascii art: `#` is a wall, `.` or a space is open. Blank lines are
    /// skipped.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells: Vec<Vec<Cell>> = Vec::new();

        for line in s.lines().filter(|l| !l.trim().is_empty()) {
            let row = cells.len();
            let parsed = line
                .chars()
                .enumerate()
                .map(|(col, c)| match c {
                    '#' => Ok(Cell::Wall),
                    '.' | ' ' => Ok(Cell::Open),
                    found => Err(ConfigError::GridChar { found, row, col }),
                })
                .collect::<Result<Vec<_>, _>>()?;

            if let Some(first) = cells.first() {
                if first.len() != parsed.len() {
                    return Err(ConfigError::RaggedGrid {
                        row,
                        expected: first.len(),
                        actual: parsed.len(),
                    });
                }
            }
            cells.push(parsed);
        }

        Ok(Self {
            rows: cells.len(),
            columns: cells.first().map_or(0, Vec::len),
            cells,
        })
    }
}
