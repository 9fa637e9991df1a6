use chumsky::prelude::*;
use glam::IVec2;
use itertools::Itertools;
use miette::miette;
use std::str::FromStr;

use crate::error::{MalformedGrid, ManifoldError};

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Cell {
    Empty,
    Splitter,
    /// Behaves like empty space once the beam has left it.
    Entry,
}

impl Cell {
    pub fn is_splitter(self) -> bool {
        self == Cell::Splitter
    }
}

/// What to do with rows shorter than the widest row.
#[derive(Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum RowPolicy {
    /// Fill short rows with empty cells up to the widest row.
    #[default]
    Pad,
    /// Every row must be as wide as the first one.
    Strict,
}

impl FromStr for RowPolicy {
    type Err = miette::Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pad" => Ok(RowPolicy::Pad),
            "strict" => Ok(RowPolicy::Strict),
            other => Err(miette!(
                "Unknown row policy '{other}', expected 'pad' or 'strict'"
            )),
        }
    }
}

/// Immutable, row-major manifold grid with a single entry on row 0.
#[derive(Debug, Clone)]
pub struct Grid {
    width: usize,
    height: usize,
    cells: Vec<Cell>,
    entry: usize,
}

/// Parses the grid text into rows of cells.
fn parser<'a>() -> impl Parser<'a, &'a str, Vec<Vec<Cell>>, extra::Err<Rich<'a, char>>> {
    let cell = choice((
        just('.').to(Cell::Empty),
        just('^').to(Cell::Splitter),
        just('S').to(Cell::Entry),
    ));

    cell.repeated()
        .collect::<Vec<_>>()
        .separated_by(text::newline())
        .allow_trailing()
        .collect::<Vec<_>>()
        // Blank lines carry no cells, drop them so they never count as rows
        .map(|rows| rows.into_iter().filter(|r| !r.is_empty()).collect())
}

/// Parses with the default [`RowPolicy::Pad`] and returns the entry column alongside the grid.
pub fn parse(input: &str) -> Result<(Grid, usize), ManifoldError> {
    let grid = Grid::parse_with(input, RowPolicy::default())?;
    let entry = grid.entry_column();
    Ok((grid, entry))
}

impl Grid {
    pub fn parse_with(input: &str, policy: RowPolicy) -> Result<Self, ManifoldError> {
        let rows = parser()
            .parse(input.trim_end())
            .into_result()
            .map_err(|errs| MalformedGrid::Syntax {
                message: errs.iter().map(ToString::to_string).join("; "),
            })?;

        let Some(first) = rows.first() else {
            return Err(ManifoldError::EmptyInput);
        };

        let width = match policy {
            RowPolicy::Pad => rows.iter().map(Vec::len).max().unwrap_or(0),
            RowPolicy::Strict => {
                let expected = first.len();
                if let Some((row, cells)) =
                    rows.iter().enumerate().find(|(_, r)| r.len() != expected)
                {
                    return Err(MalformedGrid::RaggedRow {
                        row,
                        expected,
                        found: cells.len(),
                    }
                    .into());
                }
                expected
            }
        };

        let columns: Vec<usize> = first.iter().positions(|&c| c == Cell::Entry).collect();
        if columns.len() > 1 {
            return Err(MalformedGrid::MultipleEntries { columns }.into());
        }
        let entry = columns
            .first()
            .copied()
            .ok_or(MalformedGrid::MissingEntry)?;

        if let Some((row, col)) = rows.iter().enumerate().skip(1).find_map(|(y, r)| {
            r.iter()
                .position(|&c| c == Cell::Entry)
                .map(|x| (y, x))
        }) {
            return Err(MalformedGrid::MisplacedEntry { row, col }.into());
        }

        let height = rows.len();
        let mut cells = Vec::with_capacity(width * height);
        for row in rows {
            cells.extend(row);
            cells.resize(cells.len().next_multiple_of(width), Cell::Empty);
        }

        tracing::debug!(width, height, entry, "parsed manifold grid");

        Ok(Grid {
            width,
            height,
            cells,
            entry,
        })
    }

    /// Number of rows (`R`).
    pub fn rows(&self) -> usize {
        self.height
    }

    /// Number of columns (`C`).
    pub fn columns(&self) -> usize {
        self.width
    }

    pub fn entry_column(&self) -> usize {
        self.entry
    }

    /// Entry position as `(x = column, y = row)`.
    pub fn entry(&self) -> IVec2 {
        IVec2::new(self.entry as i32, 0)
    }

    /// Returns the cell at an in-bounds coordinate.
    ///
    /// Panics when `row` or `col` lies outside the grid; callers treat
    /// such coordinates as exits before indexing.
    pub fn cell_at(&self, row: usize, col: usize) -> Cell {
        assert!(
            row < self.height && col < self.width,
            "cell ({row}, {col}) is outside a {}x{} grid",
            self.height,
            self.width
        );
        self.cells[row * self.width + col]
    }

    /// Returns the cell at (row, col), or `None` when the coordinate is an exit.
    pub fn get(&self, row: isize, col: isize) -> Option<Cell> {
        if row < 0 || col < 0 {
            return None;
        }
        let row = row as usize;
        let col = col as usize;
        if row >= self.height || col >= self.width {
            return None;
        }
        Some(self.cells[row * self.width + col])
    }

    pub fn at(&self, pos: IVec2) -> Option<Cell> {
        self.get(pos.y as isize, pos.x as isize)
    }

    pub fn row(&self, row: usize) -> &[Cell] {
        &self.cells[row * self.width..(row + 1) * self.width]
    }
}
