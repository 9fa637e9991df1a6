use miette::*;
use rayon::prelude::*;

use crate::error::ManifoldError;
use crate::grid::{Cell, Grid, RowPolicy};

/// Number of complete timelines from every cell of the grid to any exit.
///
/// A timeline only depends on the cell it passes through, never on how it got
/// there, so the table is filled bottom-up: row `r` reads nothing but row
/// `r + 1`. Coordinates past the last row or outside the columns are exits and
/// count as exactly one timeline.
///
/// Counts are `u128`. A cell whose count does not fit is stored as `None`
/// and only reported when it is queried.
pub struct TimelineTable {
    width: usize,
    height: usize,
    counts: Vec<Option<u128>>,
}

/// Timelines leaving a cell of kind `cell` at column `col`, given the row below.
fn step(cell: Cell, col: usize, below: &[Option<u128>]) -> Option<u128> {
    let at = |col: Option<usize>| match col.and_then(|c| below.get(c)) {
        Some(&count) => count,
        // Off either side of the grid
        None => Some(1),
    };

    match cell {
        Cell::Splitter => at(col.checked_sub(1))?.checked_add(at(Some(col + 1))?),
        Cell::Empty | Cell::Entry => at(Some(col)),
    }
}

impl TimelineTable {
    #[tracing::instrument(skip_all, fields(rows = grid.rows(), columns = grid.columns()))]
    pub fn build(grid: &Grid) -> Self {
        let width = grid.columns();
        let height = grid.rows();
        let mut counts = vec![None; width * height];

        // One past the last row, every column has already exited
        let exit_row = vec![Some(1u128); width];

        for row in (0..height).rev() {
            let (upper, lower) = counts.split_at_mut((row + 1) * width);
            let below: &[Option<u128>] = if row + 1 == height {
                &exit_row
            } else {
                &lower[..width]
            };
            let cells = grid.row(row);

            upper[row * width..]
                .par_iter_mut()
                .enumerate()
                .for_each(|(col, slot)| *slot = step(cells[col], col, below));
        }

        let overflowed = counts.iter().filter(|count| count.is_none()).count();
        if overflowed > 0 {
            tracing::debug!(overflowed, "cells exceed the u128 timeline ceiling");
        }

        Self {
            width,
            height,
            counts,
        }
    }

    /// Timelines starting at (row, col). Any coordinate outside the grid is an
    /// exit and yields 1.
    pub fn count(&self, row: usize, col: isize) -> Result<u128, ManifoldError> {
        if row >= self.height || col < 0 || col as usize >= self.width {
            return Ok(1);
        }
        let col = col as usize;
        self.counts[row * self.width + col].ok_or(ManifoldError::TimelineOverflow { row, col })
    }
}

/// Counts every distinct path from the entry to an exit, forking at each splitter.
pub fn count_timelines(grid: &Grid) -> Result<u128, ManifoldError> {
    let total = TimelineTable::build(grid).count(0, grid.entry_column() as isize)?;
    tracing::debug!(%total, "timelines counted");
    Ok(total)
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_with(input, RowPolicy::default())
}

#[tracing::instrument]
pub fn process_with(input: &str, policy: RowPolicy) -> Result<String> {
    let grid = Grid::parse_with(input, policy)?;
    let finished_timelines = count_timelines(&grid)?;

    Ok(finished_timelines.to_string())
}
