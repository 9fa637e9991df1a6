use glam::IVec2;
use miette::*;
use std::collections::{BTreeSet, HashSet, VecDeque};

use crate::grid::{Cell, Grid, RowPolicy};

const DOWN: IVec2 = IVec2::new(0, 1);
const DOWN_LEFT: IVec2 = IVec2::new(-1, 1);
const DOWN_RIGHT: IVec2 = IVec2::new(1, 1);

/// Outcome of a single-beam sweep. Positions are `(x = column, y = row)`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BeamReport {
    pub splits: usize,
    /// Splitters hit by the beam, each counted once.
    pub activated: BTreeSet<(usize, usize)>,
    /// Distinct out-of-grid coordinates where beams left the manifold.
    pub exits: BTreeSet<(i32, i32)>,
}

/// Beams waiting to be advanced plus every coordinate already advanced.
///
/// Two beams arriving at the same cell merge into one, so a coordinate is
/// processed at most once no matter how many histories lead to it.
struct BeamFrontier {
    queue: VecDeque<IVec2>,
    visited: HashSet<IVec2>,
}

impl BeamFrontier {
    fn new(start: IVec2) -> Self {
        Self {
            queue: VecDeque::from([start]),
            visited: HashSet::new(),
        }
    }

    /// Pops the next coordinate that has not been visited yet.
    fn next(&mut self) -> Option<IVec2> {
        while let Some(pos) = self.queue.pop_front() {
            if self.visited.insert(pos) {
                return Some(pos);
            }
        }
        None
    }

    fn push(&mut self, pos: IVec2) {
        self.queue.push_back(pos);
    }
}

#[tracing::instrument(skip_all, fields(rows = grid.rows(), columns = grid.columns()))]
pub fn trace_single_beam(grid: &Grid) -> BeamReport {
    let mut frontier = BeamFrontier::new(grid.entry());
    let mut report = BeamReport::default();

    while let Some(pos) = frontier.next() {
        match grid.at(pos) {
            None => {
                report.exits.insert((pos.x, pos.y));
            }
            Some(Cell::Splitter) => {
                tracing::trace!(row = pos.y, col = pos.x, "beam split");
                report.splits += 1;
                report.activated.insert((pos.y as usize, pos.x as usize));
                // Children are bounds checked when they are popped
                frontier.push(pos + DOWN_LEFT);
                frontier.push(pos + DOWN_RIGHT);
            }
            Some(Cell::Empty | Cell::Entry) => frontier.push(pos + DOWN),
        }
    }

    tracing::debug!(
        splits = report.splits,
        exits = report.exits.len(),
        visited = frontier.visited.len(),
        "beam sweep finished"
    );
    report
}

/// Counts the distinct splitters a single, self-merging beam triggers.
pub fn simulate_single_beam(grid: &Grid) -> usize {
    trace_single_beam(grid).splits
}

#[tracing::instrument]
pub fn process(input: &str) -> Result<String> {
    process_with(input, RowPolicy::default())
}

#[tracing::instrument]
pub fn process_with(input: &str, policy: RowPolicy) -> Result<String> {
    let grid = Grid::parse_with(input, policy)?;
    let total_splits = simulate_single_beam(&grid);

    Ok(total_splits.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    use crate::grid;
    use rstest::rstest;

    const SAMPLE: &str = ".......S.......
...............
.......^.......
...............
......^.^......
...............
.....^.^.^.....
...............
....^.^...^....
...............
...^.^...^.^...
...............
..^...^.....^..
...............
.^.^.^.^.^...^.
...............";

    #[test]
    fn it_works() -> Result<()> {
        assert_eq!("21", process(SAMPLE)?);
        Ok(())
    }

    #[rstest]
    #[case::no_splitters("S\n.\n.", 0)]
    #[case::single_row("S", 0)]
    #[case::single_splitter(".S.\n.^.", 1)]
    #[case::chained(
        "..S..
..^..
.^.^.",
        3
    )]
    #[case::bottom_row_splitter("..S..\n.....\n..^..", 1)]
    #[case::splitter_off_the_beam("S..\n..^\n...", 0)]
    // Both children of the top splitter converge on the bottom one
    #[case::merging_beams(
        "..S..
..^..
.^.^.
..^..",
        4
    )]
    #[case::edge_splitter("S..\n^..\n.^.", 2)]
    fn counts_splits(#[case] input: &str, #[case] expected: usize) -> Result<()> {
        let (grid, _) = grid::parse(input)?;
        assert_eq!(simulate_single_beam(&grid), expected);
        Ok(())
    }

    #[test]
    fn rerunning_gives_the_same_count() -> Result<()> {
        let (grid, _) = grid::parse(SAMPLE)?;
        assert_eq!(simulate_single_beam(&grid), simulate_single_beam(&grid));
        Ok(())
    }

    #[test]
    fn each_splitter_is_counted_once() -> Result<()> {
        let (grid, _) = grid::parse(SAMPLE)?;
        let report = trace_single_beam(&grid);
        assert_eq!(report.splits, report.activated.len());
        assert!(report
            .activated
            .iter()
            .all(|&(row, col)| grid.cell_at(row, col).is_splitter()));
        Ok(())
    }

    #[test]
    fn reports_distinct_exits() -> Result<()> {
        let (grid, _) = grid::parse("S..\n^..\n.^.")?;
        let report = trace_single_beam(&grid);
        // Left of column 0 on row 2, then both sides of the second splitter
        assert_eq!(
            report.exits,
            BTreeSet::from([(-1, 2), (0, 3), (2, 3)])
        );
        assert_eq!(report.activated, BTreeSet::from([(1, 0), (2, 1)]));
        Ok(())
    }

    #[test]
    fn row_policy_decides_ragged_input() -> Result<()> {
        assert_eq!("1", process_with(".S.\n.^", RowPolicy::Pad)?);
        assert!(process_with(".S.\n.^", RowPolicy::Strict).is_err());
        Ok(())
    }

    #[test]
    fn surfaces_parse_errors() {
        assert!(process("...\n.^.").is_err());
        assert!(process("").is_err());
    }
}
