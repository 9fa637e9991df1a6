use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Error, Diagnostic)]
pub enum ManifoldError {
    #[error("input contains no grid rows")]
    #[diagnostic(
        code(manifold::empty_input),
        help("the manifold needs at least one row with an entry marker 'S'")
    )]
    EmptyInput,

    #[error(transparent)]
    #[diagnostic(transparent)]
    MalformedGrid(#[from] MalformedGrid),

    #[error("timeline count at row {row}, column {col} does not fit in 128 bits")]
    #[diagnostic(
        code(manifold::timeline_overflow),
        help("the grid branches more than 127 times along a single path")
    )]
    TimelineOverflow { row: usize, col: usize },
}

#[derive(Debug, Error, Diagnostic)]
pub enum MalformedGrid {
    #[error("unexpected symbol in grid: {message}")]
    #[diagnostic(
        code(manifold::malformed_grid::syntax),
        help("only '.', '^' and 'S' are valid grid symbols")
    )]
    Syntax { message: String },

    #[error("no entry marker 'S' found on the first row")]
    #[diagnostic(code(manifold::malformed_grid::missing_entry))]
    MissingEntry,

    #[error("first row has {} entry markers, at columns {columns:?}", .columns.len())]
    #[diagnostic(
        code(manifold::malformed_grid::multiple_entries),
        help("keep exactly one 'S' on the first row")
    )]
    MultipleEntries { columns: Vec<usize> },

    #[error("entry marker found at row {row}, column {col}")]
    #[diagnostic(
        code(manifold::malformed_grid::misplaced_entry),
        help("the entry marker may only appear on the first row")
    )]
    MisplacedEntry { row: usize, col: usize },

    #[error("row {row} has width {found}, expected {expected}")]
    #[diagnostic(
        code(manifold::malformed_grid::ragged_row),
        help("use the `pad` row policy to fill short rows with empty cells")
    )]
    RaggedRow {
        row: usize,
        expected: usize,
        found: usize,
    },
}
