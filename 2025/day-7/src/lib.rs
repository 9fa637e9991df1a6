pub mod error;
pub mod grid;
pub mod part1;
pub mod part2;

pub use error::{MalformedGrid, ManifoldError};
pub use grid::{parse, Cell, Grid, RowPolicy};
pub use part1::{simulate_single_beam, trace_single_beam, BeamReport};
pub use part2::{count_timelines, TimelineTable};
