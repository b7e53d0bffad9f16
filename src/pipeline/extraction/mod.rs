pub mod types;
pub mod normalize;
pub mod catalog;
pub mod table;
pub mod patterns;
pub mod orchestrator;
pub mod diagnostic;
pub mod input;

pub use types::*;
pub use normalize::*;
pub use catalog::*;
pub use table::*;
pub use patterns::*;
pub use orchestrator::*;
pub use diagnostic::*;
pub use input::*;

use serde::Serialize;
use thiserror::Error;

/// Row-level input problems. Reported alongside a complete record,
/// never fatal to the extraction as a whole.
#[derive(Error, Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum InputError {
    #[error("Table row {row} has {usable_cells} usable cell(s), expected at least 2")]
    MalformedRow { row: usize, usable_cells: usize },
}
