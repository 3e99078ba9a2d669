pub mod common;
pub mod pascal;

pub use common::strip_comments;
pub use pascal::{PascalParser, ParsedUnit, UnitSource};
