//! Marked field collection, validation and grouping

mod collector;
mod field;
mod group;

pub use collector::FieldCollector;
pub use field::CollectedField;
pub use group::{GenerationGroup, group_fields};
