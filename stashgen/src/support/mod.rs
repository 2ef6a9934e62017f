//! Process-level support shared by the binary

pub mod tracing;
