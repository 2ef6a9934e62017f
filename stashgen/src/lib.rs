//! # stashgen
//!
//! Build-time generator for save/restore companions of marked fields.
//!
//! Given a type hierarchy whose types mark some of their fields for state transfer, a
//! generation round produces one companion artifact per marked type. The artifact saves
//! the type's marked fields into a key-value container and restores them later, chaining
//! through the nearest ancestor that has an artifact of its own.
//!
//! The pieces, leaves first:
//! - [`classify`] maps a declared field type to a [`classify::TransferStrategy`]
//! - [`hierarchy`] finds the nearest marked ancestor, memoized per round in a [`hierarchy::RoundCache`]
//! - [`collect`] validates and classifies the round's marked fields
//! - [`emit`] renders the plain or renderable artifact and writes it through a [`emit::Filer`]
//! - [`round`] ties them together in [`round::Processor::process_round`]

pub mod classify;
pub mod collect;
pub mod config;
pub mod diagnostics;
pub mod emit;
pub mod error;
pub mod hierarchy;
pub mod model;
pub mod round;
pub mod support;

#[cfg(test)]
mod test_support;
