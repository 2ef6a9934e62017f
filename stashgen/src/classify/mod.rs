//! Field type classification into transfer strategies

mod classifier;
mod strategy;

pub use classifier::Classifier;
pub use strategy::TransferStrategy;
