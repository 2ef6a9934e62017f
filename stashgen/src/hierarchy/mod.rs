//! Type hierarchy resolution with a round-scoped memo

mod cache;
mod naming;
mod resolver;
mod type_info;

pub use cache::RoundCache;
pub use naming::TypeIdentity;
pub use resolver::HierarchyResolver;
pub use type_info::TypeInfo;
