//! Database models split into domain-specific modules.

pub mod admin;
pub mod common;
pub mod exhibitor;
pub mod sequence;
pub mod stats;
pub mod visitor;

pub use admin::*;
pub use common::*;
pub use exhibitor::*;
pub use sequence::*;
pub use stats::*;
pub use visitor::*;
