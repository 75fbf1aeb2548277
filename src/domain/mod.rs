//! Domain logic - version rules independent of git and the filesystem

pub mod bump;
pub mod tag;
pub mod version;

pub use bump::BumpKind;
pub use tag::TagVersion;
pub use version::{bump_version, parse_version};
