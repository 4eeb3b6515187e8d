//! Domain logic - pure business rules independent of git operations

pub mod branch;
pub mod commit;
pub mod tag;
pub mod version;

pub use branch::BranchKind;
pub use commit::CommitInfo;
pub use tag::{TagInfo, VersionTagMatcher};
pub use version::{Version, VersionBump};
