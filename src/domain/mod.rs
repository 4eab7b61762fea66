//! Domain logic - pure versioning rules with no I/O

pub mod commit;
pub mod tag;
pub mod version;

pub use commit::{BumpClassifier, ParsedCommit};
pub use tag::Tag;
pub use version::{Version, VersionBump};
