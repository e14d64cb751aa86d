//! Changelog generation and merging into an existing document.

pub mod generate;
pub mod merge;

pub use generate::{commits_since_last_version, generate_changelog, today};
pub use merge::{ANCHOR, DEFAULT_HEADER, merge_changelog, update_changelog_file};
