//! File system operations for version bumps.
//!
//! Edits are staged in a [`Changeset`] and written (or previewed) together.

pub mod changeset;

pub use changeset::{Changeset, Unmatched, display_path, unified_diff};
