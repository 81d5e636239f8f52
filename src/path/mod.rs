//! Path normalization and splitting helpers.
//!
//! Paths are plain strings: separators are canonicalized before any
//! resolution, and the normalized form of the root is the empty string.

mod normalize;

pub use normalize::{normalize_path, segments, split_parent};
