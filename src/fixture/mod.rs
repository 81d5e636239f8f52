//! Declarative YAML fixtures for seeding a mock filesystem.
//!
//! A fixture document has an optional `tree` mapping (mapping values are
//! directories, string or null scalars are files) and an optional `cwd`
//! naming a directory to start in.

mod loader;

pub use loader::FixtureError;
