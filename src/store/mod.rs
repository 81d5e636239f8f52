//! The mock filesystem store and its operations.

mod filesystem;

pub use filesystem::{MockFilesystem, StoreError};
