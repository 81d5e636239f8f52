//! An in-memory mock filesystem for exercising storage-layer code
//! deterministically, without touching a real disk.
//!
//! The tree is a hierarchy of file and directory nodes addressable by
//! slash-separated paths, with POSIX-like attributes (mode, owner, group,
//! timestamps, size) but no real I/O and no permission enforcement.
//! Operations are synchronous and report expected failures (missing
//! paths, kind mismatches, duplicate creates) as ordinary `Result`s.
//!
//! ```
//! use mimicfs::{Attribute, AttrValue, MockFilesystem, NodeAttributes};
//!
//! let mut fs = MockFilesystem::new();
//! fs.create_deep("/srv/app", NodeAttributes::default()).unwrap();
//! fs.create("/srv/app/config.yaml", NodeAttributes::file().with_contents("retries: 3"))
//!     .unwrap();
//!
//! assert!(fs.exists("/srv/app/config.yaml"));
//! assert_eq!(
//!     fs.get_attribute("/srv/app/config.yaml", Attribute::Size, None),
//!     Ok(AttrValue::Size(10))
//! );
//! ```

pub mod fixture;
pub mod node;
pub mod path;
pub mod store;

pub use fixture::FixtureError;
pub use node::{AttrValue, AttrWrite, Attribute, Node, NodeAttributes, NodeKind};
pub use store::{MockFilesystem, StoreError};
