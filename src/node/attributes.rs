use std::time::SystemTime;

use crate::node::NodeKind;

/// Names a readable attribute of a node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Attribute {
    Kind,
    Contents,
    Size,
    Mode,
    Owner,
    Group,
    Atime,
    Mtime,
}

/// The value of a single node attribute, as returned by attribute reads.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrValue {
    Kind(NodeKind),
    Contents(String),
    Size(u64),
    Mode(u32),
    Owner(String),
    Group(String),
    Atime(SystemTime),
    Mtime(SystemTime),
}

/// A writable attribute together with its new value.
///
/// `Kind` is deliberately absent: a node never changes kind after creation.
#[derive(Debug, Clone, PartialEq)]
pub enum AttrWrite {
    Contents(String),
    Size(u64),
    Mode(u32),
    Owner(String),
    Group(String),
    Atime(SystemTime),
    Mtime(SystemTime),
}

impl AttrWrite {
    /// The attribute this write targets.
    pub fn attribute(&self) -> Attribute {
        match self {
            AttrWrite::Contents(_) => Attribute::Contents,
            AttrWrite::Size(_) => Attribute::Size,
            AttrWrite::Mode(_) => Attribute::Mode,
            AttrWrite::Owner(_) => Attribute::Owner,
            AttrWrite::Group(_) => Attribute::Group,
            AttrWrite::Atime(_) => Attribute::Atime,
            AttrWrite::Mtime(_) => Attribute::Mtime,
        }
    }
}

/// Caller-supplied overrides for node creation.
///
/// Unset fields fall back to kind-specific defaults: empty contents, mode
/// 0o644 and size 0 for files, empty children and mode 0o755 for
/// directories, creation time for both timestamps and empty owner/group.
/// When `contents` is supplied for a file, `size` is derived from its byte
/// length and any caller-supplied size is ignored. Directories ignore
/// `contents` and `size` entirely.
#[derive(Debug, Clone, Default)]
pub struct NodeAttributes {
    pub kind: Option<NodeKind>,
    pub contents: Option<String>,
    pub size: Option<u64>,
    pub mode: Option<u32>,
    pub owner: Option<String>,
    pub group: Option<String>,
    pub atime: Option<SystemTime>,
    pub mtime: Option<SystemTime>,
}

impl NodeAttributes {
    pub fn file() -> Self {
        Self {
            kind: Some(NodeKind::File),
            ..Self::default()
        }
    }

    pub fn directory() -> Self {
        Self {
            kind: Some(NodeKind::Directory),
            ..Self::default()
        }
    }

    pub fn with_contents(mut self, contents: impl Into<String>) -> Self {
        self.contents = Some(contents.into());
        self
    }

    pub fn with_mode(mut self, mode: u32) -> Self {
        self.mode = Some(mode);
        self
    }

    pub fn with_owner(mut self, owner: impl Into<String>) -> Self {
        self.owner = Some(owner.into());
        self
    }

    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.group = Some(group.into());
        self
    }
}
