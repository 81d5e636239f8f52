use std::time::SystemTime;

use derive_more::Display;
use hashlink::LinkedHashMap;

use crate::node::{AttrValue, AttrWrite, Attribute, NodeAttributes};

const DEFAULT_FILE_MODE: u32 = 0o644;
const DEFAULT_DIRECTORY_MODE: u32 = 0o755;

/// Represents the type of a filesystem node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display)]
pub enum NodeKind {
    #[display("file")]
    File,
    #[display("dir")]
    Directory,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum NodeData {
    File {
        contents: String,
        size: u64,
    },
    Directory {
        children: LinkedHashMap<String, Node>,
    },
}

/// One entry in the mock filesystem tree.
///
/// A directory exclusively owns its children; detaching a subtree from its
/// parent drops it. There are no back-references from child to parent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Node {
    data: NodeData,
    mode: u32,
    owner: String,
    group: String,
    atime: SystemTime,
    mtime: SystemTime,
}

impl Node {
    /// Builds a node from caller-supplied attributes layered over the
    /// kind-specific defaults. The kind defaults to a file.
    pub(crate) fn from_attributes(attributes: NodeAttributes) -> Self {
        let kind = attributes.kind.unwrap_or(NodeKind::File);
        let now = SystemTime::now();

        let data = match kind {
            NodeKind::File => {
                // Supplied contents win over any caller-supplied size.
                let size = match &attributes.contents {
                    Some(contents) => contents.len() as u64,
                    None => attributes.size.unwrap_or(0),
                };
                NodeData::File {
                    contents: attributes.contents.unwrap_or_default(),
                    size,
                }
            }
            NodeKind::Directory => NodeData::Directory {
                children: LinkedHashMap::new(),
            },
        };

        let default_mode = match kind {
            NodeKind::File => DEFAULT_FILE_MODE,
            NodeKind::Directory => DEFAULT_DIRECTORY_MODE,
        };

        Node {
            data,
            mode: attributes.mode.unwrap_or(default_mode),
            owner: attributes.owner.unwrap_or_default(),
            group: attributes.group.unwrap_or_default(),
            atime: attributes.atime.unwrap_or(now),
            mtime: attributes.mtime.unwrap_or(now),
        }
    }

    /// An empty root directory with default attributes.
    pub(crate) fn root() -> Self {
        Self::from_attributes(NodeAttributes::directory())
    }

    pub fn kind(&self) -> NodeKind {
        match self.data {
            NodeData::File { .. } => NodeKind::File,
            NodeData::Directory { .. } => NodeKind::Directory,
        }
    }

    pub fn is_directory(&self) -> bool {
        self.kind() == NodeKind::Directory
    }

    pub fn is_file(&self) -> bool {
        self.kind() == NodeKind::File
    }

    /// Looks up a direct child by its literal name. Files have no children.
    pub(crate) fn child(&self, name: &str) -> Option<&Node> {
        match &self.data {
            NodeData::Directory { children } => children.get(name),
            NodeData::File { .. } => None,
        }
    }

    pub(crate) fn child_mut(&mut self, name: &str) -> Option<&mut Node> {
        match &mut self.data {
            NodeData::Directory { children } => children.get_mut(name),
            NodeData::File { .. } => None,
        }
    }

    pub(crate) fn children_mut(&mut self) -> Option<&mut LinkedHashMap<String, Node>> {
        match &mut self.data {
            NodeData::Directory { children } => Some(children),
            NodeData::File { .. } => None,
        }
    }

    /// Reads one attribute, or `None` if the attribute does not exist for
    /// this kind of node (contents and size are file-only).
    pub fn get(&self, attribute: Attribute) -> Option<AttrValue> {
        match attribute {
            Attribute::Kind => Some(AttrValue::Kind(self.kind())),
            Attribute::Contents => match &self.data {
                NodeData::File { contents, .. } => Some(AttrValue::Contents(contents.clone())),
                NodeData::Directory { .. } => None,
            },
            Attribute::Size => match &self.data {
                NodeData::File { size, .. } => Some(AttrValue::Size(*size)),
                NodeData::Directory { .. } => None,
            },
            Attribute::Mode => Some(AttrValue::Mode(self.mode)),
            Attribute::Owner => Some(AttrValue::Owner(self.owner.clone())),
            Attribute::Group => Some(AttrValue::Group(self.group.clone())),
            Attribute::Atime => Some(AttrValue::Atime(self.atime)),
            Attribute::Mtime => Some(AttrValue::Mtime(self.mtime)),
        }
    }

    /// Whether this node has the attribute the write targets.
    pub(crate) fn accepts(&self, write: &AttrWrite) -> bool {
        match write {
            AttrWrite::Contents(_) | AttrWrite::Size(_) => self.is_file(),
            _ => true,
        }
    }

    /// Applies one attribute write. Writes the kind does not accept are
    /// skipped, so the recursive walk can visit mixed subtrees safely.
    pub(crate) fn apply(&mut self, write: &AttrWrite) {
        match write {
            AttrWrite::Contents(new_contents) => {
                if let NodeData::File { contents, size } = &mut self.data {
                    *contents = new_contents.clone();
                    *size = contents.len() as u64;
                }
            }
            AttrWrite::Size(new_size) => {
                if let NodeData::File { size, .. } = &mut self.data {
                    *size = *new_size;
                }
            }
            AttrWrite::Mode(mode) => self.mode = *mode,
            AttrWrite::Owner(owner) => self.owner = owner.clone(),
            AttrWrite::Group(group) => self.group = group.clone(),
            AttrWrite::Atime(atime) => self.atime = *atime,
            AttrWrite::Mtime(mtime) => self.mtime = *mtime,
        }
    }

    /// Applies a write depth-first to every descendant before this node.
    pub(crate) fn apply_recursive(&mut self, write: &AttrWrite) {
        if let NodeData::Directory { children } = &mut self.data {
            for child in children.values_mut() {
                child.apply_recursive(write);
            }
        }

        self.apply(write);
    }
}
