use snafu::Snafu;
use tracing::{debug, warn};

use crate::node::{AttrValue, AttrWrite, Attribute, Node, NodeAttributes, NodeKind};
use crate::path::{normalize_path, segments, split_parent};

/// A mutable in-memory filesystem rooted at `/`.
///
/// Paths are resolved by literal child-name matching only; `.` and `..`
/// are not treated specially. This is an inherited limitation of the
/// original design, kept for compatibility rather than fixed.
///
/// The store is not internally synchronized; a single logical owner must
/// serialize access, which `&mut self` mutation already enforces.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MockFilesystem {
    root: Node,
    cwd: String,
}

impl Default for MockFilesystem {
    fn default() -> Self {
        Self::new()
    }
}

impl MockFilesystem {
    /// An empty filesystem: a root directory and `/` as the working
    /// directory.
    pub fn new() -> Self {
        Self {
            root: Node::root(),
            cwd: "/".to_string(),
        }
    }

    /// Turns any path into its normalized absolute form. Relative paths
    /// are joined onto the current working directory.
    fn absolutize(&self, path: &str) -> String {
        let normalized = normalize_path(path);

        if normalized.starts_with('/') || normalized.is_empty() {
            normalized
        } else {
            normalize_path(&format!("{}/{}", self.cwd, normalized))
        }
    }

    /// Walks a normalized absolute path from the root. The empty path is
    /// the root itself.
    fn resolve(&self, absolute: &str) -> Option<&Node> {
        let mut current = &self.root;

        for segment in segments(absolute) {
            current = current.child(segment)?;
        }

        Some(current)
    }

    fn resolve_mut(&mut self, absolute: &str) -> Option<&mut Node> {
        let mut current = &mut self.root;

        for segment in segments(absolute) {
            current = current.child_mut(segment)?;
        }

        Some(current)
    }

    /// Check whether a file or directory exists.
    pub fn exists(&self, path: &str) -> bool {
        self.resolve(&self.absolutize(path)).is_some()
    }

    /// Read one attribute of a node.
    ///
    /// When `expected_kind` is given, a node of any other kind fails with
    /// a type mismatch even if it has the attribute.
    pub fn get_attribute(
        &self,
        path: &str,
        attribute: Attribute,
        expected_kind: Option<NodeKind>,
    ) -> Result<AttrValue, StoreError> {
        let absolute = self.absolutize(path);
        let node = self.resolve(&absolute).ok_or_else(|| StoreError::NotFound {
            path: display_path(&absolute),
        })?;

        if let Some(expected) = expected_kind
            && node.kind() != expected
        {
            return Err(StoreError::TypeMismatch {
                path: display_path(&absolute),
                expected,
            });
        }

        // Contents and size only exist on files.
        node.get(attribute).ok_or_else(|| StoreError::TypeMismatch {
            path: display_path(&absolute),
            expected: NodeKind::File,
        })
    }

    /// Write one attribute of a node.
    ///
    /// Writing contents to anything but a file fails without mutating the
    /// tree; writing contents to a file recomputes its size. With
    /// `recursive` set and a directory target, the write is applied
    /// depth-first to every descendant before the directory itself.
    pub fn set_attribute(
        &mut self,
        path: &str,
        write: AttrWrite,
        recursive: bool,
    ) -> Result<(), StoreError> {
        let absolute = self.absolutize(path);
        let node = self.resolve_mut(&absolute).ok_or_else(|| StoreError::NotFound {
            path: display_path(&absolute),
        })?;

        if !node.accepts(&write) {
            warn!(
                "Refusing to write {:?} to the {} at '{}'",
                write.attribute(),
                node.kind(),
                display_path(&absolute)
            );
            return Err(StoreError::TypeMismatch {
                path: display_path(&absolute),
                expected: NodeKind::File,
            });
        }

        if recursive {
            node.apply_recursive(&write);
        } else {
            node.apply(&write);
        }

        Ok(())
    }

    /// Create a file or directory.
    ///
    /// The parent must already exist as a directory, and the base name
    /// must be free; there is no implicit overwrite.
    pub fn create(&mut self, path: &str, attributes: NodeAttributes) -> Result<(), StoreError> {
        let absolute = self.absolutize(path);

        if absolute.is_empty() {
            // The root always exists and is never re-created.
            return Err(StoreError::AlreadyExists {
                path: "/".to_string(),
            });
        }

        let (parent_path, name) = split_parent(&absolute);
        let invalid_parent = || StoreError::InvalidParent {
            path: display_path(&absolute),
        };

        let parent = self.resolve_mut(parent_path).ok_or_else(invalid_parent)?;
        let children = parent.children_mut().ok_or_else(invalid_parent)?;

        if children.contains_key(name) {
            return Err(StoreError::AlreadyExists {
                path: display_path(&absolute),
            });
        }

        let node = Node::from_attributes(attributes);
        debug!("Creating {} at '{}'", node.kind(), display_path(&absolute));
        children.insert(name.to_string(), node);

        Ok(())
    }

    /// Create a directory and every missing ancestor along the way.
    ///
    /// Existing segments are left untouched. Not atomic: if a segment
    /// cannot be created, segments created before it remain in place.
    pub fn create_deep(&mut self, path: &str, attributes: NodeAttributes) -> Result<(), StoreError> {
        let mut attributes = attributes;
        attributes.kind = Some(NodeKind::Directory);

        let absolute = self.absolutize(path);
        let mut walked = String::new();

        for segment in segments(&absolute) {
            walked.push('/');
            walked.push_str(segment);

            if self.exists(&walked) {
                continue;
            }

            self.create(&walked, attributes.clone())?;
        }

        // A pre-existing final segment may be a file; every segment must
        // end up a directory.
        match self.resolve(&absolute) {
            Some(node) if node.is_directory() => Ok(()),
            Some(_) => Err(StoreError::TypeMismatch {
                path: display_path(&absolute),
                expected: NodeKind::Directory,
            }),
            None => Err(StoreError::NotFound {
                path: display_path(&absolute),
            }),
        }
    }

    /// Copy a file or directory.
    ///
    /// The duplicate is structural: a copied directory owns fresh copies
    /// of all descendants. An existing destination is overwritten
    /// unconditionally; callers wanting a don't-overwrite policy check
    /// `exists` first.
    pub fn copy(&mut self, source: &str, destination: &str) -> Result<(), StoreError> {
        let source_absolute = self.absolutize(source);
        let duplicate = self
            .resolve(&source_absolute)
            .ok_or_else(|| StoreError::NotFound {
                path: display_path(&source_absolute),
            })?
            .clone();

        let destination_absolute = self.absolutize(destination);
        let (parent_path, name) = split_parent(&destination_absolute);
        let invalid_parent = || StoreError::InvalidParent {
            path: display_path(&destination_absolute),
        };

        if name.is_empty() {
            return Err(invalid_parent());
        }

        let parent = self.resolve_mut(parent_path).ok_or_else(invalid_parent)?;
        let children = parent.children_mut().ok_or_else(invalid_parent)?;

        debug!(
            "Copying '{}' to '{}'",
            display_path(&source_absolute),
            display_path(&destination_absolute)
        );
        children.insert(name.to_string(), duplicate);

        Ok(())
    }

    /// Move a file or directory: a copy followed by deleting the source.
    /// If the copy fails, nothing is deleted.
    pub fn move_node(&mut self, source: &str, destination: &str) -> Result<(), StoreError> {
        self.copy(source, destination)?;
        self.delete(source)
    }

    /// Delete a file or directory, dropping its entire subtree.
    ///
    /// The root is not special-cased here; deleting `/` fails because the
    /// root is nobody's child. Callers must not target the root.
    pub fn delete(&mut self, path: &str) -> Result<(), StoreError> {
        let absolute = self.absolutize(path);
        let (parent_path, name) = split_parent(&absolute);
        let invalid_parent = || StoreError::InvalidParent {
            path: display_path(&absolute),
        };

        let parent = self.resolve_mut(parent_path).ok_or_else(invalid_parent)?;
        let children = parent.children_mut().ok_or_else(invalid_parent)?;

        match children.remove(name) {
            Some(removed) => {
                debug!("Deleted {} at '{}'", removed.kind(), display_path(&absolute));
                Ok(())
            }
            None => Err(StoreError::NotFound {
                path: display_path(&absolute),
            }),
        }
    }

    /// The current working directory, always a normalized absolute path.
    pub fn get_cwd(&self) -> &str {
        &self.cwd
    }

    /// Change the current working directory.
    ///
    /// Fails without touching the working directory when the path does
    /// not resolve to a directory.
    pub fn set_cwd(&mut self, path: &str) -> Result<(), StoreError> {
        let absolute = self.absolutize(path);
        let node = self.resolve(&absolute).ok_or_else(|| StoreError::NotFound {
            path: display_path(&absolute),
        })?;

        if !node.is_directory() {
            return Err(StoreError::TypeMismatch {
                path: display_path(&absolute),
                expected: NodeKind::Directory,
            });
        }

        self.cwd = display_path(&absolute);
        debug!("Changed working directory to '{}'", self.cwd);

        Ok(())
    }
}

/// The printable form of a normalized absolute path; the root normalizes
/// to the empty string but displays as `/`.
fn display_path(absolute: &str) -> String {
    if absolute.is_empty() {
        "/".to_string()
    } else {
        absolute.to_string()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Snafu)]
pub enum StoreError {
    #[snafu(display("No node exists at '{}'", path))]
    NotFound { path: String },
    #[snafu(display("Expected a {} at '{}'", expected, path))]
    TypeMismatch { path: String, expected: NodeKind },
    #[snafu(display("A node already exists at '{}'", path))]
    AlreadyExists { path: String },
    #[snafu(display("The parent of '{}' is not an existing directory", path))]
    InvalidParent { path: String },
}
