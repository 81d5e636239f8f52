use std::borrow::Cow;

use hashlink::LinkedHashMap;
use saphyr::{LoadableYamlNode, Scalar, Yaml};
use snafu::prelude::*;
use tracing::debug;

use crate::node::NodeAttributes;
use crate::store::{MockFilesystem, StoreError};

impl TryFrom<&str> for MockFilesystem {
    type Error = FixtureError;

    /// Builds a filesystem from a YAML fixture document.
    ///
    /// ```yaml
    /// cwd: /srv/app
    /// tree:
    ///   srv:
    ///     app:
    ///       config.yaml: "retries: 3"
    ///       cache: {}
    /// ```
    fn try_from(document: &str) -> Result<Self, Self::Error> {
        let parsed = Yaml::load_from_str(document)
            .map_err(|e| FixtureError::ParseError { source: e })?;
        let document = parsed.get(0).ok_or(FixtureError::MalformedFixture)?;

        let top_level = document
            .as_mapping()
            .ok_or(FixtureError::TopLevelNotMap)?;

        let mut filesystem = MockFilesystem::new();

        if let Some(tree) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("tree")))) {
            let entries = tree.as_mapping().ok_or(FixtureError::TreeNotMap)?;
            build_tree(&mut filesystem, "", entries)?;
        }

        if let Some(cwd) = top_level.get(&Yaml::Value(Scalar::String(Cow::Borrowed("cwd")))) {
            let path = cwd.as_str().ok_or(FixtureError::CwdNotString)?;
            filesystem.set_cwd(path).context(InvalidCwdSnafu { path })?;
        }

        Ok(filesystem)
    }
}

/// Creates one tree level under `prefix`, recursing into sub-mappings.
fn build_tree(
    filesystem: &mut MockFilesystem,
    prefix: &str,
    entries: &LinkedHashMap<Yaml, Yaml>,
) -> Result<(), FixtureError> {
    for (key, value) in entries {
        let Yaml::Value(Scalar::String(name)) = key else {
            debug!("Skipping fixture entry with non-string name: {:?}", key);
            continue;
        };

        let path = format!("{}/{}", prefix, name);

        match value {
            Yaml::Mapping(children) => {
                filesystem
                    .create(&path, NodeAttributes::directory())
                    .context(CreateSnafu { path: path.clone() })?;
                build_tree(filesystem, &path, children)?;
            }
            Yaml::Value(Scalar::String(contents)) => {
                filesystem
                    .create(&path, NodeAttributes::file().with_contents(contents.as_ref()))
                    .context(CreateSnafu { path: path.clone() })?;
            }
            Yaml::Value(Scalar::Null) => {
                filesystem
                    .create(&path, NodeAttributes::file())
                    .context(CreateSnafu { path: path.clone() })?;
            }
            _ => {
                return Err(FixtureError::InvalidEntry { path });
            }
        }
    }

    Ok(())
}

#[derive(Debug, Snafu)]
pub enum FixtureError {
    #[snafu(display("Failed to parse the fixture document"))]
    ParseError { source: saphyr::ScanError },
    #[snafu(display("Improperly formatted fixture document"))]
    MalformedFixture,
    #[snafu(display("Top level of a fixture should be a map"))]
    TopLevelNotMap,
    #[snafu(display("The tree section should be a map"))]
    TreeNotMap,
    #[snafu(display("The cwd section should be a string"))]
    CwdNotString,
    #[snafu(display("Fixture entry '{}' has an unsupported value", path))]
    InvalidEntry { path: String },
    #[snafu(display("Failed to create fixture entry '{}'", path))]
    CreateError { path: String, source: StoreError },
    #[snafu(display("Failed to enter fixture working directory '{}'", path))]
    InvalidCwd { path: String, source: StoreError },
}
