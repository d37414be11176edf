//! Project and module-group configuration
//!
//! A [`Project`] names a build and its module groups (main, test, ...).
//! Groups are registered through the builder exactly once; registering a
//! second group under an existing name fails fast instead of silently
//! overwriting the first definition.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

/// Default project version when the builder is not told otherwise
const DEFAULT_VERSION: &str = "1.0.0-SNAPSHOT";

/// A named grouping of modules sharing source paths and a destination
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ModuleGroup {
    name: String,
    destination: PathBuf,
    module_source_path: Vec<PathBuf>,
    module_path: Vec<PathBuf>,
}

impl ModuleGroup {
    /// Group name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Where compiled output for this group lands
    pub fn destination(&self) -> &Path {
        &self.destination
    }

    /// Source roots of this group's modules
    pub fn module_source_path(&self) -> &[PathBuf] {
        &self.module_source_path
    }

    /// Additional locations resolved modules are read from
    pub fn module_path(&self) -> &[PathBuf] {
        &self.module_path
    }
}

/// Immutable project description
#[derive(Clone, Debug)]
pub struct Project {
    name: String,
    version: String,
    target: PathBuf,
    groups: BTreeMap<String, ModuleGroup>,
}

impl Project {
    /// Start building a project
    pub fn builder() -> ProjectBuilder {
        ProjectBuilder::default()
    }

    /// Project name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Project version
    pub fn version(&self) -> &str {
        &self.version
    }

    /// Root directory for build output
    pub fn target(&self) -> &Path {
        &self.target
    }

    /// All module groups, ordered by name
    pub fn groups(&self) -> impl Iterator<Item = &ModuleGroup> {
        self.groups.values()
    }

    /// Number of registered module groups
    pub fn group_count(&self) -> usize {
        self.groups.len()
    }

    /// Look up a module group by name
    pub fn group(&self, name: &str) -> Result<&ModuleGroup> {
        self.groups.get(name).ok_or_else(|| Error::NoSuchGroup {
            name: name.to_string(),
        })
    }
}

/// Builder for [`Project`]
#[derive(Debug)]
pub struct ProjectBuilder {
    name: String,
    version: String,
    target: Option<PathBuf>,
    groups: BTreeMap<String, ModuleGroup>,
}

impl Default for ProjectBuilder {
    fn default() -> Self {
        Self {
            name: env!("CARGO_PKG_NAME").to_string(),
            version: DEFAULT_VERSION.to_string(),
            target: None,
            groups: BTreeMap::new(),
        }
    }
}

impl ProjectBuilder {
    /// Set the project name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Set the project version
    pub fn version(mut self, version: impl Into<String>) -> Self {
        self.version = version.into();
        self
    }

    /// Set the build output root
    pub fn target(mut self, target: impl Into<PathBuf>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Open a new module group under `name`
    ///
    /// Fails with "`<name>` already defined" when a group of that name was
    /// registered before.
    pub fn group(self, name: impl Into<String>) -> Result<ModuleGroupBuilder> {
        let name = name.into();
        if self.groups.contains_key(&name) {
            return Err(Error::AlreadyDefined { name });
        }
        Ok(ModuleGroupBuilder {
            project: self,
            group: ModuleGroup {
                name,
                destination: PathBuf::new(),
                module_source_path: Vec::new(),
                module_path: Vec::new(),
            },
        })
    }

    /// Finish the project
    pub fn build(self) -> Project {
        let target = self
            .target
            .unwrap_or_else(|| Path::new("target").join(&self.name));
        Project {
            name: self.name,
            version: self.version,
            target,
            groups: self.groups,
        }
    }
}

/// Nested builder for one [`ModuleGroup`]; [`end`](ModuleGroupBuilder::end)
/// returns to the owning [`ProjectBuilder`]
#[derive(Debug)]
pub struct ModuleGroupBuilder {
    project: ProjectBuilder,
    group: ModuleGroup,
}

impl ModuleGroupBuilder {
    /// Set the group's output destination
    pub fn destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.group.destination = destination.into();
        self
    }

    /// Set the group's module source roots
    pub fn module_source_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.group.module_source_path = paths;
        self
    }

    /// Set the group's module path
    pub fn module_path(mut self, paths: Vec<PathBuf>) -> Self {
        self.group.module_path = paths;
        self
    }

    /// Register the group and return to the project builder
    pub fn end(mut self) -> ProjectBuilder {
        if self.group.destination.as_os_str().is_empty() {
            self.group.destination = Path::new("target").join(&self.group.name);
        }
        self.project
            .groups
            .insert(self.group.name.clone(), self.group);
        self.project
    }
}
