//! Module resolution for Python source trees.
//!
//! A [`SourceResolver`] turns dotted module paths into handles, lists the
//! immediate submodules of a package and hands out source text for parsing.
//! - [`FsResolver`] searches directories on disk
//! - [`MemoryResolver`] serves modules registered in memory

pub mod fs;
pub mod memory;

use std::path::PathBuf;

use crate::error::Result;
use crate::tree::ModulePath;

pub use fs::FsResolver;
pub use memory::MemoryResolver;

/// A resolved module
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModuleHandle {
    /// Fully qualified module path
    pub path: ModulePath,
    /// Whether the module is a package that may contain submodules
    pub is_package: bool,
    /// Source file backing the module, if it lives on disk
    pub origin: Option<PathBuf>,
}

impl ModuleHandle {
    pub fn new(path: ModulePath, is_package: bool) -> Self {
        Self {
            path,
            is_package,
            origin: None,
        }
    }

    pub fn with_origin(mut self, origin: PathBuf) -> Self {
        self.origin = Some(origin);
        self
    }
}

/// One entry of a package's submodule listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubmoduleInfo {
    /// Bare submodule name (no dots)
    pub name: String,
    pub is_package: bool,
}

impl SubmoduleInfo {
    pub fn new(name: impl Into<String>, is_package: bool) -> Self {
        Self {
            name: name.into(),
            is_package,
        }
    }
}

pub trait SourceResolver {
    /// Resolve a dotted path, failing with a resolution error if no module
    /// is found.
    fn resolve(&self, path: &ModulePath) -> Result<ModuleHandle>;

    /// Immediate submodules of `handle`, in a stable order. Empty for
    /// non-package modules.
    fn immediate_submodules(&self, handle: &ModuleHandle) -> Result<Vec<SubmoduleInfo>>;

    /// Source text of the module
    fn source_text(&self, handle: &ModuleHandle) -> Result<String>;
}
