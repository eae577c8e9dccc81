use std::collections::HashSet;
use std::path::{Path, PathBuf};

use walkdir::WalkDir;

use crate::error::{PymatuningError, Result};
use crate::resolver::{ModuleHandle, SourceResolver, SubmoduleInfo};
use crate::tree::ModulePath;

/// File holding a package's own source
pub const INIT_FILE: &str = "__init__.py";

/// Extension of Python source modules
pub const SOURCE_SUFFIX: &str = ".py";

enum Location {
    Package(PathBuf),
    Module(PathBuf),
}

/// Resolves modules against an ordered list of directories on disk
pub struct FsResolver {
    search_paths: Vec<PathBuf>,
}

impl FsResolver {
    pub fn new(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// A package directory shadows a module file with the same name
    fn locate(dir: &Path, name: &str) -> Option<Location> {
        let package_dir = dir.join(name);
        if package_dir.join(INIT_FILE).is_file() {
            return Some(Location::Package(package_dir));
        }

        let module_file = dir.join(format!("{}{}", name, SOURCE_SUFFIX));
        if module_file.is_file() {
            Some(Location::Module(module_file))
        } else {
            None
        }
    }

    fn package_dir<'a>(handle: &'a ModuleHandle) -> Result<&'a Path> {
        handle
            .origin
            .as_deref()
            .and_then(Path::parent)
            .ok_or_else(|| PymatuningError::resolution(&handle.path, "package has no directory"))
    }
}

impl Default for FsResolver {
    fn default() -> Self {
        Self::new(vec![PathBuf::from(".")])
    }
}

impl SourceResolver for FsResolver {
    fn resolve(&self, path: &ModulePath) -> Result<ModuleHandle> {
        if path.segments().any(str::is_empty) {
            return Err(PymatuningError::resolution(path, "empty path segment"));
        }

        let mut segments = path.segments();
        let first = segments
            .next()
            .ok_or_else(|| PymatuningError::resolution(path, "empty module path"))?;

        let mut location = self
            .search_paths
            .iter()
            .find_map(|dir| Self::locate(dir, first))
            .ok_or_else(|| {
                PymatuningError::resolution(path, format!("'{}' not found on search paths", first))
            })?;
        let mut resolved = ModulePath::new(first);

        for segment in segments {
            let Location::Package(dir) = &location else {
                return Err(PymatuningError::resolution(
                    path,
                    format!("'{}' is not a package", resolved),
                ));
            };
            location = Self::locate(dir, segment).ok_or_else(|| {
                PymatuningError::resolution(
                    path,
                    format!("no submodule '{}' in package '{}'", segment, resolved),
                )
            })?;
            resolved = resolved.child(segment);
        }

        let handle = match location {
            Location::Package(dir) => {
                ModuleHandle::new(path.clone(), true).with_origin(dir.join(INIT_FILE))
            }
            Location::Module(file) => ModuleHandle::new(path.clone(), false).with_origin(file),
        };
        tracing::debug!("Resolved {} to {:?}", path, handle.origin);

        Ok(handle)
    }

    fn immediate_submodules(&self, handle: &ModuleHandle) -> Result<Vec<SubmoduleInfo>> {
        if !handle.is_package {
            return Ok(Vec::new());
        }

        let dir = Self::package_dir(handle)?;
        let mut seen = HashSet::new();
        let mut submodules = Vec::new();

        let walker = WalkDir::new(dir)
            .min_depth(1)
            .max_depth(1)
            .sort_by_file_name();

        for entry in walker {
            let entry = entry.map_err(|e| PymatuningError::resolution(&handle.path, e))?;
            let file_name = entry.file_name().to_string_lossy();
            let path = entry.path();

            // links are not followed, so a symlinked directory never recurses
            let info = if entry.file_type().is_dir() {
                if file_name.contains('.') || !path.join(INIT_FILE).is_file() {
                    continue;
                }
                SubmoduleInfo::new(file_name.as_ref(), true)
            } else if let Some(stem) = file_name.strip_suffix(SOURCE_SUFFIX) {
                if stem.is_empty() || stem == "__init__" || stem.contains('.') {
                    continue;
                }
                SubmoduleInfo::new(stem, false)
            } else {
                continue;
            };

            if seen.insert(info.name.clone()) {
                submodules.push(info);
            }
        }

        Ok(submodules)
    }

    fn source_text(&self, handle: &ModuleHandle) -> Result<String> {
        let origin = handle
            .origin
            .as_ref()
            .ok_or_else(|| PymatuningError::resolution(&handle.path, "module has no source file"))?;

        std::fs::read_to_string(origin).map_err(|e| {
            PymatuningError::resolution(&handle.path, format!("{}: {}", origin.display(), e))
        })
    }
}
