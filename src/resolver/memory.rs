use indexmap::IndexMap;

use crate::error::{PymatuningError, Result};
use crate::resolver::{ModuleHandle, SourceResolver, SubmoduleInfo};
use crate::tree::ModulePath;

#[derive(Debug, Clone)]
struct MemoryModule {
    source: String,
    is_package: bool,
}

/// Resolver over modules registered in memory.
///
/// Submodules are listed in registration order. A module only resolves if
/// every enclosing package was registered too.
#[derive(Debug, Clone, Default)]
pub struct MemoryResolver {
    modules: IndexMap<ModulePath, MemoryModule>,
}

impl MemoryResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_package(&mut self, path: impl Into<ModulePath>, source: impl Into<String>) {
        self.insert(path.into(), source.into(), true);
    }

    pub fn add_module(&mut self, path: impl Into<ModulePath>, source: impl Into<String>) {
        self.insert(path.into(), source.into(), false);
    }

    pub fn with_package(mut self, path: impl Into<ModulePath>, source: impl Into<String>) -> Self {
        self.add_package(path, source);
        self
    }

    pub fn with_module(mut self, path: impl Into<ModulePath>, source: impl Into<String>) -> Self {
        self.add_module(path, source);
        self
    }

    fn insert(&mut self, path: ModulePath, source: String, is_package: bool) {
        self.modules.insert(path, MemoryModule { source, is_package });
    }
}

impl SourceResolver for MemoryResolver {
    fn resolve(&self, path: &ModulePath) -> Result<ModuleHandle> {
        let module = self
            .modules
            .get(path)
            .ok_or_else(|| PymatuningError::resolution(path, "module not registered"))?;

        let mut ancestor = path.parent();
        while let Some(parent) = ancestor {
            match self.modules.get(&parent) {
                Some(m) if m.is_package => {}
                Some(_) => {
                    return Err(PymatuningError::resolution(
                        path,
                        format!("'{}' is not a package", parent),
                    ))
                }
                None => {
                    return Err(PymatuningError::resolution(
                        path,
                        format!("enclosing package '{}' not registered", parent),
                    ))
                }
            }
            ancestor = parent.parent();
        }

        Ok(ModuleHandle::new(path.clone(), module.is_package))
    }

    fn immediate_submodules(&self, handle: &ModuleHandle) -> Result<Vec<SubmoduleInfo>> {
        if !handle.is_package {
            return Ok(Vec::new());
        }

        Ok(self
            .modules
            .iter()
            .filter(|(path, _)| path.parent().as_ref() == Some(&handle.path))
            .map(|(path, module)| SubmoduleInfo::new(path.basename(), module.is_package))
            .collect())
    }

    fn source_text(&self, handle: &ModuleHandle) -> Result<String> {
        self.modules
            .get(&handle.path)
            .map(|module| module.source.clone())
            .ok_or_else(|| PymatuningError::resolution(&handle.path, "module not registered"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_registered_package() {
        let resolver = MemoryResolver::new().with_package("pkg", "");
        let handle = resolver.resolve(&"pkg".into()).unwrap();
        assert!(handle.is_package);
        assert!(handle.origin.is_none());
    }

    #[test]
    fn test_resolve_unregistered_module() {
        let resolver = MemoryResolver::new();
        assert!(matches!(
            resolver.resolve(&"pkg".into()),
            Err(PymatuningError::Resolution { .. })
        ));
    }

    #[test]
    fn test_resolve_requires_enclosing_package() {
        let resolver = MemoryResolver::new().with_module("pkg.orphan", "");
        assert!(resolver.resolve(&"pkg.orphan".into()).is_err());

        let resolver = MemoryResolver::new()
            .with_module("pkg", "")
            .with_module("pkg.orphan", "");
        assert!(resolver.resolve(&"pkg.orphan".into()).is_err());
    }

    #[test]
    fn test_submodules_in_registration_order() {
        let resolver = MemoryResolver::new()
            .with_package("pkg", "")
            .with_module("pkg.zeta", "")
            .with_package("pkg.alpha", "")
            .with_module("pkg.alpha.deep", "");

        let handle = resolver.resolve(&"pkg".into()).unwrap();
        let submodules = resolver.immediate_submodules(&handle).unwrap();
        assert_eq!(
            submodules,
            vec![
                SubmoduleInfo::new("zeta", false),
                SubmoduleInfo::new("alpha", true),
            ]
        );
    }

    #[test]
    fn test_source_text() {
        let resolver = MemoryResolver::new().with_module("mod_a", "A = 1\n");
        let handle = resolver.resolve(&"mod_a".into()).unwrap();
        assert_eq!(resolver.source_text(&handle).unwrap(), "A = 1\n");
    }
}
