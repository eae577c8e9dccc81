use indexmap::IndexMap;

use crate::error::Result;
use crate::resolver::{ModuleHandle, SourceResolver};
use crate::tree::graph::InterfaceTree;
use crate::tree::node::{ModulePath, NodeId};

/// Module containment graph of a package, built by recursive discovery.
///
/// Holds one module node per discovered module and one edge from every
/// package to each of its immediate submodules.
#[derive(Debug, Clone)]
pub struct PackageTree {
    root: ModulePath,
    graph: InterfaceTree,
    handles: IndexMap<ModulePath, ModuleHandle>,
}

impl PackageTree {
    /// Discover `root` and every module below it.
    ///
    /// Fails on the first module that cannot be resolved.
    pub fn discover(resolver: &dyn SourceResolver, root: &ModulePath) -> Result<Self> {
        let handle = resolver.resolve(root)?;

        let mut tree = Self {
            root: root.clone(),
            graph: InterfaceTree::new(),
            handles: IndexMap::new(),
        };
        tree.graph.add_node(NodeId::module(root.clone()));
        tree.visit(resolver, handle)?;

        tracing::debug!("Discovered {} modules under {}", tree.handles.len(), root);
        Ok(tree)
    }

    fn visit(&mut self, resolver: &dyn SourceResolver, handle: ModuleHandle) -> Result<()> {
        let submodules = resolver.immediate_submodules(&handle)?;
        let parent = handle.path.clone();
        self.handles.insert(parent.clone(), handle);

        for submodule in submodules {
            let child_path = parent.child(&submodule.name);
            let child = resolver.resolve(&child_path)?;
            tracing::debug!(
                "Found {} {}",
                if child.is_package { "package" } else { "module" },
                child_path
            );

            self.graph.ensure_edge(
                NodeId::module(parent.clone()),
                NodeId::module(child_path.clone()),
            );
            self.visit(resolver, child)?;
        }

        Ok(())
    }

    pub fn root(&self) -> &ModulePath {
        &self.root
    }

    pub fn root_node(&self) -> NodeId {
        NodeId::module(self.root.clone())
    }

    /// The module-only containment graph
    pub fn graph(&self) -> &InterfaceTree {
        &self.graph
    }

    pub fn handle(&self, path: &ModulePath) -> Option<&ModuleHandle> {
        self.handles.get(path)
    }

    pub fn module_count(&self) -> usize {
        self.handles.len()
    }

    /// All modules, depth-first in discovery order, root first
    pub fn module_paths(&self) -> impl Iterator<Item = &ModulePath> {
        self.handles.keys()
    }

    /// All modules in breadth-first order from the root
    pub fn bfs_modules(&self) -> Vec<&ModulePath> {
        self.graph
            .bfs(&NodeId::module(self.root.clone()))
            .into_iter()
            .filter_map(|node| node.as_module())
            .collect()
    }

    /// Modules directly contained in `path`, in discovery order
    pub fn submodules(&self, path: &ModulePath) -> Vec<&ModulePath> {
        self.graph
            .children(&NodeId::module(path.clone()))
            .filter_map(|node| node.as_module())
            .collect()
    }

    pub fn parent_of(&self, path: &ModulePath) -> Option<&ModulePath> {
        self.graph
            .parent(&NodeId::module(path.clone()))
            .and_then(|node| node.as_module())
    }
}

/// Fully qualified names of `root` and every module below it
pub fn list_all_submodules(
    resolver: &dyn SourceResolver,
    root: &ModulePath,
) -> Result<Vec<ModulePath>> {
    let tree = PackageTree::discover(resolver, root)?;
    Ok(tree.module_paths().cloned().collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PymatuningError;
    use crate::resolver::MemoryResolver;

    fn sample_resolver() -> MemoryResolver {
        MemoryResolver::new()
            .with_package("pkg", "")
            .with_module("pkg.util", "")
            .with_package("pkg.sub", "")
            .with_module("pkg.sub.deep", "")
            .with_module("pkg.last", "")
    }

    #[test]
    fn test_discover_builds_module_tree() {
        let tree = PackageTree::discover(&sample_resolver(), &"pkg".into()).unwrap();

        assert_eq!(tree.module_count(), 5);
        assert_eq!(tree.graph().node_count(), 5);
        assert_eq!(tree.graph().edge_count(), 4);
        assert_eq!(tree.graph().root().unwrap(), &tree.root_node());
    }

    #[test]
    fn test_parents_match_dotted_paths() {
        let tree = PackageTree::discover(&sample_resolver(), &"pkg".into()).unwrap();

        for path in tree.module_paths().filter(|p| *p != tree.root()) {
            assert_eq!(tree.parent_of(path).cloned(), path.parent());
        }
        assert_eq!(tree.parent_of(tree.root()), None);
    }

    #[test]
    fn test_module_paths_depth_first() {
        let paths = list_all_submodules(&sample_resolver(), &"pkg".into()).unwrap();
        let names: Vec<_> = paths.iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["pkg", "pkg.util", "pkg.sub", "pkg.sub.deep", "pkg.last"]);
    }

    #[test]
    fn test_bfs_modules() {
        let tree = PackageTree::discover(&sample_resolver(), &"pkg".into()).unwrap();
        let names: Vec<_> = tree.bfs_modules().iter().map(|p| p.as_str()).collect();
        assert_eq!(names, vec!["pkg", "pkg.util", "pkg.sub", "pkg.last", "pkg.sub.deep"]);
    }

    #[test]
    fn test_submodules() {
        let tree = PackageTree::discover(&sample_resolver(), &"pkg".into()).unwrap();
        let names: Vec<_> = tree
            .submodules(&"pkg".into())
            .iter()
            .map(|p| p.basename().to_string())
            .collect();
        assert_eq!(names, vec!["util", "sub", "last"]);
    }

    #[test]
    fn test_plain_module_root() {
        let resolver = MemoryResolver::new().with_module("single", "X = 1\n");
        let paths = list_all_submodules(&resolver, &"single".into()).unwrap();
        assert_eq!(paths, vec![ModulePath::new("single")]);
    }

    #[test]
    fn test_discover_nested_root() {
        let tree = PackageTree::discover(&sample_resolver(), &"pkg.sub".into()).unwrap();
        assert_eq!(tree.module_count(), 2);
        assert_eq!(tree.parent_of(&"pkg.sub.deep".into()), Some(&ModulePath::new("pkg.sub")));
    }

    #[test]
    fn test_unresolvable_root() {
        let result = PackageTree::discover(&MemoryResolver::new(), &"missing".into());
        assert!(matches!(result, Err(PymatuningError::Resolution { .. })));
    }
}
