use serde::Serialize;

use crate::error::{PymatuningError, Result};
use crate::python::{DefinitionExtractor, Definitions, MemberBucket, ParsedModule, PythonParser};
use crate::resolver::SourceResolver;
use crate::tree::graph::InterfaceTree;
use crate::tree::node::{ModulePath, NodeId};
use crate::tree::package::PackageTree;

/// Definitions record of one module
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ModuleDefinitions {
    pub module: ModulePath,
    #[serde(flatten)]
    pub definitions: Definitions,
}

/// Builds the interface tree of a package: module containment plus the
/// functions, variables, classes and class members each module defines.
///
/// Any module that fails to resolve or parse aborts the build; no partial
/// tree is returned.
pub struct InterfaceTreeBuilder<'r> {
    resolver: &'r dyn SourceResolver,
    parser: PythonParser,
    extractor: DefinitionExtractor,
}

impl<'r> InterfaceTreeBuilder<'r> {
    pub fn new(resolver: &'r dyn SourceResolver) -> Self {
        Self {
            resolver,
            parser: PythonParser::new(),
            extractor: DefinitionExtractor::new(),
        }
    }

    pub fn build(&self, root: &ModulePath) -> Result<InterfaceTree> {
        tracing::info!("Building interface tree for {}", root);
        let package_tree = PackageTree::discover(self.resolver, root)?;
        self.build_from(&package_tree)
    }

    /// Extend an already discovered package tree with symbol nodes
    pub fn build_from(&self, package_tree: &PackageTree) -> Result<InterfaceTree> {
        let mut tree = package_tree.graph().clone();

        for module in package_tree.bfs_modules() {
            let parsed = self.parse_module(package_tree, module)?;
            self.attach_definitions(&mut tree, &parsed);
        }

        tracing::info!(
            "Interface tree for {}: {} nodes, {} edges",
            package_tree.root(),
            tree.node_count(),
            tree.edge_count()
        );
        Ok(tree)
    }

    /// Definitions of every module in the package, breadth-first
    pub fn package_definitions(&self, package_tree: &PackageTree) -> Result<Vec<ModuleDefinitions>> {
        package_tree
            .bfs_modules()
            .into_iter()
            .map(|module| {
                let parsed = self.parse_module(package_tree, module)?;
                Ok(ModuleDefinitions {
                    module: module.clone(),
                    definitions: self.extractor.module_definitions(&parsed),
                })
            })
            .collect()
    }

    /// Definitions of a single module, resolved on its own
    pub fn module_definitions(&self, module: &ModulePath) -> Result<Definitions> {
        let handle = self.resolver.resolve(module)?;
        let source = self.resolver.source_text(&handle)?;
        let parsed = self.parser.parse(module, source)?;
        Ok(self.extractor.module_definitions(&parsed))
    }

    fn parse_module(&self, package_tree: &PackageTree, module: &ModulePath) -> Result<ParsedModule> {
        let handle = package_tree
            .handle(module)
            .ok_or_else(|| PymatuningError::resolution(module, "module was not discovered"))?;
        let source = self.resolver.source_text(handle)?;
        self.parser.parse(module, source)
    }

    fn attach_definitions(&self, tree: &mut InterfaceTree, parsed: &ParsedModule) {
        let module = &parsed.module;
        let module_node = NodeId::module(module.clone());
        let defs = self.extractor.module_definitions(parsed);

        for name in defs.functions.iter().chain(&defs.variables) {
            tree.ensure_edge(module_node.clone(), NodeId::symbol(module, name.as_str()));
        }

        for class in self.extractor.class_defs(parsed) {
            let class_node = NodeId::symbol(module, class.name.as_str());
            tree.ensure_edge(module_node.clone(), class_node.clone());

            let members = self.extractor.class_definitions(parsed, &class);
            for bucket in MemberBucket::INSERTION_ORDER {
                for member in members.bucket(bucket) {
                    tree.ensure_edge(
                        class_node.clone(),
                        NodeId::class_member(module, &class.name, member.as_str()),
                    );
                }
            }
        }

        tracing::debug!(
            "Extracted {}: {} functions, {} classes, {} variables",
            module,
            defs.functions.len(),
            defs.classes.len(),
            defs.variables.len()
        );
    }
}

/// Build the interface tree of the package rooted at `root`
pub fn interface_tree(resolver: &dyn SourceResolver, root: &ModulePath) -> Result<InterfaceTree> {
    InterfaceTreeBuilder::new(resolver).build(root)
}
