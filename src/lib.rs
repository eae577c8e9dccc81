pub mod config;
pub mod error;
pub mod python;
pub mod render;
pub mod resolver;
pub mod tree;

pub use config::{load_config, parse_config, Config, ConfigOverrides, CONFIG_FILENAME};
pub use error::{PymatuningError, Result};
pub use python::{
    classify_method, ClassDefinitions, Decorator, DefinitionExtractor, Definitions, MemberBucket,
    ParsedModule, PythonParser,
};
pub use render::{listing, package_structure, MarkerStyle, OutlineRenderer};
pub use resolver::{FsResolver, MemoryResolver, ModuleHandle, SourceResolver, SubmoduleInfo};
pub use tree::{
    interface_tree, list_all_submodules, InterfaceTree, InterfaceTreeBuilder, ModuleDefinitions,
    ModulePath, NodeId, PackageTree,
};
