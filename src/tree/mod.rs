//! Package and interface trees.
//!
//! The package tree holds module containment only. The interface tree adds
//! one node per top-level function, variable and class, and one node per
//! class member, each keyed by its path tuple.

pub mod graph;
pub mod interface;
pub mod node;
pub mod package;

pub use graph::InterfaceTree;
pub use interface::{interface_tree, InterfaceTreeBuilder, ModuleDefinitions};
pub use node::{ModulePath, NodeId, MODULE_SEPARATOR};
pub use package::{list_all_submodules, PackageTree};
