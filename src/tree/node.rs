use std::fmt;

use serde::{Deserialize, Serialize};

/// Separator between the segments of a dotted module path
pub const MODULE_SEPARATOR: char = '.';

/// Fully qualified dotted module path, e.g. `pkg.sub.leaf`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModulePath(String);

impl ModulePath {
    pub fn new(path: impl Into<String>) -> Self {
        Self(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split(MODULE_SEPARATOR)
    }

    /// Last dotted segment (`pkg.sub.leaf` -> `leaf`)
    pub fn basename(&self) -> &str {
        self.0
            .rsplit_once(MODULE_SEPARATOR)
            .map(|(_, base)| base)
            .unwrap_or(&self.0)
    }

    /// Path with the last segment removed, `None` for a top-level module
    pub fn parent(&self) -> Option<ModulePath> {
        self.0
            .rsplit_once(MODULE_SEPARATOR)
            .map(|(parent, _)| ModulePath::new(parent))
    }

    pub fn child(&self, name: &str) -> ModulePath {
        ModulePath(format!("{}{}{}", self.0, MODULE_SEPARATOR, name))
    }
}

impl fmt::Display for ModulePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModulePath {
    fn from(path: &str) -> Self {
        Self::new(path)
    }
}

/// Identity of a node in the package and interface trees.
///
/// Members are keyed by their path tuple only: `(module, name)` for a
/// top-level function, class or variable and `(module, class, name)` for a
/// class member. Two definitions sharing a path tuple are the same node.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NodeId {
    Module { path: ModulePath },
    Symbol { module: ModulePath, name: String },
    ClassMember {
        module: ModulePath,
        class: String,
        name: String,
    },
}

impl NodeId {
    pub fn module(path: ModulePath) -> Self {
        NodeId::Module { path }
    }

    pub fn symbol(module: &ModulePath, name: impl Into<String>) -> Self {
        NodeId::Symbol {
            module: module.clone(),
            name: name.into(),
        }
    }

    pub fn class_member(module: &ModulePath, class: &str, name: impl Into<String>) -> Self {
        NodeId::ClassMember {
            module: module.clone(),
            class: class.to_string(),
            name: name.into(),
        }
    }

    /// Text shown for this node in an outline: a module's basename or a
    /// member's bare name.
    pub fn label(&self) -> &str {
        match self {
            NodeId::Module { path } => path.basename(),
            NodeId::Symbol { name, .. } | NodeId::ClassMember { name, .. } => name,
        }
    }

    pub fn as_module(&self) -> Option<&ModulePath> {
        match self {
            NodeId::Module { path } => Some(path),
            _ => None,
        }
    }

    pub fn is_module(&self) -> bool {
        matches!(self, NodeId::Module { .. })
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            NodeId::Module { path } => write!(f, "{}", path),
            NodeId::Symbol { module, name } => write!(f, "({}, {})", module, name),
            NodeId::ClassMember {
                module,
                class,
                name,
            } => write!(f, "({}, {}, {})", module, class, name),
        }
    }
}
