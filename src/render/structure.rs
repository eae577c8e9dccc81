use serde_json::{Map, Value};

use crate::tree::{ModulePath, PackageTree};

/// Nested view of a package's modules.
///
/// A package becomes `{"name": [children...]}`, a plain module its bare
/// name. A root that is not a package has no structure and yields `[]`.
pub fn package_structure(tree: &PackageTree) -> Value {
    if !is_package(tree, tree.root()) {
        return Value::Array(Vec::new());
    }
    structure_of(tree, tree.root())
}

fn is_package(tree: &PackageTree, path: &ModulePath) -> bool {
    tree.handle(path).is_some_and(|handle| handle.is_package)
}

fn structure_of(tree: &PackageTree, path: &ModulePath) -> Value {
    let children = tree
        .submodules(path)
        .into_iter()
        .map(|child| {
            if is_package(tree, child) {
                structure_of(tree, child)
            } else {
                Value::String(child.basename().to_string())
            }
        })
        .collect();

    let mut map = Map::new();
    map.insert(path.basename().to_string(), Value::Array(children));
    Value::Object(map)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resolver::MemoryResolver;
    use serde_json::json;

    #[test]
    fn test_nested_structure() {
        let resolver = MemoryResolver::new()
            .with_package("pkg", "")
            .with_module("pkg.util", "")
            .with_package("pkg.sub", "")
            .with_module("pkg.sub.deep", "")
            .with_package("pkg.empty", "");
        let tree = PackageTree::discover(&resolver, &"pkg".into()).unwrap();

        assert_eq!(
            package_structure(&tree),
            json!({"pkg": ["util", {"sub": ["deep"]}, {"empty": []}]})
        );
    }

    #[test]
    fn test_plain_module_has_no_structure() {
        let resolver = MemoryResolver::new().with_module("single", "");
        let tree = PackageTree::discover(&resolver, &"single".into()).unwrap();
        assert_eq!(package_structure(&tree), json!([]));
    }
}
