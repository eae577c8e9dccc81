use crate::error::{PymatuningError, Result};
use crate::tree::ModulePath;

/// Parses Python source with the tree-sitter Python grammar
pub struct PythonParser;

impl PythonParser {
    pub fn new() -> Self {
        Self
    }

    pub fn language(&self) -> tree_sitter::Language {
        tree_sitter_python::LANGUAGE.into()
    }

    /// Parse `source` as the body of `module`.
    ///
    /// Fails with a parse error pointing at the first ERROR or MISSING node
    /// if the source is not valid Python. Constructs the grammar accepts but
    /// Python 3 rejects, such as `print "x"`, fail the same way.
    pub fn parse(&self, module: &ModulePath, source: String) -> Result<ParsedModule> {
        let mut parser = tree_sitter::Parser::new();
        parser
            .set_language(&self.language())
            .map_err(|e| PymatuningError::Grammar(e.to_string()))?;

        let tree = parser.parse(&source, None).ok_or_else(|| PymatuningError::Parse {
            module: module.to_string(),
            line: 1,
            column: 1,
        })?;

        let root = tree.root_node();
        if let Some(node) = first_error(root).or_else(|| first_rejected(root)) {
            let position = node.start_position();
            return Err(PymatuningError::Parse {
                module: module.to_string(),
                line: position.row + 1,
                column: position.column + 1,
            });
        }

        Ok(ParsedModule {
            module: module.clone(),
            tree,
            source,
        })
    }
}

impl Default for PythonParser {
    fn default() -> Self {
        Self::new()
    }
}

fn first_error(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if !node.has_error() {
        return None;
    }
    if node.is_error() || node.is_missing() {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children
        .into_iter()
        .find_map(first_error)
        .or(Some(node))
}

/// Python 2 statements still recognised by the grammar
const PYTHON2_STATEMENTS: [&str; 2] = ["print_statement", "exec_statement"];

fn first_rejected(node: tree_sitter::Node<'_>) -> Option<tree_sitter::Node<'_>> {
    if is_rejected(&node) {
        return Some(node);
    }

    let mut cursor = node.walk();
    let children: Vec<_> = node.children(&mut cursor).collect();
    children.into_iter().find_map(first_rejected)
}

fn is_rejected(node: &tree_sitter::Node<'_>) -> bool {
    match node.kind() {
        kind if PYTHON2_STATEMENTS.contains(&kind) => true,
        "delete_statement" => deletes_call(node),
        "argument_list" => has_misordered_arguments(node),
        _ => false,
    }
}

/// `del f()` and `del a, f()`
fn deletes_call(statement: &tree_sitter::Node<'_>) -> bool {
    let mut cursor = statement.walk();
    let targets: Vec<_> = statement.named_children(&mut cursor).collect();
    targets.into_iter().any(|target| match target.kind() {
        "call" => true,
        "expression_list" => {
            let mut cursor = target.walk();
            let found = target
                .named_children(&mut cursor)
                .any(|item| item.kind() == "call");
            found
        }
        _ => false,
    })
}

/// Positional arguments after keywords, or `*args` after `**kwargs`
fn has_misordered_arguments(arguments: &tree_sitter::Node<'_>) -> bool {
    let mut seen_keyword = false;
    let mut seen_double_splat = false;

    let mut cursor = arguments.walk();
    let children: Vec<_> = arguments
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();

    for child in children {
        match child.kind() {
            "keyword_argument" => seen_keyword = true,
            "dictionary_splat" => seen_double_splat = true,
            "list_splat" if seen_double_splat => return true,
            "list_splat" => {}
            _ if seen_keyword || seen_double_splat => return true,
            _ => {}
        }
    }
    false
}

/// A module's syntax tree together with its source
pub struct ParsedModule {
    pub module: ModulePath,
    pub tree: tree_sitter::Tree,
    pub source: String,
}

impl ParsedModule {
    pub fn root_node(&self) -> tree_sitter::Node<'_> {
        self.tree.root_node()
    }

    pub fn source_bytes(&self) -> &[u8] {
        self.source.as_bytes()
    }

    pub fn node_text(&self, node: &tree_sitter::Node) -> &str {
        node.utf8_text(self.source_bytes()).unwrap_or("")
    }
}
