use serde::Serialize;
use tree_sitter::Node;

use crate::python::decorators::{classify_method, Decorator, MemberBucket};
use crate::python::parser::ParsedModule;

/// Names defined directly in a module body, each list in source order
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Definitions {
    pub functions: Vec<String>,
    pub classes: Vec<String>,
    pub variables: Vec<String>,
}

impl Definitions {
    pub fn is_empty(&self) -> bool {
        self.functions.is_empty() && self.classes.is_empty() && self.variables.is_empty()
    }
}

/// Names defined directly in a class body, filed by [`MemberBucket`]
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClassDefinitions {
    pub attributes: Vec<String>,
    pub methods: Vec<String>,
    pub classmethods: Vec<String>,
    pub staticmethods: Vec<String>,
    pub properties: Vec<String>,
    pub setters: Vec<String>,
    pub getters: Vec<String>,
}

impl ClassDefinitions {
    pub fn bucket(&self, bucket: MemberBucket) -> &[String] {
        match bucket {
            MemberBucket::Attributes => &self.attributes,
            MemberBucket::Methods => &self.methods,
            MemberBucket::Classmethods => &self.classmethods,
            MemberBucket::Staticmethods => &self.staticmethods,
            MemberBucket::Properties => &self.properties,
            MemberBucket::Setters => &self.setters,
            MemberBucket::Getters => &self.getters,
        }
    }

    fn bucket_mut(&mut self, bucket: MemberBucket) -> &mut Vec<String> {
        match bucket {
            MemberBucket::Attributes => &mut self.attributes,
            MemberBucket::Methods => &mut self.methods,
            MemberBucket::Classmethods => &mut self.classmethods,
            MemberBucket::Staticmethods => &mut self.staticmethods,
            MemberBucket::Properties => &mut self.properties,
            MemberBucket::Setters => &mut self.setters,
            MemberBucket::Getters => &mut self.getters,
        }
    }
}

/// A class statement found at the top level of a module
pub struct ClassDef<'tree> {
    pub name: String,
    node: Node<'tree>,
}

/// Extracts definitions from the syntax tree of a single module.
///
/// Only immediate body statements are inspected: nothing nested in `if`
/// blocks, functions or inner classes is reported, and inherited members
/// are never resolved.
pub struct DefinitionExtractor;

impl DefinitionExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn module_definitions(&self, parsed: &ParsedModule) -> Definitions {
        let mut defs = Definitions::default();

        for statement in body_statements(parsed.root_node()) {
            let (_, definition) = unwrap_decorated(statement);
            match definition.kind() {
                "function_definition" if !is_async(&definition) => {
                    if let Some(name) = definition_name(parsed, &definition) {
                        defs.functions.push(name);
                    }
                }
                "class_definition" => {
                    if let Some(name) = definition_name(parsed, &definition) {
                        defs.classes.push(name);
                    }
                }
                "expression_statement" => {
                    assigned_names(parsed, &definition, &mut defs.variables);
                }
                _ => {}
            }
        }

        defs
    }

    /// Class statements of the module body in source order
    pub fn class_defs<'a>(&self, parsed: &'a ParsedModule) -> Vec<ClassDef<'a>> {
        body_statements(parsed.root_node())
            .into_iter()
            .map(|statement| unwrap_decorated(statement).1)
            .filter(|definition| definition.kind() == "class_definition")
            .filter_map(|node| {
                definition_name(parsed, &node).map(|name| ClassDef { name, node })
            })
            .collect()
    }

    pub fn class_definitions(&self, parsed: &ParsedModule, class: &ClassDef<'_>) -> ClassDefinitions {
        let mut defs = ClassDefinitions::default();
        let Some(body) = class.node.child_by_field_name("body") else {
            return defs;
        };

        for statement in body_statements(body) {
            let (decorators, definition) = unwrap_decorated(statement);
            match definition.kind() {
                "function_definition" if !is_async(&definition) => {
                    let Some(name) = definition_name(parsed, &definition) else {
                        continue;
                    };
                    let decorators: Vec<Decorator> = decorators
                        .iter()
                        .map(|node| decorator_shape(parsed, node))
                        .collect();
                    for bucket in classify_method(&decorators) {
                        defs.bucket_mut(bucket).push(name.clone());
                    }
                }
                "expression_statement" => {
                    assigned_names(parsed, &definition, &mut defs.attributes);
                }
                _ => {}
            }
        }

        defs
    }
}

impl Default for DefinitionExtractor {
    fn default() -> Self {
        Self::new()
    }
}

fn body_statements(node: Node<'_>) -> Vec<Node<'_>> {
    let mut cursor = node.walk();
    let statements = node
        .named_children(&mut cursor)
        .filter(|child| child.kind() != "comment")
        .collect();
    statements
}

/// Split a `decorated_definition` into its decorators and the wrapped
/// definition. Other statements come back undecorated.
fn unwrap_decorated(statement: Node<'_>) -> (Vec<Node<'_>>, Node<'_>) {
    if statement.kind() != "decorated_definition" {
        return (Vec::new(), statement);
    }

    let mut cursor = statement.walk();
    let decorators = statement
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "decorator")
        .collect();
    let definition = statement
        .child_by_field_name("definition")
        .unwrap_or(statement);

    (decorators, definition)
}

/// Coroutines are not reported as functions or methods
fn is_async(definition: &Node<'_>) -> bool {
    let mut cursor = definition.walk();
    let first = definition.children(&mut cursor).next();
    first.is_some_and(|token| token.kind() == "async")
}

fn definition_name(parsed: &ParsedModule, node: &Node<'_>) -> Option<String> {
    node.child_by_field_name("name")
        .map(|name| parsed.node_text(&name).to_string())
}

fn decorator_shape(parsed: &ParsedModule, decorator: &Node<'_>) -> Decorator {
    let mut cursor = decorator.walk();
    let expression = decorator
        .named_children(&mut cursor)
        .find(|child| child.kind() != "comment");

    match expression {
        Some(expr) if expr.kind() == "identifier" => Decorator::name(parsed.node_text(&expr)),
        Some(expr) if expr.kind() == "attribute" => {
            let object = expr
                .child_by_field_name("object")
                .map(|n| parsed.node_text(&n))
                .unwrap_or("");
            match expr.child_by_field_name("attribute") {
                Some(attr) => Decorator::attribute(object, parsed.node_text(&attr)),
                None => Decorator::Other,
            }
        }
        _ => Decorator::Other,
    }
}

/// Names bound by plain assignments in an expression statement.
///
/// Chained targets (`a = b = 1`) and unpacking (`a, *b = ...`) each bind
/// every name. Annotated assignments are skipped.
fn assigned_names(parsed: &ParsedModule, statement: &Node<'_>, names: &mut Vec<String>) {
    let mut cursor = statement.walk();
    let assignments: Vec<_> = statement
        .named_children(&mut cursor)
        .filter(|child| child.kind() == "assignment")
        .collect();

    for assignment in assignments {
        collect_assignment(parsed, assignment, names);
    }
}

fn collect_assignment(parsed: &ParsedModule, assignment: Node<'_>, names: &mut Vec<String>) {
    if assignment.child_by_field_name("type").is_some() {
        return;
    }

    if let Some(left) = assignment.child_by_field_name("left") {
        collect_targets(parsed, left, names);
    }

    if let Some(right) = assignment.child_by_field_name("right") {
        if right.kind() == "assignment" {
            collect_assignment(parsed, right, names);
        }
    }
}

fn collect_targets(parsed: &ParsedModule, target: Node<'_>, names: &mut Vec<String>) {
    match target.kind() {
        "identifier" => names.push(parsed.node_text(&target).to_string()),
        "pattern_list" | "tuple_pattern" | "list_pattern" | "list_splat_pattern"
        | "parenthesized_expression" | "tuple" | "list" => {
            let mut cursor = target.walk();
            let children: Vec<_> = target.named_children(&mut cursor).collect();
            for child in children {
                collect_targets(parsed, child, names);
            }
        }
        // attribute and subscript targets bind no new name
        _ => {}
    }
}
