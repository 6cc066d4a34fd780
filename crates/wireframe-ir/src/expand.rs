//! Macro expansion.
//!
//! `define component Name { ... }` declares a reusable subtree; a
//! `component Name` whose type is not in the built-in catalog references it.
//! Expansion replaces every reference with a structural copy of the
//! definition body, recursively, so later passes only ever see built-in
//! components.
//!
//! Definitions may reference each other but never in a cycle; cycles are
//! detected up front on the definition graph (expansion on a cyclic graph
//! would not terminate). Built-in names shadow definitions: a definition
//! named `Button` is never referenced, because `component Button` always
//! means the catalog component.

use std::collections::{HashMap, HashSet};
use wireframe_ast::ast::{Cell, Component, Define, Layout, Node, Project, Screen};
use wireframe_ast::{Diagnostic, ErrorKind};

use crate::catalog::is_builtin_component;

/// Check the definition graph for reference cycles.
///
/// Returns the first cycle found, reported along the full reference path
/// (`A -> B -> A`), with the span of the definition that opens the cycle.
pub fn check_cycles(defines: &[Define]) -> Result<(), Diagnostic> {
    let by_name: HashMap<&str, &Define> =
        defines.iter().map(|d| (d.name.as_str(), d)).collect();

    let mut visited = HashSet::new();
    for define in defines {
        let mut path = Vec::new();
        detect_cycle_dfs(define, &by_name, &mut visited, &mut path)?;
    }
    Ok(())
}

fn detect_cycle_dfs<'a>(
    define: &'a Define,
    by_name: &HashMap<&str, &'a Define>,
    visited: &mut HashSet<&'a str>,
    path: &mut Vec<&'a str>,
) -> Result<(), Diagnostic> {
    if let Some(pos) = path.iter().position(|name| *name == define.name) {
        let mut cycle: Vec<&str> = path[pos..].to_vec();
        cycle.push(&define.name);
        let first = cycle[0];
        let span = by_name.get(first).map(|d| d.span);
        return Err(Diagnostic::error(
            ErrorKind::CircularDefinition,
            span,
            format!("circular component definition: {}", cycle.join(" -> ")),
        ));
    }
    if visited.contains(define.name.as_str()) {
        return Ok(());
    }

    path.push(&define.name);
    for reference in references(&define.body) {
        if let Some(target) = by_name.get(reference) {
            detect_cycle_dfs(target, by_name, visited, path)?;
        }
    }
    path.pop();
    visited.insert(&define.name);
    Ok(())
}

/// Names of definitions referenced from a subtree (built-ins excluded).
fn references(node: &Node) -> Vec<&str> {
    let mut out = Vec::new();
    collect_references(node, &mut out);
    out
}

fn collect_references<'a>(node: &'a Node, out: &mut Vec<&'a str>) {
    match node {
        Node::Component(component) => {
            if !is_builtin_component(&component.component_type) {
                out.push(&component.component_type);
            }
        }
        Node::Layout(layout) => {
            for child in &layout.children {
                collect_references(child, out);
            }
        }
        Node::Cell(cell) => {
            for child in &cell.children {
                collect_references(child, out);
            }
        }
    }
}

/// Expand every macro reference in the project's screens.
///
/// Must run after [`check_cycles`]. References to names with no definition
/// are left in place for the catalog pass to report.
pub fn expand_project(project: &Project, diags: &mut Vec<Diagnostic>) -> Project {
    let by_name: HashMap<&str, &Define> = project
        .defines
        .iter()
        .map(|d| (d.name.as_str(), d))
        .collect();

    let screens = project
        .screens
        .iter()
        .map(|screen| Screen {
            name: screen.name.clone(),
            root: expand_layout(&screen.root, &by_name, diags),
            span: screen.span,
        })
        .collect();

    Project {
        name: project.name.clone(),
        themes: project.themes.clone(),
        colors: project.colors.clone(),
        mocks: project.mocks.clone(),
        defines: project.defines.clone(),
        screens,
        span: project.span,
    }
}

fn expand_node(
    node: &Node,
    by_name: &HashMap<&str, &Define>,
    diags: &mut Vec<Diagnostic>,
) -> Node {
    match node {
        Node::Layout(layout) => Node::Layout(expand_layout(layout, by_name, diags)),
        Node::Cell(cell) => Node::Cell(Cell {
            props: cell.props.clone(),
            children: cell
                .children
                .iter()
                .map(|child| expand_node(child, by_name, diags))
                .collect(),
            span: cell.span,
        }),
        Node::Component(component) => expand_component(component, by_name, diags),
    }
}

fn expand_layout(
    layout: &Layout,
    by_name: &HashMap<&str, &Define>,
    diags: &mut Vec<Diagnostic>,
) -> Layout {
    Layout {
        layout_type: layout.layout_type.clone(),
        params: layout.params.clone(),
        children: layout
            .children
            .iter()
            .map(|child| expand_node(child, by_name, diags))
            .collect(),
        span: layout.span,
    }
}

fn expand_component(
    component: &Component,
    by_name: &HashMap<&str, &Define>,
    diags: &mut Vec<Diagnostic>,
) -> Node {
    if is_builtin_component(&component.component_type) {
        return Node::Component(component.clone());
    }
    let Some(define) = by_name.get(component.component_type.as_str()) else {
        // Unknown reference; the catalog pass reports it
        return Node::Component(component.clone());
    };

    if !component.props.is_empty() {
        diags.push(Diagnostic::warning(
            ErrorKind::UnknownProperty,
            Some(component.span),
            format!(
                "properties on a reference to '{}' are ignored",
                component.component_type
            ),
        ));
    }

    // Structural copy of the definition body, itself expanded
    expand_node(&define.body, by_name, diags)
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use wireframe_ast::ast::Value;
    use wireframe_ast::foundation::Span;

    fn component(name: &str) -> Node {
        Node::Component(Component {
            component_type: name.to_string(),
            props: IndexMap::new(),
            span: Span::zero(0),
        })
    }

    fn define(name: &str, body: Node) -> Define {
        Define {
            name: name.to_string(),
            body,
            span: Span::zero(0),
        }
    }

    fn stack(children: Vec<Node>) -> Layout {
        Layout {
            layout_type: "stack".to_string(),
            params: IndexMap::new(),
            children,
            span: Span::zero(0),
        }
    }

    fn project_with(defines: Vec<Define>, root: Layout) -> Project {
        Project {
            name: "T".to_string(),
            themes: Vec::new(),
            colors: Vec::new(),
            mocks: Vec::new(),
            defines,
            screens: vec![Screen {
                name: "Main".to_string(),
                root,
                span: Span::zero(0),
            }],
            span: Span::zero(0),
        }
    }

    #[test]
    fn test_no_defines_no_cycles() {
        assert!(check_cycles(&[]).is_ok());
    }

    #[test]
    fn test_self_reference_is_a_cycle() {
        let defines = vec![define("A", component("A"))];
        let err = check_cycles(&defines).expect_err("cycle");
        assert_eq!(err.kind, ErrorKind::CircularDefinition);
        assert!(err.message.contains("A -> A"));
    }

    #[test]
    fn test_two_step_cycle_reports_full_path() {
        let defines = vec![
            define("A", Node::Layout(stack(vec![component("B")]))),
            define("B", Node::Layout(stack(vec![component("A")]))),
        ];
        let err = check_cycles(&defines).expect_err("cycle");
        assert!(err.message.contains("A -> B -> A"));
    }

    #[test]
    fn test_diamond_is_not_a_cycle() {
        // A -> B, A -> C, B -> D, C -> D: D is visited twice, no cycle
        let defines = vec![
            define(
                "A",
                Node::Layout(stack(vec![component("B"), component("C")])),
            ),
            define("B", Node::Layout(stack(vec![component("D")]))),
            define("C", Node::Layout(stack(vec![component("D")]))),
            define("D", component("Text")),
        ];
        assert!(check_cycles(&defines).is_ok());
    }

    #[test]
    fn test_builtin_name_shadows_definition() {
        // A definition named 'Text' is never referenced, so 'Text' inside
        // it does not form a cycle
        let defines = vec![define("Text", component("Text"))];
        assert!(check_cycles(&defines).is_ok());
    }

    #[test]
    fn test_expansion_replaces_reference_with_body() {
        let defines = vec![define(
            "StatCard",
            Node::Layout(Layout {
                layout_type: "card".to_string(),
                params: IndexMap::new(),
                children: vec![component("Heading")],
                span: Span::zero(0),
            }),
        )];
        let project = project_with(defines, stack(vec![component("StatCard")]));

        let mut diags = Vec::new();
        let expanded = expand_project(&project, &mut diags);
        assert!(diags.is_empty());

        let Node::Layout(card) = &expanded.screens[0].root.children[0] else {
            panic!("expected expanded layout");
        };
        assert_eq!(card.layout_type, "card");
        assert_eq!(card.children.len(), 1);
    }

    #[test]
    fn test_expansion_is_recursive() {
        let defines = vec![
            define("Outer", Node::Layout(stack(vec![component("Inner")]))),
            define("Inner", component("Text")),
        ];
        let project = project_with(defines, stack(vec![component("Outer")]));

        let mut diags = Vec::new();
        let expanded = expand_project(&project, &mut diags);

        let Node::Layout(outer) = &expanded.screens[0].root.children[0] else {
            panic!("expected layout");
        };
        let Node::Component(inner) = &outer.children[0] else {
            panic!("expected component");
        };
        assert_eq!(inner.component_type, "Text");
    }

    #[test]
    fn test_each_reference_gets_its_own_copy() {
        let defines = vec![define("Item", component("Text"))];
        let project = project_with(defines, stack(vec![component("Item"), component("Item")]));

        let mut diags = Vec::new();
        let expanded = expand_project(&project, &mut diags);
        assert_eq!(expanded.screens[0].root.children.len(), 2);
        for child in &expanded.screens[0].root.children {
            assert!(matches!(child, Node::Component(c) if c.component_type == "Text"));
        }
    }

    #[test]
    fn test_unknown_reference_left_for_catalog() {
        let project = project_with(vec![], stack(vec![component("Mystery")]));
        let mut diags = Vec::new();
        let expanded = expand_project(&project, &mut diags);

        assert!(matches!(
            &expanded.screens[0].root.children[0],
            Node::Component(c) if c.component_type == "Mystery"
        ));
    }

    #[test]
    fn test_props_on_reference_warn() {
        let defines = vec![define("Item", component("Text"))];
        let mut props = IndexMap::new();
        props.insert("text".to_string(), Value::Text("x".to_string()));
        let reference = Node::Component(Component {
            component_type: "Item".to_string(),
            props,
            span: Span::zero(0),
        });
        let project = project_with(defines, stack(vec![reference]));

        let mut diags = Vec::new();
        expand_project(&project, &mut diags);
        assert_eq!(diags.len(), 1);
        assert!(!diags[0].is_error());
        assert!(diags[0].message.contains("ignored"));
    }
}
