//! Structural validation.
//!
//! Runs on the expanded AST (macro references already inlined) and checks
//! the rules that concern tree shape rather than individual properties:
//!
//! - at most one theme, colors, and mocks block
//! - at least one screen; screen names unique
//! - `split` has exactly two children, `panel` exactly one
//! - `grid` holds at least one cell and only cells; cells appear only
//!   inside grids
//! - every other container has at least one child

use std::collections::HashSet;
use wireframe_ast::ast::{Layout, Node, Project};
use wireframe_ast::{Diagnostic, ErrorKind};

/// Validate the project's structure, accumulating all violations.
pub fn validate(project: &Project) -> Vec<Diagnostic> {
    let mut diags = Vec::new();

    check_single_block(&project.themes, "theme", &mut diags);
    check_single_block(&project.colors, "colors", &mut diags);
    check_single_block(&project.mocks, "mocks", &mut diags);

    if project.screens.is_empty() {
        diags.push(Diagnostic::error(
            ErrorKind::MissingScreen,
            Some(project.span),
            "project declares no screens",
        ));
    }

    let mut seen = HashSet::new();
    for screen in &project.screens {
        if !seen.insert(screen.name.as_str()) {
            diags.push(Diagnostic::error(
                ErrorKind::DuplicateScreen,
                Some(screen.span),
                format!("duplicate screen '{}'", screen.name),
            ));
        }
        check_layout(&screen.root, &mut diags);
    }

    diags
}

fn check_single_block(
    blocks: &[wireframe_ast::ast::PropBlock],
    name: &str,
    diags: &mut Vec<Diagnostic>,
) {
    for extra in blocks.iter().skip(1) {
        diags.push(Diagnostic::error(
            ErrorKind::DuplicateBlock,
            Some(extra.span),
            format!("more than one '{}' block", name),
        ));
    }
}

fn check_layout(layout: &Layout, diags: &mut Vec<Diagnostic>) {
    let kind = layout.layout_type.as_str();
    let count = layout.children.len();

    if count == 0 {
        diags.push(Diagnostic::error(
            ErrorKind::EmptyContainer,
            Some(layout.span),
            format!("layout '{}' has no children", kind),
        ));
    }

    match kind {
        "split" if count != 2 => diags.push(Diagnostic::error(
            ErrorKind::ChildArity,
            Some(layout.span),
            format!("layout 'split' needs exactly two children, found {}", count),
        )),
        "panel" if count > 1 => diags.push(Diagnostic::error(
            ErrorKind::ChildArity,
            Some(layout.span),
            format!("layout 'panel' holds exactly one child, found {}", count),
        )),
        _ => {}
    }

    let is_grid = kind == "grid";
    for child in &layout.children {
        match child {
            Node::Cell(cell) => {
                if !is_grid {
                    diags.push(Diagnostic::error(
                        ErrorKind::CellPlacement,
                        Some(cell.span),
                        format!("cells belong inside a grid, not a '{}'", kind),
                    ));
                }
                if cell.children.is_empty() {
                    diags.push(Diagnostic::error(
                        ErrorKind::EmptyContainer,
                        Some(cell.span),
                        "cell has no children",
                    ));
                }
                for inner in &cell.children {
                    if let Node::Layout(nested) = inner {
                        check_layout(nested, diags);
                    }
                }
            }
            Node::Layout(nested) => {
                if is_grid {
                    diags.push(Diagnostic::error(
                        ErrorKind::CellPlacement,
                        Some(nested.span),
                        "grid children must be cells",
                    ));
                }
                check_layout(nested, diags);
            }
            Node::Component(component) => {
                if is_grid {
                    diags.push(Diagnostic::error(
                        ErrorKind::CellPlacement,
                        Some(component.span),
                        "grid children must be cells",
                    ));
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;
    use wireframe_ast::ast::{Cell, Component, PropBlock, Screen};
    use wireframe_ast::foundation::Span;

    fn component(name: &str) -> Node {
        Node::Component(Component {
            component_type: name.to_string(),
            props: IndexMap::new(),
            span: Span::zero(0),
        })
    }

    fn layout(kind: &str, children: Vec<Node>) -> Layout {
        Layout {
            layout_type: kind.to_string(),
            params: IndexMap::new(),
            children,
            span: Span::zero(0),
        }
    }

    fn cell(children: Vec<Node>) -> Node {
        Node::Cell(Cell {
            props: IndexMap::new(),
            children,
            span: Span::zero(0),
        })
    }

    fn project(screens: Vec<(&str, Layout)>) -> Project {
        Project {
            name: "T".to_string(),
            themes: Vec::new(),
            colors: Vec::new(),
            mocks: Vec::new(),
            defines: Vec::new(),
            screens: screens
                .into_iter()
                .map(|(name, root)| Screen {
                    name: name.to_string(),
                    root,
                    span: Span::zero(0),
                })
                .collect(),
            span: Span::zero(0),
        }
    }

    fn kinds(diags: &[Diagnostic]) -> Vec<ErrorKind> {
        diags.iter().map(|d| d.kind).collect()
    }

    #[test]
    fn test_valid_project_passes() {
        let project = project(vec![("Main", layout("stack", vec![component("Text")]))]);
        assert!(validate(&project).is_empty());
    }

    #[test]
    fn test_no_screens_is_error() {
        let project = project(vec![]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::MissingScreen]);
    }

    #[test]
    fn test_duplicate_screen_names() {
        let project = project(vec![
            ("Main", layout("stack", vec![component("Text")])),
            ("Main", layout("stack", vec![component("Text")])),
        ]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::DuplicateScreen]);
    }

    #[test]
    fn test_duplicate_theme_block() {
        let mut p = project(vec![("Main", layout("stack", vec![component("Text")]))]);
        let block = PropBlock {
            entries: IndexMap::new(),
            span: Span::zero(0),
        };
        p.themes.push(block.clone());
        p.themes.push(block);

        assert_eq!(kinds(&validate(&p)), vec![ErrorKind::DuplicateBlock]);
    }

    #[test]
    fn test_empty_layout_is_error() {
        let project = project(vec![("Main", layout("stack", vec![]))]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::EmptyContainer]);
    }

    #[test]
    fn test_split_needs_two_children() {
        let project = project(vec![(
            "Main",
            layout("split", vec![component("Text")]),
        )]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::ChildArity]);
    }

    #[test]
    fn test_panel_holds_one_child() {
        let project = project(vec![(
            "Main",
            layout("panel", vec![component("Text"), component("Text")]),
        )]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::ChildArity]);
    }

    #[test]
    fn test_grid_rejects_non_cell_children() {
        let project = project(vec![(
            "Main",
            layout("grid", vec![component("Text")]),
        )]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::CellPlacement]);
    }

    #[test]
    fn test_cell_outside_grid_is_error() {
        let project = project(vec![(
            "Main",
            layout("stack", vec![cell(vec![component("Text")])]),
        )]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::CellPlacement]);
    }

    #[test]
    fn test_empty_cell_is_error() {
        let project = project(vec![("Main", layout("grid", vec![cell(vec![])]))]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::EmptyContainer]);
    }

    #[test]
    fn test_errors_accumulate_across_screens() {
        let project = project(vec![
            ("One", layout("stack", vec![])),
            ("Two", layout("split", vec![component("Text")])),
        ]);
        let diags = validate(&project);
        assert!(diags.iter().any(|d| d.kind == ErrorKind::EmptyContainer));
        assert!(diags.iter().any(|d| d.kind == ErrorKind::ChildArity));
    }

    #[test]
    fn test_nested_layouts_are_checked() {
        let project = project(vec![(
            "Main",
            layout("stack", vec![Node::Layout(layout("stack", vec![]))]),
        )]);
        assert_eq!(kinds(&validate(&project)), vec![ErrorKind::EmptyContainer]);
    }
}
