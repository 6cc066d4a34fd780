//! Normalization pipeline.
//!
//! Orchestrates the passes in order: theme resolution, cycle check, macro
//! expansion, structural validation, then catalog conversion with stable id
//! assignment. Errors accumulate across independent subtrees; a definition
//! cycle is fatal immediately because expansion would not terminate.

use std::collections::HashMap;
use tracing::debug;
use wireframe_ast::ast::{Cell, Component, Layout, Node, Project};
use wireframe_ast::{has_errors, Diagnostic};

use crate::catalog;
use crate::document::{
    ChildRef, IrDocument, IrNode, IrProject, IrScreen, LayoutSpec, NodeId, Slot, ThemeConfig,
    IR_VERSION,
};
use crate::expand;
use crate::structure;
use crate::theme;
use indexmap::IndexMap;

/// A successfully normalized document with any non-blocking diagnostics.
#[derive(Debug, Clone, PartialEq)]
pub struct Normalized {
    pub document: IrDocument,
    pub warnings: Vec<Diagnostic>,
}

/// Normalize a project into the IR.
///
/// Returns every diagnostic found when any of them is an error; the partial
/// document is never handed out.
pub fn normalize(project: &Project) -> Result<Normalized, Vec<Diagnostic>> {
    let mut diags = Vec::new();

    debug!(project = %project.name, "resolving theme");
    let config = theme::resolve(project, &mut diags);

    debug!(defines = project.defines.len(), "checking definition graph");
    if let Err(cycle) = expand::check_cycles(&project.defines) {
        diags.push(cycle);
        return Err(diags);
    }

    let expanded = expand::expand_project(project, &mut diags);
    diags.extend(structure::validate(&expanded));

    debug!(screens = expanded.screens.len(), "converting to IR");
    let theme = config.theme.clone();
    let mut converter = Converter {
        theme,
        ids: IdAllocator::default(),
        nodes: IndexMap::new(),
        diags: &mut diags,
    };

    let mut screens = Vec::new();
    for screen in &expanded.screens {
        let id = converter.ids.allocate("screen", &slug(&screen.name));
        if let Some(root) = converter.layout_node(&screen.root) {
            screens.push(IrScreen {
                id,
                name: screen.name.clone(),
                viewport: None,
                root,
            });
        }
    }
    let nodes = converter.nodes;

    if has_errors(&diags) {
        return Err(diags);
    }

    let document = IrDocument {
        ir_version: IR_VERSION.to_string(),
        project: IrProject {
            id: format!("project-{}", slug(&expanded.name)),
            name: expanded.name.clone(),
            config,
            screens,
            nodes,
        },
    };
    Ok(Normalized {
        document,
        warnings: diags,
    })
}

/// Allocates `{type}-{subtype}-{ordinal}` ids; one counter per
/// `(type, subtype)` pair, scoped to the document, in document order.
#[derive(Default)]
struct IdAllocator {
    counters: HashMap<(String, String), u32>,
}

impl IdAllocator {
    fn allocate(&mut self, node_type: &str, subtype: &str) -> NodeId {
        let counter = self
            .counters
            .entry((node_type.to_string(), subtype.to_string()))
            .or_insert(0);
        let id = format!("{}-{}-{}", node_type, subtype, counter);
        *counter += 1;
        id
    }
}

/// Lowercased, dash-separated form of a user-facing name.
fn slug(name: &str) -> String {
    let mut out = String::with_capacity(name.len());
    for ch in name.chars() {
        if ch.is_ascii_alphanumeric() {
            out.push(ch.to_ascii_lowercase());
        } else if !out.is_empty() && !out.ends_with('-') {
            out.push('-');
        }
    }
    out.trim_end_matches('-').to_string()
}

struct Converter<'a> {
    theme: ThemeConfig,
    ids: IdAllocator,
    nodes: IndexMap<NodeId, IrNode>,
    diags: &'a mut Vec<Diagnostic>,
}

impl Converter<'_> {
    /// Convert a container; ids are assigned pre-order so ordinals follow
    /// document order.
    fn layout_node(&mut self, layout: &Layout) -> Option<NodeId> {
        let (spec, style) = catalog::convert_layout(layout, &self.theme, self.diags)?;
        let id = self.ids.allocate("layout", spec.type_name());

        let grid_columns = match &spec {
            LayoutSpec::Grid { columns, .. } => Some(*columns),
            _ => None,
        };

        let mut children = Vec::new();
        for child in &layout.children {
            let slot = slot_for(&spec, children.len());
            match child {
                Node::Component(component) => {
                    if let Some(node) = self.component_node(component) {
                        children.push(ChildRef { slot, node });
                    }
                }
                Node::Layout(nested) => {
                    if let Some(node) = self.layout_node(nested) {
                        children.push(ChildRef { slot, node });
                    }
                }
                Node::Cell(cell) => {
                    let node = self.cell_node(cell, grid_columns.unwrap_or(1));
                    children.push(ChildRef {
                        slot: Slot::Cell,
                        node,
                    });
                }
            }
        }

        self.nodes.insert(
            id.clone(),
            IrNode::Container {
                id: id.clone(),
                layout: spec,
                style,
                children,
                source_span: Some(layout.span),
            },
        );
        Some(id)
    }

    fn cell_node(&mut self, cell: &Cell, columns: u32) -> NodeId {
        let (spec, style) = catalog::convert_cell(cell, columns, &self.theme, self.diags);
        let id = self.ids.allocate("layout", "cell");

        let mut children = Vec::new();
        for child in &cell.children {
            match child {
                Node::Component(component) => {
                    if let Some(node) = self.component_node(component) {
                        children.push(ChildRef {
                            slot: Slot::Child,
                            node,
                        });
                    }
                }
                Node::Layout(nested) => {
                    if let Some(node) = self.layout_node(nested) {
                        children.push(ChildRef {
                            slot: Slot::Child,
                            node,
                        });
                    }
                }
                // Nested cells are rejected at parse time
                Node::Cell(_) => {}
            }
        }

        self.nodes.insert(
            id.clone(),
            IrNode::Container {
                id: id.clone(),
                layout: spec,
                style,
                children,
                source_span: Some(cell.span),
            },
        );
        id
    }

    fn component_node(&mut self, component: &Component) -> Option<NodeId> {
        let (spec, style) = catalog::convert_component(component, self.diags)?;
        let subtype = spec.type_name().to_ascii_lowercase();
        let id = self.ids.allocate("component", &subtype);

        self.nodes.insert(
            id.clone(),
            IrNode::Component {
                id: id.clone(),
                component: spec,
                style,
                source_span: Some(component.span),
            },
        );
        Some(id)
    }
}

fn slot_for(parent: &LayoutSpec, index: usize) -> Slot {
    match parent {
        LayoutSpec::Split { .. } if index == 0 => Slot::Left,
        LayoutSpec::Split { .. } => Slot::Right,
        LayoutSpec::Grid { .. } => Slot::Cell,
        _ => Slot::Child,
    }
}
