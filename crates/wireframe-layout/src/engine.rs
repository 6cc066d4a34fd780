//! The layout engine.
//!
//! `layout(document, viewport)` resolves every node of every screen to a
//! positioned box. Pure, deterministic, and total: no input satisfying the
//! IR invariants panics, every computed extent clamps at 0, and content
//! exceeding its box marks the container `overflow` instead of failing.
//! Even a dangling node reference (an IR generator bug) degrades to an
//! empty box rather than crashing the pipeline.
//!
//! Sizing is resolved per axis: `Fixed` verbatim, `Percent` of the parent's
//! resolved dimension, `Content` from the intrinsic table (or the
//! container's content formula), and `Fill` splitting the remaining
//! main-axis space equally among fill siblings.

use wireframe_ir::{
    Align, ChildRef, Direction, IrDocument, IrNode, Justify, LayoutSpec, Size, Style, Viewport,
};

use crate::geometry::{RenderNode, RenderScreen, RenderTree};
use crate::intrinsic::{intrinsic_height, intrinsic_width, DEFAULT_CONTENT_WIDTH};

const EPSILON: f32 = 0.01;

/// Lay out every screen of a document against a viewport.
pub fn layout(document: &IrDocument, viewport: Viewport) -> RenderTree {
    let engine = Engine { document };
    let screens = document
        .project
        .screens
        .iter()
        .map(|screen| {
            let vp = screen.viewport.unwrap_or(viewport);
            RenderScreen {
                screen: screen.id.clone(),
                name: screen.name.clone(),
                root: engine.place(&screen.root, 0.0, 0.0, clamp0(vp.width), clamp0(vp.height)),
            }
        })
        .collect();
    RenderTree { screens }
}

fn clamp0(value: f32) -> f32 {
    value.max(0.0)
}

struct Engine<'a> {
    document: &'a IrDocument,
}

impl Engine<'_> {
    fn node(&self, id: &str) -> Option<&IrNode> {
        self.document.project.nodes.get(id)
    }

    fn style_of(&self, id: &str) -> Style {
        self.node(id).map(|node| *node.style()).unwrap_or_default()
    }

    /// Produce the render node for `id` within its allotted box.
    fn place(&self, id: &str, x: f32, y: f32, width: f32, height: f32) -> RenderNode {
        let boxed = |overflow: bool, children: Vec<RenderNode>| RenderNode {
            id: id.to_string(),
            target: id.to_string(),
            x,
            y,
            width,
            height,
            overflow,
            children,
        };

        match self.node(id) {
            None => boxed(false, Vec::new()),
            Some(IrNode::Component { .. }) => boxed(false, Vec::new()),
            Some(IrNode::Container {
                layout, children, ..
            }) => {
                let (kids, overflow) = match layout {
                    LayoutSpec::Stack {
                        direction,
                        gap,
                        padding,
                        align,
                        justify,
                    } => self.stack(
                        children, *direction, *gap, *padding, *align, *justify, x, y, width,
                        height,
                    ),
                    LayoutSpec::Card { gap, padding, .. } => self.stack(
                        children,
                        Direction::Vertical,
                        *gap,
                        *padding,
                        Align::Stretch,
                        Justify::Start,
                        x,
                        y,
                        width,
                        height,
                    ),
                    LayoutSpec::Cell { gap, .. } => self.stack(
                        children,
                        Direction::Vertical,
                        *gap,
                        0.0,
                        Align::Stretch,
                        Justify::Start,
                        x,
                        y,
                        width,
                        height,
                    ),
                    LayoutSpec::Grid {
                        columns,
                        gap,
                        padding,
                        row_height,
                    } => self.grid(children, *columns, *gap, *padding, *row_height, x, y, width, height),
                    LayoutSpec::Split {
                        sidebar,
                        gap,
                        padding,
                    } => self.split(children, *sidebar, *gap, *padding, x, y, width, height),
                    LayoutSpec::Panel { padding, .. } => {
                        self.panel(children, *padding, x, y, width, height)
                    }
                };
                boxed(overflow, kids)
            }
        }
    }

    #[allow(clippy::too_many_arguments)]
    fn stack(
        &self,
        children: &[ChildRef],
        direction: Direction,
        gap: f32,
        padding: f32,
        align: Align,
        justify: Justify,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> (Vec<RenderNode>, bool) {
        let n = children.len();
        if n == 0 {
            return (Vec::new(), false);
        }
        let inner_w = clamp0(width - 2.0 * padding);
        let inner_h = clamp0(height - 2.0 * padding);
        let (inner_main, inner_cross) = match direction {
            Direction::Vertical => (inner_h, inner_w),
            Direction::Horizontal => (inner_w, inner_h),
        };
        let gaps = gap * (n as f32 - 1.0);

        // First pass: resolve fixed/percent/content main sizes, count fills
        let mut mains: Vec<Option<f32>> = Vec::with_capacity(n);
        let mut used = 0.0;
        let mut fills = 0usize;
        for child in children {
            match self.main_mode(&child.node, direction) {
                Size::Fill => {
                    fills += 1;
                    mains.push(None);
                }
                Size::Fixed(px) => {
                    let px = clamp0(px);
                    used += px;
                    mains.push(Some(px));
                }
                Size::Percent(pct) => {
                    let px = clamp0(inner_main * pct / 100.0);
                    used += px;
                    mains.push(Some(px));
                }
                Size::Content => {
                    let px = self.content_main(&child.node, direction);
                    used += px;
                    mains.push(Some(px));
                }
            }
        }

        let remaining = inner_main - used - gaps;
        let per_fill = if fills > 0 {
            clamp0(remaining) / fills as f32
        } else {
            0.0
        };
        let slack = if fills == 0 { clamp0(remaining) } else { 0.0 };

        let (lead, spacing) = match justify {
            Justify::Start => (0.0, gap),
            Justify::Center => (slack / 2.0, gap),
            Justify::End => (slack, gap),
            Justify::Between if n > 1 => (0.0, gap + slack / (n as f32 - 1.0)),
            Justify::Between => (0.0, gap),
        };

        let mut out = Vec::with_capacity(n);
        let mut cursor = lead;
        let mut total_main = lead;
        let mut cross_overflow = false;

        for (child, main) in children.iter().zip(mains) {
            let main = main.unwrap_or(per_fill);
            let cross = self.cross_size(&child.node, direction, inner_cross);
            if cross > inner_cross + EPSILON {
                cross_overflow = true;
            }
            let cross_offset = match align {
                Align::Start | Align::Stretch => 0.0,
                Align::Center => clamp0((inner_cross - cross) / 2.0),
                Align::End => clamp0(inner_cross - cross),
            };

            let (cx, cy, cw, ch) = match direction {
                Direction::Vertical => (
                    x + padding + cross_offset,
                    y + padding + cursor,
                    cross,
                    main,
                ),
                Direction::Horizontal => (
                    x + padding + cursor,
                    y + padding + cross_offset,
                    main,
                    cross,
                ),
            };
            out.push(self.place(&child.node, cx, cy, cw, ch));

            cursor += main + spacing;
            total_main += main;
        }
        total_main += gaps;

        let overflow = total_main > inner_main + EPSILON || cross_overflow;
        (out, overflow)
    }

    #[allow(clippy::too_many_arguments)]
    fn grid(
        &self,
        children: &[ChildRef],
        columns: u32,
        gap: f32,
        padding: f32,
        row_height: Option<f32>,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> (Vec<RenderNode>, bool) {
        if children.is_empty() {
            return (Vec::new(), false);
        }
        let columns = columns.max(1);
        let inner_w = clamp0(width - 2.0 * padding);
        let inner_h = clamp0(height - 2.0 * padding);
        let col_w = clamp0((inner_w - gap * (columns as f32 - 1.0)) / columns as f32);

        // Partition cells into rows: wrap when cumulative span would exceed
        // the column count
        let mut rows: Vec<Vec<(&ChildRef, u32)>> = Vec::new();
        let mut current: Vec<(&ChildRef, u32)> = Vec::new();
        let mut cum = 0u32;
        for child in children {
            let span = self.cell_span(&child.node).clamp(1, columns);
            if cum + span > columns && !current.is_empty() {
                rows.push(std::mem::take(&mut current));
                cum = 0;
            }
            current.push((child, span));
            cum += span;
        }
        if !current.is_empty() {
            rows.push(current);
        }

        let mut out = Vec::with_capacity(children.len());
        let mut cy = y + padding;
        let mut total_h = 0.0;
        for (index, row) in rows.iter().enumerate() {
            let rh = row_height.unwrap_or_else(|| {
                row.iter()
                    .map(|(child, _)| self.content_height(&child.node))
                    .fold(0.0, f32::max)
            });
            let mut cx = x + padding;
            for (child, span) in row {
                let cw = clamp0(col_w * *span as f32 + gap * (*span as f32 - 1.0));
                out.push(self.place(&child.node, cx, cy, cw, rh));
                cx += cw + gap;
            }
            cy += rh + gap;
            total_h += rh + if index > 0 { gap } else { 0.0 };
        }

        let overflow = total_h > inner_h + EPSILON;
        (out, overflow)
    }

    #[allow(clippy::too_many_arguments)]
    fn split(
        &self,
        children: &[ChildRef],
        sidebar: f32,
        gap: f32,
        padding: f32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> (Vec<RenderNode>, bool) {
        let inner_w = clamp0(width - 2.0 * padding);
        let inner_h = clamp0(height - 2.0 * padding);
        let left_w = clamp0(sidebar.min(inner_w));
        let right_w = clamp0(inner_w - sidebar - gap);

        let mut out = Vec::with_capacity(children.len());
        for (index, child) in children.iter().enumerate() {
            let (cx, cw) = if index == 0 {
                (x + padding, left_w)
            } else {
                (x + padding + left_w + gap, right_w)
            };
            out.push(self.place(&child.node, cx, y + padding, cw, inner_h));
        }

        let overflow = sidebar + gap > inner_w + EPSILON;
        (out, overflow)
    }

    fn panel(
        &self,
        children: &[ChildRef],
        padding: f32,
        x: f32,
        y: f32,
        width: f32,
        height: f32,
    ) -> (Vec<RenderNode>, bool) {
        let inner_w = clamp0(width - 2.0 * padding);
        let inner_h = clamp0(height - 2.0 * padding);
        let out = children
            .iter()
            .map(|child| self.place(&child.node, x + padding, y + padding, inner_w, inner_h))
            .collect();
        (out, false)
    }

    /// The main-axis sizing mode of a node inside a stack-like container.
    /// Unset style defaults to `Content`.
    fn main_mode(&self, id: &str, direction: Direction) -> Size {
        let style = self.style_of(id);
        let explicit = match direction {
            Direction::Vertical => style.height,
            Direction::Horizontal => style.width,
        };
        explicit.unwrap_or(Size::Content)
    }

    /// The resolved cross-axis size of a node inside a stack-like container.
    /// Unset style defaults to `Fill` (full cross extent).
    fn cross_size(&self, id: &str, direction: Direction, inner_cross: f32) -> f32 {
        let style = self.style_of(id);
        let explicit = match direction {
            Direction::Vertical => style.width,
            Direction::Horizontal => style.height,
        };
        match explicit.unwrap_or(Size::Fill) {
            Size::Fill => inner_cross,
            Size::Fixed(px) => clamp0(px),
            Size::Percent(pct) => clamp0(inner_cross * pct / 100.0),
            Size::Content => self.content_cross(id, direction),
        }
    }

    fn content_main(&self, id: &str, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.content_height(id),
            Direction::Horizontal => self.content_width(id),
        }
    }

    fn content_cross(&self, id: &str, direction: Direction) -> f32 {
        match direction {
            Direction::Vertical => self.content_width(id),
            Direction::Horizontal => self.content_height(id),
        }
    }

    /// Content-mode height: intrinsic for components, the container formula
    /// for containers. `Fill` and `Percent` children measure 0 here (they
    /// have no meaning without an allotted box).
    fn content_height(&self, id: &str) -> f32 {
        let Some(node) = self.node(id) else {
            return 0.0;
        };
        if let Some(Size::Fixed(px)) = node.style().height {
            return clamp0(px);
        }
        match node {
            IrNode::Component { component, .. } => intrinsic_height(component),
            IrNode::Container {
                layout, children, ..
            } => match layout {
                LayoutSpec::Stack {
                    direction: Direction::Vertical,
                    gap,
                    padding,
                    ..
                } => self.stacked_height(children, *gap, *padding),
                LayoutSpec::Stack {
                    direction: Direction::Horizontal,
                    padding,
                    ..
                } => self.tallest_child(children) + 2.0 * padding,
                LayoutSpec::Card { gap, padding, .. } => {
                    self.stacked_height(children, *gap, *padding)
                }
                LayoutSpec::Cell { gap, .. } => self.stacked_height(children, *gap, 0.0),
                LayoutSpec::Grid {
                    columns,
                    gap,
                    padding,
                    row_height,
                } => self.grid_height(children, *columns, *gap, *padding, *row_height),
                LayoutSpec::Split { padding, .. } => self.tallest_child(children) + 2.0 * padding,
                LayoutSpec::Panel { padding, .. } => self.tallest_child(children) + 2.0 * padding,
            },
        }
    }

    fn stacked_height(&self, children: &[ChildRef], gap: f32, padding: f32) -> f32 {
        let mut total = 2.0 * padding;
        for child in children {
            total += match self.main_mode(&child.node, Direction::Vertical) {
                Size::Fixed(px) => clamp0(px),
                Size::Fill | Size::Percent(_) => 0.0,
                Size::Content => self.content_height(&child.node),
            };
        }
        if children.len() > 1 {
            total += gap * (children.len() as f32 - 1.0);
        }
        total
    }

    fn tallest_child(&self, children: &[ChildRef]) -> f32 {
        children
            .iter()
            .map(|child| self.content_height(&child.node))
            .fold(0.0, f32::max)
    }

    fn grid_height(
        &self,
        children: &[ChildRef],
        columns: u32,
        gap: f32,
        padding: f32,
        row_height: Option<f32>,
    ) -> f32 {
        let columns = columns.max(1);
        let mut total = 2.0 * padding;
        let mut rows = 0u32;
        let mut cum = 0u32;
        let mut row_max = 0.0f32;
        for child in children {
            let span = self.cell_span(&child.node).clamp(1, columns);
            if cum + span > columns && cum > 0 {
                total += row_height.unwrap_or(row_max);
                rows += 1;
                cum = 0;
                row_max = 0.0;
            }
            cum += span;
            row_max = row_max.max(self.content_height(&child.node));
        }
        if cum > 0 {
            total += row_height.unwrap_or(row_max);
            rows += 1;
        }
        if rows > 1 {
            total += gap * (rows as f32 - 1.0);
        }
        total
    }

    fn content_width(&self, id: &str) -> f32 {
        let Some(node) = self.node(id) else {
            return 0.0;
        };
        if let Some(Size::Fixed(px)) = node.style().width {
            return clamp0(px);
        }
        match node {
            IrNode::Component { component, .. } => {
                intrinsic_width(component).unwrap_or(DEFAULT_CONTENT_WIDTH)
            }
            IrNode::Container {
                layout, children, ..
            } => {
                let widest = children
                    .iter()
                    .map(|child| self.content_width(&child.node))
                    .fold(0.0, f32::max);
                match layout {
                    LayoutSpec::Stack {
                        direction: Direction::Horizontal,
                        gap,
                        padding,
                        ..
                    } => {
                        let mut total = 2.0 * padding;
                        for child in children {
                            total += match self.main_mode(&child.node, Direction::Horizontal) {
                                Size::Fixed(px) => clamp0(px),
                                Size::Fill | Size::Percent(_) => 0.0,
                                Size::Content => self.content_width(&child.node),
                            };
                        }
                        if children.len() > 1 {
                            total += gap * (children.len() as f32 - 1.0);
                        }
                        total
                    }
                    LayoutSpec::Stack { padding, .. }
                    | LayoutSpec::Card { padding, .. }
                    | LayoutSpec::Split { padding, .. }
                    | LayoutSpec::Panel { padding, .. }
                    | LayoutSpec::Grid { padding, .. } => widest + 2.0 * padding,
                    LayoutSpec::Cell { .. } => widest,
                }
            }
        }
    }

    /// Span of a cell node; non-cell grid children count as span 1.
    fn cell_span(&self, id: &str) -> u32 {
        match self.node(id) {
            Some(IrNode::Container {
                layout: LayoutSpec::Cell { span, .. },
                ..
            }) => *span,
            _ => 1,
        }
    }
}
