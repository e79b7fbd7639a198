use std::collections::HashMap;

use thiserror::Error;

use crate::geometry::{Rect, Size};

/// Errors raised while solving a layout tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LayoutError {
    #[error("layout tree is empty")]
    EmptyLayout,
    #[error("node `{id}` has non-positive weight {weight}")]
    InvalidWeight { id: NodeId, weight: f64 },
    #[error("cannot solve layout for non-positive extent {width} x {height}")]
    InvalidExtent { width: f64, height: f64 },
}

/// Layout direction for a container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Children are packed left to right.
    Row,
    /// Children are stacked top to bottom.
    Column,
}

/// Unique identifier for layout nodes.
pub type NodeId = String;

/// Layout node representation (container or leaf).
///
/// A node's `weight` is its share of the parent's main axis relative to its
/// siblings. Weights need not sum to one.
#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub id: NodeId,
    pub direction: Direction,
    pub weight: f64,
    pub children: Vec<LayoutNode>,
}

impl LayoutNode {
    pub fn leaf(id: impl Into<NodeId>, weight: f64) -> Self {
        Self {
            id: id.into(),
            direction: Direction::Row,
            weight,
            children: Vec::new(),
        }
    }

    pub fn container(
        id: impl Into<NodeId>,
        direction: Direction,
        children: Vec<LayoutNode>,
    ) -> Self {
        Self {
            id: id.into(),
            direction,
            weight: 1.0,
            children,
        }
    }

    pub fn with_weight(mut self, weight: f64) -> Self {
        self.weight = weight;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }
}

/// Layout tree orchestrator.
#[derive(Debug, Clone)]
pub struct LayoutTree {
    pub root: LayoutNode,
}

impl LayoutTree {
    pub fn new(root: LayoutNode) -> Self {
        Self { root }
    }

    /// Solve the tree inside a `size` box anchored at the origin, returning
    /// rects keyed by node id.
    pub fn solve(&self, size: Size) -> Result<HashMap<NodeId, Rect>, LayoutError> {
        if self.root.children.is_empty() {
            return Err(LayoutError::EmptyLayout);
        }
        if !(size.width > 0.0 && size.height > 0.0) {
            return Err(LayoutError::InvalidExtent {
                width: size.width,
                height: size.height,
            });
        }

        let mut rects = HashMap::new();
        solve_node(
            &self.root,
            Rect::new(0.0, 0.0, size.width, size.height),
            &mut rects,
        )?;
        Ok(rects)
    }
}

fn solve_node(
    node: &LayoutNode,
    rect: Rect,
    accum: &mut HashMap<NodeId, Rect>,
) -> Result<(), LayoutError> {
    accum.insert(node.id.clone(), rect);

    if node.is_leaf() {
        return Ok(());
    }

    let axis_length = match node.direction {
        Direction::Row => rect.width,
        Direction::Column => rect.height,
    };
    let spans = distribute(axis_length, &node.children)?;

    let mut cursor = match node.direction {
        Direction::Row => rect.x,
        Direction::Column => rect.y,
    };

    for (child, span) in node.children.iter().zip(spans) {
        let child_rect = match node.direction {
            Direction::Row => Rect::new(cursor, rect.y, span, rect.height),
            Direction::Column => Rect::new(rect.x, cursor, rect.width, span),
        };
        solve_node(child, child_rect, accum)?;
        cursor += span;
    }

    Ok(())
}

/// Split `length` across children in proportion to their weights.
fn distribute(length: f64, children: &[LayoutNode]) -> Result<Vec<f64>, LayoutError> {
    for child in children {
        if !(child.weight.is_finite() && child.weight > 0.0) {
            return Err(LayoutError::InvalidWeight {
                id: child.id.clone(),
                weight: child.weight,
            });
        }
    }

    let total: f64 = children.iter().map(|child| child.weight).sum();
    let mut spans: Vec<f64> = children
        .iter()
        .map(|child| length * (child.weight / total))
        .collect();

    // Absorb rounding drift in the last span so the axis is tiled exactly.
    if let Some((last, head)) = spans.split_last_mut() {
        let used: f64 = head.iter().sum();
        *last = length - used;
    }

    Ok(spans)
}
