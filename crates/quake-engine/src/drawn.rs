//! The persistent drawn-items layer group.
//!
//! Area queries resolve asynchronously and may land after their shape was
//! deleted or redrawn. [`DrawnItems::annotate`] therefore reports a missing
//! shape through its return value rather than an error.

use quake_types::{AreaAnnotation, Polygon, ShapeId, ShapeKind};
use serde::Serialize;
use tracing::debug;

/// A shape on the drawn-items layer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DrawnShape {
    /// Shape identifier.
    pub id: ShapeId,
    /// What the toolbar drew.
    pub kind: ShapeKind,
    /// The shape outline.
    pub polygon: Polygon,
    /// Popup state; `None` for shapes that are never queried.
    pub annotation: Option<AreaAnnotation>,
}

/// All shapes the user has drawn this session, in drawing order.
#[derive(Debug, Clone, Default)]
pub struct DrawnItems {
    shapes: Vec<DrawnShape>,
}

impl DrawnItems {
    /// Empty group.
    pub const fn new() -> Self {
        Self { shapes: Vec::new() }
    }

    /// Add a shape. Polygons start with a pending annotation; other kinds
    /// carry none.
    pub fn add(&mut self, kind: ShapeKind, polygon: Polygon) -> ShapeId {
        let id = ShapeId::new();
        let annotation = match kind {
            ShapeKind::Polygon => Some(AreaAnnotation::Pending),
            ShapeKind::Rectangle => None,
        };
        self.shapes.push(DrawnShape {
            id,
            kind,
            polygon,
            annotation,
        });
        debug!(shape = %id, ?kind, "shape added");
        id
    }

    /// Attach an annotation to a shape.
    ///
    /// Returns `false` if the shape no longer exists.
    pub fn annotate(&mut self, id: ShapeId, annotation: AreaAnnotation) -> bool {
        if let Some(shape) = self.shapes.iter_mut().find(|s| s.id == id) {
            shape.annotation = Some(annotation);
            true
        } else {
            debug!(shape = %id, "discarding annotation for removed shape");
            false
        }
    }

    /// Remove a shape, returning it if it existed.
    pub fn remove(&mut self, id: ShapeId) -> Option<DrawnShape> {
        let index = self.shapes.iter().position(|s| s.id == id)?;
        Some(self.shapes.remove(index))
    }

    /// Look up a shape.
    pub fn get(&self, id: ShapeId) -> Option<&DrawnShape> {
        self.shapes.iter().find(|s| s.id == id)
    }

    /// Iterate shapes in drawing order.
    pub fn iter(&self) -> impl Iterator<Item = &DrawnShape> {
        self.shapes.iter()
    }

    /// Number of shapes.
    pub fn len(&self) -> usize {
        self.shapes.len()
    }

    /// Whether no shapes are drawn.
    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}
