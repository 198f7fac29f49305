//! Area-of-interest polygon.

use serde::{Deserialize, Serialize};

use crate::error::PolygonError;
use crate::structs::LatLng;

/// Minimum number of vertices for a polygon.
pub const MIN_VERTICES: usize = 3;

/// An implicitly closed ring of vertices: the last vertex connects back to
/// the first, so the first vertex is never repeated at the end.
///
/// Serializes as a plain `LatLng[]` array.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<LatLng>", into = "Vec<LatLng>")]
pub struct Polygon {
    vertices: Vec<LatLng>,
}

impl Polygon {
    /// Build a polygon from an ordered vertex list.
    ///
    /// A trailing vertex equal to the first is dropped, since draw tools
    /// differ on whether they repeat it.
    ///
    /// # Errors
    ///
    /// Returns [`PolygonError::TooFewVertices`] when fewer than three
    /// distinct ring vertices remain, or [`PolygonError::NonFiniteVertex`]
    /// when a coordinate is NaN or infinite.
    pub fn new(mut vertices: Vec<LatLng>) -> Result<Self, PolygonError> {
        if vertices.len() > MIN_VERTICES && vertices.first() == vertices.last() {
            vertices.pop();
        }
        if vertices.len() < MIN_VERTICES {
            return Err(PolygonError::TooFewVertices {
                count: vertices.len(),
            });
        }
        if let Some(index) = vertices
            .iter()
            .position(|v| !v.lat.is_finite() || !v.lng.is_finite())
        {
            return Err(PolygonError::NonFiniteVertex { index });
        }
        Ok(Self { vertices })
    }

    /// The ring vertices in drawing order, without the closing repeat.
    pub fn vertices(&self) -> &[LatLng] {
        &self.vertices
    }

    /// Number of ring vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Always false; a valid polygon has at least three vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}

impl TryFrom<Vec<LatLng>> for Polygon {
    type Error = PolygonError;

    fn try_from(vertices: Vec<LatLng>) -> Result<Self, Self::Error> {
        Self::new(vertices)
    }
}

impl From<Polygon> for Vec<LatLng> {
    fn from(polygon: Polygon) -> Self {
        polygon.vertices
    }
}
