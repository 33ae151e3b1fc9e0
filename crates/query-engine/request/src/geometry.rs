//! GeoJSON polygons used to scope data-quality reports geographically.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// A GeoJSON position: longitude, latitude and an optional altitude.
pub type Position = Vec<f64>;

/// The only geometry type accepted by the reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub enum PolygonType {
    Polygon,
}

/// Wire shape of a polygon before validation.
#[derive(Debug, Clone, PartialEq, Deserialize, JsonSchema)]
pub struct RawPolygon {
    #[serde(rename = "type")]
    pub geometry_type: PolygonType,
    pub coordinates: Vec<Vec<Position>>,
}

/// A well-formed GeoJSON polygon.
///
/// Serializes with `coordinates` before `type`; this key order is what the database
/// side receives embedded in the containment filter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawPolygon")]
pub struct Polygon {
    coordinates: Vec<Vec<Position>>,
    #[serde(rename = "type")]
    geometry_type: PolygonType,
}

impl Polygon {
    /// Build a polygon from its rings; the first ring is the exterior.
    pub fn new(coordinates: Vec<Vec<Position>>) -> Result<Polygon, ValidationError> {
        if coordinates.is_empty() {
            return Err(ValidationError::InvalidGeometry(
                "a polygon needs at least one linear ring".to_string(),
            ));
        }
        for (index, ring) in coordinates.iter().enumerate() {
            validate_ring(index, ring)?;
        }
        Ok(Polygon {
            coordinates,
            geometry_type: PolygonType::Polygon,
        })
    }

    pub fn coordinates(&self) -> &[Vec<Position>] {
        &self.coordinates
    }

    pub fn exterior(&self) -> &[Position] {
        &self.coordinates[0]
    }
}

impl TryFrom<RawPolygon> for Polygon {
    type Error = ValidationError;

    fn try_from(raw: RawPolygon) -> Result<Self, Self::Error> {
        Polygon::new(raw.coordinates)
    }
}

fn validate_ring(index: usize, ring: &[Position]) -> Result<(), ValidationError> {
    if ring.len() < 4 {
        return Err(ValidationError::InvalidGeometry(format!(
            "ring {index} has {} positions, at least 4 are required",
            ring.len()
        )));
    }
    for position in ring {
        validate_position(position)?;
    }
    if ring.first() != ring.last() {
        return Err(ValidationError::InvalidGeometry(format!("ring {index} is not closed")));
    }
    Ok(())
}

fn validate_position(position: &[f64]) -> Result<(), ValidationError> {
    match position {
        [longitude, latitude] | [longitude, latitude, _] => {
            if position.iter().any(|value| !value.is_finite()) {
                return Err(ValidationError::InvalidGeometry(format!(
                    "position {position:?} is not finite"
                )));
            }
            if !(-180.0..=180.0).contains(longitude) || !(-90.0..=90.0).contains(latitude) {
                return Err(ValidationError::InvalidGeometry(format!(
                    "position {position:?} is out of bounds"
                )));
            }
            Ok(())
        }
        _ => Err(ValidationError::InvalidGeometry(format!(
            "position {position:?} must have two or three values"
        ))),
    }
}
