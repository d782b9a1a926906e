// src/math/algorithms/metaballs/influence/point_source.rs

use crate::math::algorithms::metaballs::influence::{FieldInfluence, InverseSquare};
use bevy::math::Vec3;

/// Feste Einflussquelle mit konstantem Gewicht. Wird beim Setup einmal erzeugt
/// und bildet z.B. den "Boden" aus einem Raster solcher Punkte.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointSource {
    pub position: Vec3,
    weight_squared: f32,
}

impl PointSource {
    pub fn new(position: Vec3, weight: f32) -> Self {
        Self {
            position,
            weight_squared: weight * weight,
        }
    }

    /// Raster aus Punktquellen auf der Ebene `y = origin.y`.
    ///
    /// Jede `stride`-te Gitterkoordinate in x und z erhält einen Punkt,
    /// beginnend bei Index 0 und unterhalb von `resolution`.
    ///
    /// Die Punkte liegen absichtlich auf Gitterecken. Dort ist der Feldwert
    /// `+inf`, die Ecke zählt also als innen. Die Interpolation behandelt
    /// nicht-endliche Eckwerte gesondert, die Netzpunkte bleiben endlich.
    pub fn floor_grid(
        origin: Vec3,
        resolution: usize,
        cell_width: f32,
        stride: usize,
        weight: f32,
    ) -> Vec<Self> {
        let stride = stride.max(1);
        let mut points = Vec::new();
        for x in (0..resolution).step_by(stride) {
            for z in (0..resolution).step_by(stride) {
                let position =
                    origin + Vec3::new(x as f32 * cell_width, 0.0, z as f32 * cell_width);
                points.push(Self::new(position, weight));
            }
        }
        points
    }
}

impl FieldInfluence for PointSource {
    fn influence_at(&self, point: Vec3) -> f32 {
        InverseSquare::value(self.position, self.weight_squared, point)
    }

    fn gradient_at(&self, point: Vec3) -> Vec3 {
        InverseSquare::gradient(self.position, self.weight_squared, point)
    }

    fn influence_type(&self) -> &'static str {
        "PointSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_point_influence() {
        let point = PointSource::new(Vec3::ZERO, 2.0);
        assert_relative_eq!(point.influence_at(Vec3::new(0.0, 0.0, 4.0)), 0.25);
    }

    #[test]
    fn test_floor_grid_layout() {
        let points = PointSource::floor_grid(Vec3::ZERO, 10, 0.5, 4, 1.0);
        // x, z in {0, 4, 8}
        assert_eq!(points.len(), 9);
        assert!(points.iter().all(|p| p.position.y == 0.0));
        assert_eq!(points[1].position, Vec3::new(0.0, 0.0, 2.0));
        assert_eq!(points[8].position, Vec3::new(4.0, 0.0, 4.0));
    }
}
