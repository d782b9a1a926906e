// src/math/algorithms/metaballs/influence/metaball_source.rs

use crate::math::algorithms::metaballs::influence::{FieldInfluence, InverseSquare};
use bevy::math::Vec3;

/// Ein einzelner beweglicher Metaball als Einflussquelle für das Feld.
/// Der Einfluss fällt mit `radius² / distanz²` ab, im Abstand `radius` ist er also genau 1.
///
/// Position und Geschwindigkeit werden jeden Tick von der Dynamik verändert,
/// der Radius bleibt nach der Erzeugung fest.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaballSource {
    pub position: Vec3,
    pub velocity: Vec3,
    radius: f32,
    radius_squared: f32,
}

impl MetaballSource {
    /// Erstellt einen neuen `MetaballSource`.
    /// Beachte die Parameterreihenfolge: `position`, `radius`, `velocity`.
    pub fn new(position: Vec3, radius: f32, velocity: Vec3) -> Self {
        Self {
            position,
            velocity,
            radius,
            radius_squared: radius * radius,
        }
    }

    /// Ruhender Metaball
    pub fn stationary(position: Vec3, radius: f32) -> Self {
        Self::new(position, radius, Vec3::ZERO)
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }

    pub fn radius_squared(&self) -> f32 {
        self.radius_squared
    }
}

impl FieldInfluence for MetaballSource {
    fn influence_at(&self, point: Vec3) -> f32 {
        InverseSquare::value(self.position, self.radius_squared, point)
    }

    fn gradient_at(&self, point: Vec3) -> Vec3 {
        InverseSquare::gradient(self.position, self.radius_squared, point)
    }

    fn influence_type(&self) -> &'static str {
        "MetaballSource"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_influence_is_one_at_radius() {
        let ball = MetaballSource::stationary(Vec3::splat(5.0), 2.0);
        assert_relative_eq!(ball.influence_at(Vec3::new(7.0, 5.0, 5.0)), 1.0);
        assert_relative_eq!(ball.influence_at(Vec3::new(5.0, 1.0, 5.0)), 0.25);
    }

    #[test]
    fn test_closer_means_higher() {
        let ball = MetaballSource::stationary(Vec3::ZERO, 1.0);
        let near = ball.influence_at(Vec3::new(0.5, 0.0, 0.0));
        let far = ball.influence_at(Vec3::new(1.5, 0.0, 0.0));
        assert!(near > far);
    }

    #[test]
    fn test_radius_is_fixed_at_creation() {
        let ball = MetaballSource::new(Vec3::ZERO, 1.5, Vec3::X);
        assert_relative_eq!(ball.radius(), 1.5);
        assert_relative_eq!(ball.radius_squared(), 2.25);
        assert_eq!(ball.influence_type(), "MetaballSource");
    }
}
