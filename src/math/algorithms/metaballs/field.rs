// src/math/algorithms/metaballs/field.rs
use crate::math::algorithms::metaballs::influence::{FieldInfluence, MetaballSource, PointSource};
use crate::math::scalar_field::ScalarField3D;
use bevy::math::Vec3;

/// Das implizite Feld aller Einflussquellen eines Frames.
///
/// Leiht sich die Metabälle und die festen Punktquellen nur aus, damit nach jedem
/// Dynamik-Schritt ohne Kopie neu abgetastet werden kann.
/// Summiert wird in fester Reihenfolge: erst alle Metabälle, dann alle Punkte.
#[derive(Debug, Clone, Copy)]
pub struct MetaballField<'a> {
    balls: &'a [MetaballSource],
    points: &'a [PointSource],
}

impl<'a> MetaballField<'a> {
    pub fn new(balls: &'a [MetaballSource], points: &'a [PointSource]) -> Self {
        Self { balls, points }
    }

    pub fn source_count(&self) -> usize {
        self.balls.len() + self.points.len()
    }
}

impl ScalarField3D for MetaballField<'_> {
    fn sample(&self, point: Vec3) -> f32 {
        let from_balls: f32 = self.balls.iter().map(|b| b.influence_at(point)).sum();
        let from_points: f32 = self.points.iter().map(|p| p.influence_at(point)).sum();
        from_balls + from_points
    }

    fn gradient(&self, point: Vec3) -> Vec3 {
        let from_balls: Vec3 = self.balls.iter().map(|b| b.gradient_at(point)).sum();
        let from_points: Vec3 = self.points.iter().map(|p| p.gradient_at(point)).sum();
        from_balls + from_points
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_sum_of_sources() {
        let balls = [
            MetaballSource::stationary(Vec3::ZERO, 1.0),
            MetaballSource::stationary(Vec3::new(4.0, 0.0, 0.0), 2.0),
        ];
        let points = [PointSource::new(Vec3::new(2.0, 2.0, 0.0), 1.0)];
        let field = MetaballField::new(&balls, &points);

        // 1/4 + 4/4 + 1/4
        assert_relative_eq!(field.sample(Vec3::new(2.0, 0.0, 0.0)), 1.5);
        assert_eq!(field.source_count(), 3);
    }

    #[test]
    fn test_empty_field_is_zero() {
        let field = MetaballField::new(&[], &[]);
        assert_eq!(field.sample(Vec3::ONE), 0.0);
        assert_eq!(field.gradient(Vec3::ONE), Vec3::ZERO);
    }

    #[test]
    fn test_analytic_gradient_matches_central_differences() {
        let balls = [MetaballSource::stationary(Vec3::new(1.0, 2.0, 3.0), 1.5)];
        let points = [PointSource::new(Vec3::ZERO, 1.0)];
        let field = MetaballField::new(&balls, &points);

        let p = Vec3::new(2.5, 1.0, 2.0);
        let analytic = field.gradient(p);
        let h = 1e-2;
        let numeric = Vec3::new(
            field.sample(p + Vec3::X * h) - field.sample(p - Vec3::X * h),
            field.sample(p + Vec3::Y * h) - field.sample(p - Vec3::Y * h),
            field.sample(p + Vec3::Z * h) - field.sample(p - Vec3::Z * h),
        ) / (2.0 * h);

        assert_relative_eq!(analytic.x, numeric.x, epsilon = 1e-3);
        assert_relative_eq!(analytic.y, numeric.y, epsilon = 1e-3);
        assert_relative_eq!(analytic.z, numeric.z, epsilon = 1e-3);
    }
}
