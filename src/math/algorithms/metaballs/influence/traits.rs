// src/math/algorithms/metaballs/influence/traits.rs

use bevy::math::Vec3;

/// Trait für alle Objekte, die das Metaball-Skalarfeld beeinflussen können
pub trait FieldInfluence: Send + Sync + std::fmt::Debug {
    /// Berechnet den Einfluss an einem gegebenen Punkt
    fn influence_at(&self, point: Vec3) -> f32;

    /// Analytischer Gradient des Einflusses an einem gegebenen Punkt
    fn gradient_at(&self, point: Vec3) -> Vec3;

    /// Gibt den Namen/Typ der Influence zurück für Debugging
    fn influence_type(&self) -> &'static str {
        "Unknown"
    }
}

/// Hilfsfunktionen für den gemeinsamen Falloff `k / d²`
pub struct InverseSquare;

impl InverseSquare {
    /// `strength_sq / |point - center|²`.
    ///
    /// Kein Clamping: liegt `point` exakt auf `center`, ist das Ergebnis `+inf`.
    #[inline]
    pub fn value(center: Vec3, strength_sq: f32, point: Vec3) -> f32 {
        strength_sq / point.distance_squared(center)
    }

    /// Gradient von `k / |d|²` nach `point`: `-2k · d / |d|⁴` mit `d = point - center`.
    #[inline]
    pub fn gradient(center: Vec3, strength_sq: f32, point: Vec3) -> Vec3 {
        let d = point - center;
        let dist_sq = d.length_squared();
        d * (-2.0 * strength_sq / (dist_sq * dist_sq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_inverse_square_value() {
        let v = InverseSquare::value(Vec3::ZERO, 4.0, Vec3::new(0.0, 2.0, 0.0));
        assert_relative_eq!(v, 1.0);
    }

    #[test]
    fn test_inverse_square_singularity_is_infinite() {
        let v = InverseSquare::value(Vec3::ONE, 1.0, Vec3::ONE);
        assert!(v.is_infinite() && v > 0.0);
    }

    #[test]
    fn test_inverse_square_gradient_points_inward() {
        let p = Vec3::new(3.0, 0.0, 0.0);
        let grad = InverseSquare::gradient(Vec3::ZERO, 9.0, p);
        // d/dx (9 / x²) = -18 / x³ = -2/3
        assert_relative_eq!(grad.x, -2.0 / 3.0, epsilon = 1e-6);
        assert_relative_eq!(grad.y, 0.0);
        assert_relative_eq!(grad.z, 0.0);
    }
}
