// src/math/scalar_field.rs

use bevy::math::Vec3;

/// Schrittweite der zentralen Differenzen in [`ScalarField3D::gradient`].
const GRADIENT_STEP: f32 = 1e-3;

/// Trait für ein dreidimensionales Skalarfeld.
/// Ermöglicht es Marching Cubes, auf verschiedenen Feldimplementierungen zu operieren.
///
/// `sample` muss frei von Seiteneffekten sein, da das Gitter seine Ecken
/// parallel abtasten kann.
pub trait ScalarField3D: Send + Sync {
    /// Gibt den Skalarwert (Isowert) an einem Punkt in Weltkoordinaten zurück.
    fn sample(&self, point: Vec3) -> f32;

    /// Gradient des Feldes an `point`.
    /// Standardimplementierung: zentrale Differenzen.
    fn gradient(&self, point: Vec3) -> Vec3 {
        let h = GRADIENT_STEP;
        let dx = self.sample(point + Vec3::X * h) - self.sample(point - Vec3::X * h);
        let dy = self.sample(point + Vec3::Y * h) - self.sample(point - Vec3::Y * h);
        let dz = self.sample(point + Vec3::Z * h) - self.sample(point - Vec3::Z * h);
        Vec3::new(dx, dy, dz) / (2.0 * h)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// Lineares Feld f(p) = a · p
    struct LinearField {
        slope: Vec3,
    }

    impl ScalarField3D for LinearField {
        fn sample(&self, point: Vec3) -> f32 {
            self.slope.dot(point)
        }
    }

    #[test]
    fn test_default_gradient_of_linear_field() {
        let field = LinearField {
            slope: Vec3::new(1.0, -2.0, 0.5),
        };
        let grad = field.gradient(Vec3::new(3.0, 1.0, -2.0));
        assert_relative_eq!(grad.x, 1.0, epsilon = 1e-2);
        assert_relative_eq!(grad.y, -2.0, epsilon = 1e-2);
        assert_relative_eq!(grad.z, 0.5, epsilon = 1e-2);
    }
}
