// src/math/utils.rs

/// Mathematische Konstanten
pub mod constants {
    /// Toleranz der Kanteninterpolation. Bestimmt, wann ein Eckwert als "auf" dem Isolevel gilt.
    pub const INTERPOLATION_EPSILON: f32 = 1e-5;
    /// Quadrierte Mindestlänge, ab der ein Normalenvektor normalisiert wird.
    pub const NORMAL_EPSILON_SQUARED: f32 = 1e-12;
}

/// Vergleichsfunktionen mit Toleranz
pub mod comparison {
    /// Prüft ob zwei Floats mit custom Toleranz gleich sind
    pub fn nearly_equal_eps(a: f32, b: f32, epsilon: f32) -> bool {
        (a - b).abs() < epsilon
    }
}

/// Hilfsfunktionen für Vektoren
pub mod vectors {
    use super::constants::NORMAL_EPSILON_SQUARED;
    use bevy::math::Vec3;

    /// Normalisiert `v`, falls er endlich und nicht (nahezu) null ist.
    pub fn try_normalize(v: Vec3) -> Option<Vec3> {
        if v.is_finite() && v.length_squared() > NORMAL_EPSILON_SQUARED {
            Some(v.normalize())
        } else {
            None
        }
    }

    /// Flächennormale eines Dreiecks `(v1 - v0) x (v2 - v1)`, nicht normalisiert.
    pub fn face_normal(v0: Vec3, v1: Vec3, v2: Vec3) -> Vec3 {
        (v1 - v0).cross(v2 - v1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use bevy::math::Vec3;

    #[test]
    fn test_comparison() {
        assert!(comparison::nearly_equal_eps(0.5, 0.500005, 1e-5));
        assert!(!comparison::nearly_equal_eps(1.0, 1.001, 1e-5));
    }

    #[test]
    fn test_try_normalize_rejects_degenerate() {
        assert!(vectors::try_normalize(Vec3::ZERO).is_none());
        assert!(vectors::try_normalize(Vec3::new(f32::NAN, 0.0, 0.0)).is_none());
        assert_eq!(vectors::try_normalize(Vec3::new(0.0, 3.0, 0.0)), Some(Vec3::Y));
    }

    #[test]
    fn test_face_normal_ccw() {
        // CCW in der XY-Ebene, von +Z betrachtet
        let n = vectors::face_normal(Vec3::ZERO, Vec3::X, Vec3::Y);
        assert!(n.z > 0.0);
    }
}
