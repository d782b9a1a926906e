// src/math/types/bounds.rs

use crate::math::{error::*, types::*};
use std::fmt;

/// 3D Bounding Box (Axis-Aligned Bounding Box)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds3D {
    pub min: Point3D,
    pub max: Point3D,
}

impl Bounds3D {
    /// Erstellt eine neue Bounding Box
    pub fn new(min: Point3D, max: Point3D) -> MathResult<Self> {
        if min.x > max.x || min.y > max.y || min.z > max.z {
            return Err(MathError::InvalidConfiguration {
                message: format!("Invalid 3D bounds: min {:?} > max {:?}", min, max),
            });
        }

        Ok(Self { min, max })
    }

    /// Würfel mit Ursprung `origin` und Kantenlänge `edge_length`
    pub fn cube(origin: Point3D, edge_length: f32) -> MathResult<Self> {
        Self::new(origin, origin + Point3D::splat(edge_length))
    }

    pub fn center(&self) -> Point3D {
        (self.min + self.max) * 0.5
    }

    pub fn size(&self) -> Point3D {
        self.max - self.min
    }

    pub fn contains_point(&self, point: Point3D) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }

    /// Verkleinert die Box auf allen Seiten um `margin` (z.B. den Radius einer Kugel).
    /// Ist die Box dafür zu klein, fallen `min` und `max` auf das Zentrum zusammen.
    pub fn shrink(&self, margin: f32) -> Self {
        let center = self.center();
        Self {
            min: (self.min + Point3D::splat(margin)).min(center),
            max: (self.max - Point3D::splat(margin)).max(center),
        }
    }
}

impl fmt::Display for Bounds3D {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Bounds3D({:?} to {:?})", self.min, self.max)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_bounds_rejected() {
        let result = Bounds3D::new(Vec3::ONE, Vec3::ZERO);
        assert!(matches!(result, Err(MathError::InvalidConfiguration { .. })));
    }

    #[test]
    fn test_cube_properties() {
        let cube = Bounds3D::cube(Vec3::new(1.0, 2.0, 3.0), 2.0).unwrap();
        assert_eq!(cube.max, Vec3::new(3.0, 4.0, 5.0));
        assert_eq!(cube.center(), Vec3::new(2.0, 3.0, 4.0));
        assert_eq!(cube.size(), Vec3::splat(2.0));
        assert!(cube.contains_point(Vec3::new(2.0, 2.0, 5.0)));
        assert!(!cube.contains_point(Vec3::new(0.5, 3.0, 4.0)));
    }

    #[test]
    fn test_shrink() {
        let cube = Bounds3D::cube(Vec3::ZERO, 10.0).unwrap();
        let inner = cube.shrink(2.0);
        assert_eq!(inner.min, Vec3::splat(2.0));
        assert_eq!(inner.max, Vec3::splat(8.0));

        let collapsed = cube.shrink(6.0);
        assert_eq!(collapsed.min, Vec3::splat(5.0));
        assert_eq!(collapsed.max, Vec3::splat(5.0));
    }

    #[test]
    fn test_display() {
        let cube = Bounds3D::cube(Vec3::ZERO, 1.0).unwrap();
        assert!(cube.to_string().starts_with("Bounds3D("));
    }
}
