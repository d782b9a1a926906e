// src/math/algorithms/marching_cubes/polygonizer.rs

//! Polygonisierung einer einzelnen Gitterzelle.
//!
//! Aus den acht Eckwerten wird ein 8-Bit-Index gebildet, über [`EDGE_TABLE`] die
//! geschnittenen Kanten bestimmt, auf jeder davon der Schnittpunkt interpoliert und
//! über [`TRI_TABLE`] zu höchstens fünf Dreiecken verbunden.

use super::grid::Corner;
use super::tables::{
    CORNER_OFFSETS, EDGE_CORNERS, EDGE_TABLE, MAX_TRIANGLES_PER_CELL, TRI_SENTINEL, TRI_TABLE,
};
use crate::math::scalar_field::ScalarField3D;
use crate::math::utils::comparison::nearly_equal_eps;
use crate::math::utils::constants::INTERPOLATION_EPSILON;
use crate::math::utils::vectors::{face_normal, try_normalize};
use bevy::math::Vec3;

/// Wie die Vertex-Normalen eines Dreiecks bestimmt werden.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NormalMode {
    /// Negativer analytischer Gradient des Skalarfeldes an jedem Vertex.
    #[default]
    Gradient,
    /// Negativer Gradient der trilinearen Interpolation der acht Eckwerte.
    /// Braucht das Feld nicht erneut auszuwerten.
    CornerGradient,
    /// Flache Dreiecksnormale, für alle drei Vertices gleich.
    Face,
}

/// Ein Dreieck mit drei Positionen und drei Normalen.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Triangle {
    pub positions: [Vec3; 3],
    pub normals: [Vec3; 3],
}

/// Ergebnis einer Zelle: bis zu [`MAX_TRIANGLES_PER_CELL`] Dreiecke ohne Heap-Allokation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CellPolygon {
    triangles: [Triangle; MAX_TRIANGLES_PER_CELL],
    count: usize,
}

impl CellPolygon {
    fn new() -> Self {
        Self {
            triangles: [Triangle::default(); MAX_TRIANGLES_PER_CELL],
            count: 0,
        }
    }

    fn push(&mut self, triangle: Triangle) {
        // TRI_TABLE enthält nie mehr als fünf Dreiecke
        debug_assert!(self.count < MAX_TRIANGLES_PER_CELL);
        if let Some(slot) = self.triangles.get_mut(self.count) {
            *slot = triangle;
            self.count += 1;
        }
    }

    pub fn triangles(&self) -> &[Triangle] {
        &self.triangles[..self.count]
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }
}

/// Gilt ein Eckwert als "innen"? NaN wird per Konvention als innen gewertet,
/// genau wie `+inf` bei einem Abtastpunkt direkt auf einer Quelle.
#[inline]
fn is_inside(isovalue: f32, isolevel: f32) -> bool {
    isovalue > isolevel || isovalue.is_nan()
}

/// 8-Bit-Klassifizierung: Bit `i` ist gesetzt, wenn Ecke `i` innen liegt.
pub fn classify(corners: &[Corner; 8], isolevel: f32) -> usize {
    corners
        .iter()
        .enumerate()
        .filter(|(_, corner)| is_inside(corner.isovalue, isolevel))
        .fold(0, |index, (i, _)| index | (1 << i))
}

/// Schnittpunkt des Isolevels auf der Kante von `a` nach `b`.
///
/// Reihenfolge der Sonderfälle (Toleranz [`INTERPOLATION_EPSILON`]):
/// `a` liegt auf dem Isolevel → `a`; `b` liegt darauf → `b`;
/// beide Werte praktisch gleich → `a`; sonst lineare Interpolation.
/// Ist ein Wert nicht endlich, wird die Position der jeweils anderen Ecke verwendet
/// (Grenzwert der Interpolation für einen gegen unendlich gehenden Eckwert).
pub fn interpolate_vertex(isolevel: f32, a: &Corner, b: &Corner) -> Vec3 {
    if !a.isovalue.is_finite() {
        return b.position;
    }
    if !b.isovalue.is_finite() {
        return a.position;
    }
    if nearly_equal_eps(isolevel, a.isovalue, INTERPOLATION_EPSILON) {
        return a.position;
    }
    if nearly_equal_eps(isolevel, b.isovalue, INTERPOLATION_EPSILON) {
        return b.position;
    }
    if nearly_equal_eps(a.isovalue, b.isovalue, INTERPOLATION_EPSILON) {
        return a.position;
    }

    let t = (isolevel - a.isovalue) / (b.isovalue - a.isovalue);
    a.position + t * (b.position - a.position)
}

/// Gradient der trilinearen Interpolation der Eckwerte an `point`.
fn corner_gradient(corners: &[Corner; 8], point: Vec3) -> Vec3 {
    // Ecke 0 ist die minimale, Ecke 6 die maximale Ecke der Zelle
    let min = corners[0].position;
    let extent = corners[6].position - min;
    let local = ((point - min) / extent).clamp(Vec3::ZERO, Vec3::ONE);

    let mut gradient = Vec3::ZERO;
    for (corner, offset) in corners.iter().zip(CORNER_OFFSETS.iter()) {
        let value = corner.isovalue;
        if !value.is_finite() {
            continue;
        }
        let sign = Vec3::new(offset[0] as f32, offset[1] as f32, offset[2] as f32);
        // Gewicht je Achse: local für die obere, 1 - local für die untere Ecke
        let weight = Vec3::new(
            if sign.x > 0.0 { local.x } else { 1.0 - local.x },
            if sign.y > 0.0 { local.y } else { 1.0 - local.y },
            if sign.z > 0.0 { local.z } else { 1.0 - local.z },
        );
        gradient += value
            * Vec3::new(
                sign.x * weight.y * weight.z,
                sign.y * weight.x * weight.z,
                sign.z * weight.x * weight.y,
            );
    }
    gradient / extent
}

/// Vertex-Normalen eines Dreiecks. Fällt bei entarteten Gradienten auf die
/// Flächennormale zurück, bei entarteten Dreiecken auf den Nullvektor.
fn triangle_normals<F: ScalarField3D + ?Sized>(
    positions: &[Vec3; 3],
    corners: &[Corner; 8],
    mode: NormalMode,
    field: &F,
) -> [Vec3; 3] {
    let flat = try_normalize(face_normal(positions[0], positions[1], positions[2]))
        .unwrap_or(Vec3::ZERO);

    match mode {
        NormalMode::Face => [flat; 3],
        NormalMode::Gradient => {
            positions.map(|p| try_normalize(-field.gradient(p)).unwrap_or(flat))
        }
        NormalMode::CornerGradient => {
            positions.map(|p| try_normalize(-corner_gradient(corners, p)).unwrap_or(flat))
        }
    }
}

/// Polygonisiert eine Zelle.
///
/// Gibt `None` zurück, wenn keine Kante geschnitten wird (Zelle komplett innen
/// oder außen). Ansonsten ein [`CellPolygon`] mit ein bis fünf Dreiecken.
pub fn polygonize<F: ScalarField3D + ?Sized>(
    corners: &[Corner; 8],
    isolevel: f32,
    normal_mode: NormalMode,
    field: &F,
) -> Option<CellPolygon> {
    let cube_index = classify(corners, isolevel);
    let edge_flags = EDGE_TABLE[cube_index];
    if edge_flags == 0 {
        return None;
    }

    let mut edge_vertices = [Vec3::ZERO; 12];
    for (edge, &(a, b)) in EDGE_CORNERS.iter().enumerate() {
        if edge_flags & (1 << edge) != 0 {
            edge_vertices[edge] = interpolate_vertex(isolevel, &corners[a], &corners[b]);
        }
    }

    let mut polygon = CellPolygon::new();
    for tri in TRI_TABLE[cube_index].chunks_exact(3) {
        if tri[0] == TRI_SENTINEL {
            break;
        }
        let positions = [
            edge_vertices[tri[0] as usize],
            edge_vertices[tri[1] as usize],
            edge_vertices[tri[2] as usize],
        ];
        let normals = triangle_normals(&positions, corners, normal_mode, field);
        polygon.push(Triangle { positions, normals });
    }

    Some(polygon)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::metaballs::field::MetaballField;
    use crate::math::algorithms::metaballs::influence::MetaballSource;
    use approx::assert_relative_eq;

    /// Einheitszelle mit Zentrum im Ursprung und den gegebenen Eckwerten.
    fn unit_cell(values: [f32; 8]) -> [Corner; 8] {
        let mut corners = [Corner::new(Vec3::ZERO, 0.0); 8];
        for (i, corner) in corners.iter_mut().enumerate() {
            let o = CORNER_OFFSETS[i];
            corner.position = Vec3::new(o[0] as f32, o[1] as f32, o[2] as f32) * 0.5;
            corner.isovalue = values[i];
        }
        corners
    }

    /// Zelle aus einer Bitmaske: gesetzte Bits bekommen 1.0, sonst 0.0.
    fn cell_from_index(index: usize) -> [Corner; 8] {
        let mut values = [0.0; 8];
        for (i, v) in values.iter_mut().enumerate() {
            if index & (1 << i) != 0 {
                *v = 1.0;
            }
        }
        unit_cell(values)
    }

    fn empty_field() -> MetaballField<'static> {
        MetaballField::new(&[], &[])
    }

    #[test]
    fn test_classify_sets_bits_above_isolevel() {
        let corners = unit_cell([1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 2.0]);
        assert_eq!(classify(&corners, 0.5), 0b1000_0001);
        // Gleichheit zählt nicht als innen
        assert_eq!(classify(&corners, 1.0), 0b1000_0000);
    }

    #[test]
    fn test_classify_non_finite_counts_as_inside() {
        let corners = unit_cell([f32::NAN, f32::INFINITY, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0]);
        assert_eq!(classify(&corners, 0.5), 0b11);
    }

    #[test]
    fn test_no_output_where_edge_table_is_empty() {
        let field = empty_field();
        for index in 0..256 {
            let corners = cell_from_index(index);
            let result = polygonize(&corners, 0.5, NormalMode::Face, &field);
            if EDGE_TABLE[index] == 0 {
                assert!(result.is_none(), "index {} should be empty", index);
            } else {
                assert!(result.is_some(), "index {} should produce triangles", index);
            }
        }
    }

    #[test]
    fn test_uniform_cells_produce_nothing() {
        let field = empty_field();
        for value in [0.0, 0.5, 0.7, 3.0] {
            let corners = unit_cell([value; 8]);
            let index = classify(&corners, 0.5);
            assert!(index == 0 || index == 255);
            assert!(polygonize(&corners, 0.5, NormalMode::Gradient, &field).is_none());
        }
    }

    #[test]
    fn test_triangle_count_bound() {
        let field = empty_field();
        for index in 0..256 {
            let corners = cell_from_index(index);
            let count = polygonize(&corners, 0.5, NormalMode::CornerGradient, &field)
                .map_or(0, |polygon| polygon.len());
            assert!(count <= MAX_TRIANGLES_PER_CELL);

            let table_len = TRI_TABLE[index]
                .iter()
                .position(|&e| e == TRI_SENTINEL)
                .unwrap_or(16);
            assert_eq!(table_len % 3, 0);
            assert_eq!(count, table_len / 3);
        }
    }

    #[test]
    fn test_interpolation_snaps_to_a_within_epsilon() {
        let a = Corner::new(Vec3::new(0.0, 0.0, 0.0), 0.500005);
        let b = Corner::new(Vec3::new(1.0, 2.0, 3.0), 0.0);
        assert_eq!(interpolate_vertex(0.5, &a, &b), a.position);
    }

    #[test]
    fn test_interpolation_snaps_to_b_within_epsilon() {
        let a = Corner::new(Vec3::new(0.0, 0.0, 0.0), 0.0);
        let b = Corner::new(Vec3::new(1.0, 2.0, 3.0), 0.499996);
        assert_eq!(interpolate_vertex(0.5, &a, &b), b.position);
    }

    #[test]
    fn test_interpolation_degenerate_returns_a() {
        let a = Corner::new(Vec3::new(-1.0, 0.0, 0.0), 0.2);
        let b = Corner::new(Vec3::new(1.0, 0.0, 0.0), 0.200001);
        assert_eq!(interpolate_vertex(0.5, &a, &b), a.position);
    }

    #[test]
    fn test_interpolation_midpoint_is_exact() {
        let a = Corner::new(Vec3::new(0.0, 0.0, 0.0), 0.0);
        let b = Corner::new(Vec3::new(2.0, 4.0, -6.0), 1.0);
        assert_eq!(interpolate_vertex(0.5, &a, &b), Vec3::new(1.0, 2.0, -3.0));
    }

    #[test]
    fn test_interpolation_is_linear() {
        let a = Corner::new(Vec3::ZERO, 0.0);
        let b = Corner::new(Vec3::new(4.0, 0.0, 0.0), 2.0);
        let p = interpolate_vertex(0.5, &a, &b);
        assert_relative_eq!(p.x, 1.0);
    }

    #[test]
    fn test_interpolation_non_finite_policy() {
        let finite = Corner::new(Vec3::ZERO, 0.1);
        let singular = Corner::new(Vec3::X, f32::INFINITY);
        assert_eq!(interpolate_vertex(0.5, &finite, &singular), finite.position);
        assert_eq!(interpolate_vertex(0.5, &singular, &finite), finite.position);

        let nan = Corner::new(Vec3::Y, f32::NAN);
        assert!(interpolate_vertex(0.5, &nan, &finite).is_finite());
    }

    #[test]
    fn test_single_corner_triangle_winds_outward() {
        // Nur Ecke 0 innen: ein Dreieck um die Ecke (-,-,-)
        let corners = cell_from_index(1);
        let polygon = polygonize(&corners, 0.5, NormalMode::Face, &empty_field()).unwrap();
        assert_eq!(polygon.len(), 1);

        let tri = polygon.triangles()[0];
        let outward = -corners[0].position;
        assert!(tri.normals[0].dot(outward) > 0.0);
        assert_eq!(tri.normals[0], tri.normals[1]);
        assert_eq!(tri.normals[1], tri.normals[2]);
    }

    #[test]
    fn test_single_corner_configurations_wind_outward() {
        let field = empty_field();
        for corner in 0..8 {
            let inside = cell_from_index(1 << corner);
            let outside = cell_from_index(255 ^ (1 << corner));
            let tip = inside[corner].position;

            let polygon = polygonize(&inside, 0.5, NormalMode::Face, &field).unwrap();
            assert_eq!(polygon.len(), 1);
            let tri = polygon.triangles()[0];
            let face = face_normal(tri.positions[0], tri.positions[1], tri.positions[2]);
            assert!(face.dot(-tip) > 0.0, "corner {} inside winds inward", corner);

            let polygon = polygonize(&outside, 0.5, NormalMode::Face, &field).unwrap();
            assert_eq!(polygon.len(), 1);
            let tri = polygon.triangles()[0];
            let face = face_normal(tri.positions[0], tri.positions[1], tri.positions[2]);
            assert!(face.dot(tip) > 0.0, "corner {} outside winds inward", corner);
        }
    }

    #[test]
    fn test_corner_gradient_matches_linear_field() {
        // f = x + 0.5 (Eckwerte 0 und 1 entlang x)
        let mut values = [0.0; 8];
        for (i, v) in values.iter_mut().enumerate() {
            *v = if CORNER_OFFSETS[i][0] > 0 { 1.0 } else { 0.0 };
        }
        let corners = unit_cell(values);
        let grad = corner_gradient(&corners, Vec3::new(0.1, -0.2, 0.3));
        assert_relative_eq!(grad.x, 1.0, epsilon = 1e-6);
        assert_relative_eq!(grad.y, 0.0, epsilon = 1e-6);
        assert_relative_eq!(grad.z, 0.0, epsilon = 1e-6);

        let polygon =
            polygonize(&corners, 0.5, NormalMode::CornerGradient, &empty_field()).unwrap();
        for tri in polygon.triangles() {
            for p in tri.positions {
                assert_relative_eq!(p.x, 0.0, epsilon = 1e-6);
            }
            for n in tri.normals {
                assert_relative_eq!(n.x, -1.0, epsilon = 1e-5);
            }
        }
    }

    #[test]
    fn test_gradient_normals_point_away_from_metaball() {
        let balls = [MetaballSource::stationary(Vec3::new(-0.5, -0.5, -0.5), 0.6)];
        let field = MetaballField::new(&balls, &[]);
        let mut corners = unit_cell([0.0; 8]);
        for corner in &mut corners {
            corner.isovalue = field.sample(corner.position);
        }
        // Ecke 0 liegt auf der Quelle: unendlicher Wert, gilt als innen
        assert!(corners[0].isovalue.is_infinite());

        let polygon = polygonize(&corners, 1.0, NormalMode::Gradient, &field).unwrap();
        assert!(!polygon.is_empty());
        for tri in polygon.triangles() {
            for (p, n) in tri.positions.iter().zip(tri.normals.iter()) {
                assert!(p.is_finite());
                assert_relative_eq!(n.length(), 1.0, epsilon = 1e-5);
                assert!(n.dot(*p - balls[0].position) > 0.0);
            }
        }
    }
}
