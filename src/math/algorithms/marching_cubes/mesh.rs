// src/math/algorithms/marching_cubes/mesh.rs

use super::grid::Grid;
use super::polygonizer::{polygonize, CellPolygon, NormalMode};
use crate::math::scalar_field::ScalarField3D;
use bevy::math::Vec3;
use rayon::prelude::*;

/// Zellen pro Rayon-Arbeitspaket.
const CELLS_PER_CHUNK: usize = 512;

/// Empfänger eines fertigen Frames, z.B. ein Renderer.
///
/// `vertices` und `normals` sind gleich lang, immer ein Vielfaches von drei,
/// je drei aufeinanderfolgende Einträge bilden ein Dreieck.
pub trait MeshConsumer {
    fn consume(&mut self, vertices: &[Vec3], normals: &[Vec3]);
}

/// Dreiecksliste eines Frames, ohne Vertex-Sharing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SurfaceMesh {
    pub vertices: Vec<Vec3>,
    pub normals: Vec<Vec3>,
}

impl SurfaceMesh {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn clear(&mut self) {
        self.vertices.clear();
        self.normals.clear();
    }

    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn triangle_count(&self) -> usize {
        self.vertices.len() / 3
    }

    fn push_polygon(&mut self, polygon: &CellPolygon) {
        for triangle in polygon.triangles() {
            self.vertices.extend_from_slice(&triangle.positions);
            self.normals.extend_from_slice(&triangle.normals);
        }
    }

    fn append(&mut self, other: &mut SurfaceMesh) {
        self.vertices.append(&mut other.vertices);
        self.normals.append(&mut other.normals);
    }

    pub fn present<C: MeshConsumer + ?Sized>(&self, consumer: &mut C) {
        consumer.consume(&self.vertices, &self.normals);
    }
}

/// Kennzahlen eines gebauten Frames.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FrameStats {
    pub triangle_count: usize,
    /// Zellen, die mindestens ein Dreieck beigetragen haben.
    pub active_cell_count: usize,
}

impl std::ops::AddAssign for FrameStats {
    fn add_assign(&mut self, rhs: Self) {
        self.triangle_count += rhs.triangle_count;
        self.active_cell_count += rhs.active_cell_count;
    }
}

/// Baut aus einem abgetasteten [`Grid`] die Dreiecksliste eines Frames.
///
/// Zellen werden in aufsteigender linearer Reihenfolge ausgegeben. Im parallelen
/// Modus bearbeitet jedes Rayon-Paket einen zusammenhängenden Zellbereich, die
/// Teilergebnisse werden danach in Reihenfolge aneinandergehängt. Serielle und
/// parallele Ausgabe sind deshalb identisch.
#[derive(Debug, Clone, Copy)]
pub struct MeshAccumulator {
    pub isolevel: f32,
    pub normal_mode: NormalMode,
    pub parallel: bool,
}

impl MeshAccumulator {
    pub fn new(isolevel: f32, normal_mode: NormalMode, parallel: bool) -> Self {
        Self {
            isolevel,
            normal_mode,
            parallel,
        }
    }

    /// Verwirft den Inhalt von `mesh` und füllt ihn mit dem aktuellen Frame.
    pub fn build<F: ScalarField3D + ?Sized>(
        &self,
        grid: &Grid,
        field: &F,
        mesh: &mut SurfaceMesh,
    ) -> FrameStats {
        mesh.clear();

        if !self.parallel {
            return self.build_range(grid, field, 0..grid.cell_count(), mesh);
        }

        let chunks: Vec<(SurfaceMesh, FrameStats)> = (0..grid.cell_count())
            .step_by(CELLS_PER_CHUNK)
            .collect::<Vec<_>>()
            .into_par_iter()
            .map(|start| {
                let end = (start + CELLS_PER_CHUNK).min(grid.cell_count());
                let mut part = SurfaceMesh::new();
                let stats = self.build_range(grid, field, start..end, &mut part);
                (part, stats)
            })
            .collect();

        let mut stats = FrameStats::default();
        for (mut part, part_stats) in chunks {
            mesh.append(&mut part);
            stats += part_stats;
        }
        stats
    }

    fn build_range<F: ScalarField3D + ?Sized>(
        &self,
        grid: &Grid,
        field: &F,
        range: std::ops::Range<usize>,
        mesh: &mut SurfaceMesh,
    ) -> FrameStats {
        let mut stats = FrameStats::default();
        for cell in &grid.cells()[range] {
            let corners = grid.cell_corners(cell);
            let Some(polygon) = polygonize(&corners, self.isolevel, self.normal_mode, field)
            else {
                continue;
            };
            if !polygon.is_empty() {
                stats.active_cell_count += 1;
                stats.triangle_count += polygon.len();
            }
            mesh.push_polygon(&polygon);
        }
        stats
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::algorithms::metaballs::field::MetaballField;
    use crate::math::algorithms::metaballs::influence::MetaballSource;

    #[derive(Default)]
    struct CountingConsumer {
        calls: usize,
        vertices: usize,
    }

    impl MeshConsumer for CountingConsumer {
        fn consume(&mut self, vertices: &[Vec3], normals: &[Vec3]) {
            assert_eq!(vertices.len(), normals.len());
            self.calls += 1;
            self.vertices += vertices.len();
        }
    }

    fn sampled_grid(balls: &[MetaballSource]) -> Grid {
        let mut grid = Grid::new(12, 1.0, Vec3::ZERO).unwrap();
        grid.resample(&MetaballField::new(balls, &[]), false);
        grid
    }

    #[test]
    fn test_empty_field_gives_empty_mesh() {
        let grid = sampled_grid(&[]);
        let mut mesh = SurfaceMesh::new();
        let stats = MeshAccumulator::new(0.5, NormalMode::Face, false).build(
            &grid,
            &MetaballField::new(&[], &[]),
            &mut mesh,
        );
        assert!(mesh.is_empty());
        assert_eq!(stats, FrameStats::default());
    }

    #[test]
    fn test_buffer_is_whole_triangles() {
        let balls = [
            MetaballSource::stationary(Vec3::new(4.3, 5.1, 6.2), 2.0),
            MetaballSource::stationary(Vec3::new(7.4, 6.0, 5.5), 1.5),
        ];
        let grid = sampled_grid(&balls);
        let field = MetaballField::new(&balls, &[]);
        let mut mesh = SurfaceMesh::new();
        let stats =
            MeshAccumulator::new(0.8, NormalMode::Gradient, false).build(&grid, &field, &mut mesh);

        assert!(stats.triangle_count > 0);
        assert_eq!(mesh.len() % 3, 0);
        assert_eq!(mesh.normals.len(), mesh.vertices.len());
        assert_eq!(mesh.triangle_count(), stats.triangle_count);
        assert!(stats.active_cell_count <= grid.cell_count());
        assert!(stats.triangle_count <= stats.active_cell_count * 5);
    }

    #[test]
    fn test_parallel_build_matches_serial() {
        let balls = [
            MetaballSource::stationary(Vec3::new(3.3, 4.1, 5.2), 2.2),
            MetaballSource::stationary(Vec3::new(8.1, 7.7, 6.9), 1.8),
        ];
        let grid = sampled_grid(&balls);
        let field = MetaballField::new(&balls, &[]);

        let mut serial = SurfaceMesh::new();
        let mut parallel = SurfaceMesh::new();
        let serial_stats = MeshAccumulator::new(1.0, NormalMode::CornerGradient, false)
            .build(&grid, &field, &mut serial);
        let parallel_stats = MeshAccumulator::new(1.0, NormalMode::CornerGradient, true)
            .build(&grid, &field, &mut parallel);

        assert_eq!(serial_stats, parallel_stats);
        assert_eq!(serial, parallel);
    }

    #[test]
    fn test_rebuild_replaces_previous_frame() {
        let balls = [MetaballSource::stationary(Vec3::splat(6.0), 2.0)];
        let grid = sampled_grid(&balls);
        let field = MetaballField::new(&balls, &[]);
        let accumulator = MeshAccumulator::new(1.0, NormalMode::Face, false);

        let mut mesh = SurfaceMesh::new();
        accumulator.build(&grid, &field, &mut mesh);
        let first = mesh.clone();
        accumulator.build(&grid, &field, &mut mesh);
        assert_eq!(first, mesh);
    }

    #[test]
    fn test_present_hands_buffers_to_consumer() {
        let balls = [MetaballSource::stationary(Vec3::splat(6.0), 2.0)];
        let grid = sampled_grid(&balls);
        let field = MetaballField::new(&balls, &[]);
        let mut mesh = SurfaceMesh::new();
        MeshAccumulator::new(1.0, NormalMode::Face, false).build(&grid, &field, &mut mesh);

        let mut consumer = CountingConsumer::default();
        mesh.present(&mut consumer);
        assert_eq!(consumer.calls, 1);
        assert_eq!(consumer.vertices, mesh.len());
    }
}
