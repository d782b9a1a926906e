// src/math/algorithms/marching_cubes/grid.rs

use super::tables::CORNER_OFFSETS;
use crate::math::error::{MathError, MathResult};
use crate::math::scalar_field::ScalarField3D;
use crate::math::types::Bounds3D;
use bevy::math::Vec3;
use rayon::prelude::*;

/// Abtastpunkt an einer Zellecke. Die Position ist fest, der Isowert wird
/// jeden Frame neu berechnet.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Corner {
    pub position: Vec3,
    pub isovalue: f32,
}

impl Corner {
    pub fn new(position: Vec3, isovalue: f32) -> Self {
        Self { position, isovalue }
    }
}

/// Eine Gitterzelle. Die Geometrie wird nur beim Aufbau des Gitters berechnet,
/// die Breite ist für alle Zellen gleich ([`Grid::cell_width`]).
///
/// Die acht Ecken liegen im gemeinsamen Eckgitter von [`Grid`]; `corners` enthält
/// deren Indizes in der Reihenfolge von [`CORNER_OFFSETS`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Cell {
    pub center: Vec3,
    corners: [usize; 8],
}

impl Cell {
    pub fn corner_indices(&self) -> &[usize; 8] {
        &self.corners
    }
}

/// `n³`, oder `None` bei Überlauf.
fn cube(n: usize) -> Option<usize> {
    n.checked_mul(n)?.checked_mul(n)
}

/// Prüft, ob sich Zell- und Eckanzahl für `resolution` als `usize` darstellen lassen.
pub fn resolution_fits(resolution: usize) -> bool {
    resolution.checked_add(1).and_then(cube).is_some()
}

/// Festes 3D-Gitter aus `resolution³` Zellen über einem Würfel im Weltraum.
///
/// Zellen und Ecken liegen in flachen Arrays. Lineare Indizes laufen mit x am
/// schnellsten und z am langsamsten: `i = x + y * res + z * res²`.
/// Nachbarzellen teilen sich ihre Ecken, pro Frame wird jeder Gitterpunkt genau einmal abgetastet.
#[derive(Debug, Clone)]
pub struct Grid {
    resolution: usize,
    cell_width: f32,
    origin: Vec3,
    cells: Vec<Cell>,
    corners: Vec<Corner>,
}

impl Grid {
    pub fn new(resolution: usize, cell_width: f32, origin: Vec3) -> MathResult<Self> {
        if resolution == 0 {
            return Err(MathError::InvalidResolution { resolution });
        }
        if !cell_width.is_finite() || cell_width <= 0.0 {
            return Err(MathError::InvalidCellWidth { cell_width });
        }
        if !origin.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("Grid origin must be finite, got {:?}", origin),
            });
        }

        let (Some(cell_count), Some(corner_count)) = (
            cube(resolution),
            resolution.checked_add(1).and_then(cube),
        ) else {
            return Err(MathError::InvalidResolution { resolution });
        };

        let lattice = resolution + 1;
        let mut corners = Vec::with_capacity(corner_count);
        for z in 0..lattice {
            for y in 0..lattice {
                for x in 0..lattice {
                    let position = origin + Vec3::new(x as f32, y as f32, z as f32) * cell_width;
                    corners.push(Corner::new(position, 0.0));
                }
            }
        }

        let mut grid = Self {
            resolution,
            cell_width,
            origin,
            cells: Vec::new(),
            corners,
        };

        grid.cells = (0..cell_count)
            .map(|i| {
                let [x, y, z] = grid.i1_to_i3(i);
                let mut corner_indices = [0; 8];
                for (slot, offset) in corner_indices.iter_mut().zip(CORNER_OFFSETS.iter()) {
                    // Offset -1 gehört zum unteren, +1 zum oberen Gitterpunkt
                    let cx = x + usize::from(offset[0] > 0);
                    let cy = y + usize::from(offset[1] > 0);
                    let cz = z + usize::from(offset[2] > 0);
                    *slot = cx + cy * lattice + cz * lattice * lattice;
                }
                Cell {
                    center: grid.cell_center([x, y, z]),
                    corners: corner_indices,
                }
            })
            .collect();

        Ok(grid)
    }

    pub fn resolution(&self) -> usize {
        self.resolution
    }

    pub fn cell_width(&self) -> f32 {
        self.cell_width
    }

    /// Kantenlänge des gesamten Gitterwürfels.
    pub fn width(&self) -> f32 {
        self.resolution as f32 * self.cell_width
    }

    pub fn bounds(&self) -> MathResult<Bounds3D> {
        Bounds3D::cube(self.origin, self.width())
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    pub fn cell(&self, index: usize) -> Option<&Cell> {
        self.cells.get(index)
    }

    /// Alle Gitterpunkte (geteilte Ecken).
    pub fn lattice(&self) -> &[Corner] {
        &self.corners
    }

    /// Linearer Index → 3D-Index.
    pub fn i1_to_i3(&self, i1: usize) -> [usize; 3] {
        let res = self.resolution;
        let res2 = res * res;
        [i1 % res, (i1 % res2) / res, i1 / res2]
    }

    /// 3D-Index → linearer Index.
    pub fn i3_to_i1(&self, x: usize, y: usize, z: usize) -> usize {
        let res = self.resolution;
        x + y * res + z * res * res
    }

    /// 3D-Index → Weltposition des Zellzentrums.
    pub fn cell_center(&self, i3: [usize; 3]) -> Vec3 {
        let half = self.cell_width * 0.5;
        self.origin + Vec3::new(i3[0] as f32, i3[1] as f32, i3[2] as f32) * self.cell_width
            + Vec3::splat(half)
    }

    /// Die acht Ecken einer Zelle in Tabellenreihenfolge.
    pub fn cell_corners(&self, cell: &Cell) -> [Corner; 8] {
        cell.corners.map(|index| self.corners[index])
    }

    /// Tastet das Feld an jedem Gitterpunkt neu ab. Die Geometrie bleibt unverändert.
    pub fn resample<F: ScalarField3D + ?Sized>(&mut self, field: &F, parallel: bool) {
        if parallel {
            self.corners
                .par_iter_mut()
                .for_each(|corner| corner.isovalue = field.sample(corner.position));
        } else {
            for corner in &mut self.corners {
                corner.isovalue = field.sample(corner.position);
            }
        }
    }
}
