// src/math/algorithms/metaballs/metaballs.rs

use crate::math::algorithms::marching_cubes::{
    FrameStats, Grid, MeshAccumulator, MeshConsumer, SurfaceMesh,
};
use crate::math::algorithms::metaballs::{
    builder::SurfaceConfig,
    field::MetaballField,
    influence::{MetaballSource, PointSource},
};
use crate::math::error::MathResult;
use crate::math::types::Bounds3D;
use crate::physics::dynamics::step_metaballs;
use bevy::log::{debug, info, trace};
use bevy::math::Vec3;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Hauptstruktur: Metabälle, Abtastgitter und das Dreiecksnetz des letzten Frames.
///
/// Ein Frame läuft immer in derselben Reihenfolge ab:
/// Dynamik → Neuabtastung aller Gitterpunkte → Polygonisierung aller Zellen.
#[derive(Debug, Clone)]
pub struct Metaballs {
    config: SurfaceConfig,
    grid: Grid,
    bounds: Bounds3D,
    balls: Vec<MetaballSource>,
    points: Vec<PointSource>,
    mesh: SurfaceMesh,
    stats: FrameStats,
    paused: bool,
    frame: u64,
}

impl Metaballs {
    /// Prüft die Konfiguration, baut das Gitter, verteilt die Metabälle und
    /// berechnet das Netz für den Startzustand.
    pub fn configure(config: SurfaceConfig) -> MathResult<Self> {
        config.validate()?;

        let grid = Grid::new(config.grid_resolution, config.cell_width, config.origin)?;
        let bounds = grid.bounds()?;
        let balls = Self::spawn_metaballs(&config, &bounds);
        let points = match config.plane_stride {
            Some(stride) => PointSource::floor_grid(
                config.origin,
                config.grid_resolution,
                config.cell_width,
                stride,
                config.plane_influence,
            ),
            None => Vec::new(),
        };

        info!(
            "Metaball surface: {}³ cells in {}, isolevel {}, {} metaballs, {} plane points, normals {:?}, parallel {}",
            config.grid_resolution,
            bounds,
            config.isolevel,
            balls.len(),
            points.len(),
            config.normal_mode,
            config.parallel
        );

        let mut metaballs = Self {
            config,
            grid,
            bounds,
            balls,
            points,
            mesh: SurfaceMesh::new(),
            stats: FrameStats::default(),
            paused: false,
            frame: 0,
        };
        metaballs.rebuild();
        Ok(metaballs)
    }

    fn spawn_metaballs(config: &SurfaceConfig, bounds: &Bounds3D) -> Vec<MetaballSource> {
        let mut rng = match config.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => {
                let mut thread_rng = rand::rng();
                StdRng::from_rng(&mut thread_rng)
            }
        };

        let speed = config.max_speed;
        (0..config.metaball_count)
            .map(|_| {
                let radius = rng.random_range(config.min_radius..=config.max_radius);
                let mut coordinate = |min: f32, max: f32| {
                    let low = min + radius;
                    rng.random_range(low..=(max - radius).max(low))
                };
                let position = Vec3::new(
                    coordinate(bounds.min.x, bounds.max.x),
                    coordinate(bounds.min.y, bounds.max.y),
                    coordinate(bounds.min.z, bounds.max.z),
                );
                let velocity = Vec3::new(
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                    rng.random_range(-speed..=speed),
                );
                MetaballSource::new(position, radius, velocity)
            })
            .collect()
    }

    /// Ersetzt alle Metabälle und berechnet das Netz neu, ohne die Dynamik zu bewegen.
    pub fn set_metaballs(&mut self, balls: Vec<MetaballSource>) {
        self.balls = balls;
        self.rebuild();
    }

    /// Ein Frame. Im pausierten Zustand bleibt das vorherige Netz unverändert.
    pub fn tick(&mut self) -> &SurfaceMesh {
        if !self.paused {
            self.advance();
        }
        &self.mesh
    }

    /// Genau ein Frame, unabhängig vom Pausenzustand.
    pub fn step(&mut self) -> &SurfaceMesh {
        self.advance();
        &self.mesh
    }

    pub fn pause(&mut self) {
        if !self.paused {
            debug!("Metaballs paused at frame {}", self.frame);
        }
        self.paused = true;
    }

    pub fn resume(&mut self) {
        if self.paused {
            debug!("Metaballs resumed at frame {}", self.frame);
        }
        self.paused = false;
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    fn advance(&mut self) {
        step_metaballs(&mut self.balls, &self.bounds, self.config.time_step);
        self.frame += 1;
        self.rebuild();
    }

    fn rebuild(&mut self) {
        let field = MetaballField::new(&self.balls, &self.points);
        self.grid.resample(&field, self.config.parallel);

        let accumulator = MeshAccumulator::new(
            self.config.isolevel,
            self.config.normal_mode,
            self.config.parallel,
        );
        self.stats = accumulator.build(&self.grid, &field, &mut self.mesh);

        trace!(
            "Frame {}: {} sources, {} triangles from {} active cells",
            self.frame,
            field.source_count(),
            self.stats.triangle_count,
            self.stats.active_cell_count
        );
    }

    /// Übergibt das aktuelle Netz an einen Renderer.
    pub fn present<C: MeshConsumer + ?Sized>(&self, consumer: &mut C) {
        self.mesh.present(consumer);
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn stats(&self) -> FrameStats {
        self.stats
    }

    pub fn frame(&self) -> u64 {
        self.frame
    }

    pub fn balls(&self) -> &[MetaballSource] {
        &self.balls
    }

    pub fn points(&self) -> &[PointSource] {
        &self.points
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn bounds(&self) -> &Bounds3D {
        &self.bounds
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }
}
