// src/math/algorithms/metaballs/builder.rs

use crate::math::algorithms::marching_cubes::{grid::resolution_fits, NormalMode};
use crate::math::algorithms::metaballs::metaballs::Metaballs;
use crate::math::error::{MathError, MathResult};
use bevy::math::Vec3;

/// Vollständige Konfiguration einer Metaball-Oberfläche.
///
/// Wird beim Aufbau von [`Metaballs`] einmal geprüft. Gitterauflösung und
/// Anzahl der Metabälle bleiben danach fest.
#[derive(Debug, Clone, PartialEq)]
pub struct SurfaceConfig {
    /// Zellen pro Achse.
    pub grid_resolution: usize,
    pub cell_width: f32,
    /// Minimale Ecke des Gitterwürfels.
    pub origin: Vec3,
    pub isolevel: f32,
    pub metaball_count: usize,
    pub min_radius: f32,
    pub max_radius: f32,
    /// Maximaler Betrag jeder Geschwindigkeitskomponente (Einheiten pro Tick).
    pub max_speed: f32,
    /// Zeitschritt pro Tick.
    pub time_step: f32,
    /// `None` = zufälliger Seed.
    pub seed: Option<u64>,
    /// Jede n-te Gitterkoordinate auf dem Boden bekommt eine Punktquelle. `None` = kein Boden.
    pub plane_stride: Option<usize>,
    pub plane_influence: f32,
    pub normal_mode: NormalMode,
    /// Abtastung und Polygonisierung mit Rayon.
    pub parallel: bool,
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self {
            grid_resolution: 24,
            cell_width: 0.5,
            origin: Vec3::ZERO,
            isolevel: 1.0,
            metaball_count: 6,
            min_radius: 0.6,
            max_radius: 1.2,
            max_speed: 0.05,
            time_step: 1.0,
            seed: None,
            plane_stride: Some(4),
            plane_influence: 1.0,
            normal_mode: NormalMode::Gradient,
            parallel: true,
        }
    }
}

impl SurfaceConfig {
    /// Kantenlänge des Gitterwürfels in Weltkoordinaten.
    pub fn grid_width(&self) -> f32 {
        self.grid_resolution as f32 * self.cell_width
    }

    /// Prüft alle Parameter. Wird von [`Metaballs::configure`] aufgerufen.
    pub fn validate(&self) -> MathResult<()> {
        if self.grid_resolution == 0 || !resolution_fits(self.grid_resolution) {
            return Err(MathError::InvalidResolution {
                resolution: self.grid_resolution,
            });
        }
        if !self.cell_width.is_finite() || self.cell_width <= 0.0 {
            return Err(MathError::InvalidCellWidth {
                cell_width: self.cell_width,
            });
        }
        if !self.isolevel.is_finite() {
            return Err(MathError::InvalidIsolevel {
                isolevel: self.isolevel,
            });
        }
        if !self.origin.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("origin must be finite, got {:?}", self.origin),
            });
        }

        let radii_valid = self.min_radius.is_finite()
            && self.max_radius.is_finite()
            && self.min_radius > 0.0
            && self.min_radius <= self.max_radius;
        if !radii_valid {
            return Err(MathError::InvalidRadiusRange {
                min: self.min_radius,
                max: self.max_radius,
            });
        }

        let diameter = 2.0 * self.max_radius;
        if diameter > self.grid_width() {
            return Err(MathError::MetaballTooLarge {
                diameter,
                grid_width: self.grid_width(),
            });
        }

        if !self.max_speed.is_finite() || self.max_speed < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("max_speed must be finite and >= 0, got {}", self.max_speed),
            });
        }
        if !self.time_step.is_finite() || self.time_step < 0.0 {
            return Err(MathError::InvalidConfiguration {
                message: format!("time_step must be finite and >= 0, got {}", self.time_step),
            });
        }
        if self.plane_stride == Some(0) {
            return Err(MathError::InvalidConfiguration {
                message: "plane_stride must be at least 1".to_string(),
            });
        }
        if !self.plane_influence.is_finite() {
            return Err(MathError::InvalidConfiguration {
                message: format!("plane_influence must be finite, got {}", self.plane_influence),
            });
        }
        Ok(())
    }
}

/// Builder zum komfortablen Erstellen und Konfigurieren von `Metaballs`-Instanzen.
#[derive(Debug, Clone, Default)]
pub struct MetaballsBuilder {
    config: SurfaceConfig,
}

impl MetaballsBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: SurfaceConfig) -> Self {
        Self { config }
    }

    pub fn grid_resolution(mut self, resolution: usize) -> Self {
        self.config.grid_resolution = resolution;
        self
    }

    pub fn cell_width(mut self, width: f32) -> Self {
        self.config.cell_width = width;
        self
    }

    pub fn origin(mut self, origin: Vec3) -> Self {
        self.config.origin = origin;
        self
    }

    pub fn isolevel(mut self, isolevel: f32) -> Self {
        self.config.isolevel = isolevel;
        self
    }

    pub fn metaball_count(mut self, count: usize) -> Self {
        self.config.metaball_count = count;
        self
    }

    pub fn radius_range(mut self, min: f32, max: f32) -> Self {
        self.config.min_radius = min;
        self.config.max_radius = max;
        self
    }

    pub fn max_speed(mut self, speed: f32) -> Self {
        self.config.max_speed = speed;
        self
    }

    pub fn time_step(mut self, dt: f32) -> Self {
        self.config.time_step = dt;
        self
    }

    pub fn seed(mut self, seed: u64) -> Self {
        self.config.seed = Some(seed);
        self
    }

    /// Boden aus Punktquellen mit Abstand `stride` und Gewicht `influence`.
    pub fn plane(mut self, stride: usize, influence: f32) -> Self {
        self.config.plane_stride = Some(stride);
        self.config.plane_influence = influence;
        self
    }

    pub fn without_plane(mut self) -> Self {
        self.config.plane_stride = None;
        self
    }

    pub fn normal_mode(mut self, mode: NormalMode) -> Self {
        self.config.normal_mode = mode;
        self
    }

    pub fn parallel(mut self, parallel: bool) -> Self {
        self.config.parallel = parallel;
        self
    }

    pub fn config(&self) -> &SurfaceConfig {
        &self.config
    }

    pub fn build(self) -> MathResult<Metaballs> {
        Metaballs::configure(self.config)
    }
}
