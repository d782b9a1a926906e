// src/physics/sim/resources.rs
use crate::math::algorithms::metaballs::{Metaballs, SurfaceConfig};
use bevy::prelude::*;

/// Laufzeit-Parameter der App: Konfiguration für den nächsten (Neu-)Start plus UI-Flags.
#[derive(Resource, Debug)]
pub struct SurfaceParameters {
    /// Wird erst beim nächsten Start bzw. Reset übernommen.
    pub config: SurfaceConfig,

    // --- Zeitsteuerung ---
    pub paused: bool,
    pub execute_single_step_request: bool,
    pub reset_request: bool,

    // --- Visualisierung & Debug ---
    pub show_grid_bounds: bool,
    pub show_metaballs: bool,
    pub show_normals: bool,
    pub normal_length: f32,
    /// Nur jede n-te Normale wird gezeichnet.
    pub normal_stride: usize,
}

impl Default for SurfaceParameters {
    fn default() -> Self {
        Self {
            config: SurfaceConfig::default(),

            paused: false,
            execute_single_step_request: false,
            reset_request: false,

            show_grid_bounds: true,
            show_metaballs: false,
            show_normals: false,
            normal_length: 0.25,
            normal_stride: 3,
        }
    }
}

/// Die laufende Oberfläche. Existiert erst nach erfolgreicher Initialisierung.
#[derive(Resource, Debug)]
pub struct SurfaceSimulation(pub Metaballs);

/// Markiert die Entität, deren Mesh jeden Frame neu befüllt wird.
#[derive(Component, Debug)]
pub struct MetaballSurface;
