// src/debug/visualization/normals.rs
use crate::physics::sim::resources::{SurfaceParameters, SurfaceSimulation};
use bevy::prelude::*;

/// Zeichnet die Vertex-Normalen des aktuellen Netzes als Linien.
pub fn draw_surface_normals_system(
    mut gizmos: Gizmos,
    params: Res<SurfaceParameters>,
    simulation: Option<Res<SurfaceSimulation>>,
) {
    if !params.show_normals {
        return;
    }
    let Some(simulation) = simulation else {
        return;
    };

    let mesh = simulation.0.mesh();
    let stride = params.normal_stride.max(1);
    for (origin, normal) in mesh
        .vertices
        .iter()
        .zip(mesh.normals.iter())
        .step_by(stride)
    {
        // Null-Normalen (entartete Dreiecke) auslassen
        if *normal == Vec3::ZERO {
            continue;
        }
        gizmos.line(*origin, *origin + *normal * params.normal_length, Color::CYAN);
    }
}
