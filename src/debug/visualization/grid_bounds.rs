// src/debug/visualization/grid_bounds.rs
use crate::physics::sim::resources::{SurfaceParameters, SurfaceSimulation};
use bevy::prelude::*;

/// Zeichnet den Gitterwürfel, in dem die Metabälle abprallen.
pub fn draw_grid_bounds_system(
    mut gizmos: Gizmos,
    params: Res<SurfaceParameters>,
    simulation: Option<Res<SurfaceSimulation>>,
) {
    if !params.show_grid_bounds {
        return;
    }
    let Some(simulation) = simulation else {
        return;
    };

    let bounds = simulation.0.bounds();
    gizmos.cuboid(
        Transform::from_translation(bounds.center()).with_scale(bounds.size()),
        Color::rgba(1.0, 1.0, 1.0, 0.4),
    );
}

/// Zeichnet jeden Metaball als Kugel mit seinem Radius, also der Fläche mit Einfluss 1.
pub fn draw_metaball_gizmos_system(
    mut gizmos: Gizmos,
    params: Res<SurfaceParameters>,
    simulation: Option<Res<SurfaceSimulation>>,
) {
    if !params.show_metaballs {
        return;
    }
    let Some(simulation) = simulation else {
        return;
    };

    for ball in simulation.0.balls() {
        gizmos
            .sphere(ball.position, Quat::IDENTITY, ball.radius(), Color::ORANGE)
            .circle_segments(16);
        // Geschwindigkeit, stark überhöht
        gizmos.line(
            ball.position,
            ball.position + ball.velocity * 20.0,
            Color::YELLOW,
        );
    }
}
