// ./src/main.rs
use bevy::prelude::*;
use bevy_egui::EguiPlugin;
use bevy_panorbit_camera::PanOrbitCameraPlugin;

// Eigene Module deklarieren
pub mod debug;
pub mod math;
pub mod physics;
pub mod setup; // Kamera und Licht

use debug::{
    ui::simulation_control_ui_system,
    visualization::{
        grid_bounds::{draw_grid_bounds_system, draw_metaball_gizmos_system},
        normals::draw_surface_normals_system,
    },
};
use physics::sim::systems::SurfacePlugin;
use setup::setup_scene;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(EguiPlugin)
        .add_plugins(PanOrbitCameraPlugin)
        .add_plugins(SurfacePlugin)
        .add_systems(Startup, setup_scene)
        .add_systems(
            Update,
            (
                simulation_control_ui_system,
                draw_grid_bounds_system,
                draw_metaball_gizmos_system,
                draw_surface_normals_system,
            ),
        )
        .run();
}
