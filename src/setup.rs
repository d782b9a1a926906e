// ./src/setup.rs
use crate::physics::sim::resources::SurfaceParameters;
use bevy::prelude::*;
use bevy_panorbit_camera::PanOrbitCamera;

pub fn setup_scene(mut commands: Commands, params: Res<SurfaceParameters>) {
    let config = &params.config;
    let width = config.grid_width();
    let center = config.origin + Vec3::splat(width * 0.5);

    // Licht
    commands.spawn(PointLightBundle {
        point_light: PointLight {
            shadows_enabled: true,
            intensity: 10_000_000.,
            range: width * 10.0,
            ..default()
        },
        transform: Transform::from_translation(center + Vec3::new(width, width * 1.5, width)),
        ..default()
    });
    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 200.0,
    });

    // Kamera
    commands.spawn((
        Camera3dBundle {
            transform: Transform::from_translation(center + Vec3::new(-1.0, 0.8, 2.0) * width)
                .looking_at(center, Vec3::Y),
            ..default()
        },
        PanOrbitCamera {
            focus: center,
            button_orbit: MouseButton::Right,
            button_pan: MouseButton::Middle,
            radius: Some(width * 2.0), // Start Entfernung
            ..default()
        },
    ));
}
