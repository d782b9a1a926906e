// src/physics/sim/systems.rs
use super::resources::{MetaballSurface, SurfaceParameters, SurfaceSimulation};
use super::state::SimulationState;
use crate::math::algorithms::marching_cubes::MeshConsumer;
use crate::math::algorithms::metaballs::{Metaballs, MetaballsBuilder};
use bevy::prelude::*;
use bevy::render::render_asset::RenderAssetUsages;
use bevy::render::render_resource::PrimitiveTopology;

/// Registriert Ressourcen, Zustände und Systeme der Metaball-Oberfläche.
pub struct SurfacePlugin;

impl Plugin for SurfacePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<SurfaceParameters>()
            .init_state::<SimulationState>()
            .add_systems(Startup, spawn_surface_entity_system)
            .add_systems(
                OnEnter(SimulationState::Initializing),
                initialize_surface_system,
            )
            .add_systems(
                Update,
                (
                    handle_reset_request_system,
                    handle_simulation_requests_system,
                    advance_surface_system.run_if(
                        resource_exists::<SurfaceSimulation>.and_then(
                            in_state(SimulationState::Running).or_else(
                                in_state(SimulationState::Paused).and_then(single_step_requested),
                            ),
                        ),
                    ),
                    upload_surface_mesh_system.run_if(resource_exists::<SurfaceSimulation>),
                )
                    .chain(),
            );
    }
}

impl MeshConsumer for Mesh {
    fn consume(&mut self, vertices: &[Vec3], normals: &[Vec3]) {
        let positions: Vec<[f32; 3]> = vertices.iter().map(|v| v.to_array()).collect();
        let normals: Vec<[f32; 3]> = normals.iter().map(|n| n.to_array()).collect();
        self.insert_attribute(Mesh::ATTRIBUTE_POSITION, positions);
        self.insert_attribute(Mesh::ATTRIBUTE_NORMAL, normals);
    }
}

fn empty_surface_mesh() -> Mesh {
    Mesh::new(PrimitiveTopology::TriangleList, RenderAssetUsages::default())
        .with_inserted_attribute(Mesh::ATTRIBUTE_POSITION, Vec::<[f32; 3]>::new())
        .with_inserted_attribute(Mesh::ATTRIBUTE_NORMAL, Vec::<[f32; 3]>::new())
}

/// Baut die Oberfläche aus der aktuellen Konfiguration. Fehler werden geloggt, nicht propagiert.
fn configure_surface(params: &SurfaceParameters) -> Option<Metaballs> {
    match MetaballsBuilder::from_config(params.config.clone()).build() {
        Ok(mut metaballs) => {
            if params.paused {
                metaballs.pause();
            }
            Some(metaballs)
        }
        Err(err) => {
            error!("Could not configure metaball surface: {}", err);
            None
        }
    }
}

fn target_state(params: &SurfaceParameters) -> SimulationState {
    if params.paused {
        SimulationState::Paused
    } else {
        SimulationState::Running
    }
}

pub fn single_step_requested(params: Res<SurfaceParameters>) -> bool {
    params.execute_single_step_request
}

pub fn spawn_surface_entity_system(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        PbrBundle {
            mesh: meshes.add(empty_surface_mesh()),
            material: materials.add(StandardMaterial {
                base_color: Color::rgb(0.35, 0.55, 0.85),
                metallic: 0.1,
                perceptual_roughness: 0.5,
                ..default()
            }),
            ..default()
        },
        MetaballSurface,
        Name::new("Metaball Surface"),
    ));
}

pub fn initialize_surface_system(
    mut commands: Commands,
    params: Res<SurfaceParameters>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    // Bei einem Fehler bleibt der Zustand auf Initializing, ein Reset versucht es erneut
    if let Some(metaballs) = configure_surface(&params) {
        commands.insert_resource(SurfaceSimulation(metaballs));
        next_state.set(target_state(&params));
        info!("Initialization complete, simulation is {:?}.", target_state(&params));
    }
}

pub fn handle_reset_request_system(
    mut commands: Commands,
    mut params: ResMut<SurfaceParameters>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
) {
    if !params.reset_request {
        return;
    }
    params.reset_request = false;
    info!("Reset requested, rebuilding metaball surface.");

    if let Some(metaballs) = configure_surface(&params) {
        commands.insert_resource(SurfaceSimulation(metaballs));
        let target = target_state(&params);
        if *current_state.get() != target {
            next_state.set(target);
        }
    }
}

/// Setzt das Pause-Flag aus der UI in Zustandswechsel um.
pub fn handle_simulation_requests_system(
    params: Res<SurfaceParameters>,
    current_state: Res<State<SimulationState>>,
    mut next_state: ResMut<NextState<SimulationState>>,
    simulation: Option<ResMut<SurfaceSimulation>>,
) {
    let Some(mut simulation) = simulation else {
        return;
    };
    match (current_state.get(), params.paused) {
        (SimulationState::Running, true) => {
            simulation.0.pause();
            next_state.set(SimulationState::Paused);
            info!("Simulation paused.");
        }
        (SimulationState::Paused, false) => {
            simulation.0.resume();
            next_state.set(SimulationState::Running);
            info!("Simulation running.");
        }
        _ => {}
    }
}

pub fn advance_surface_system(
    mut simulation: ResMut<SurfaceSimulation>,
    mut params: ResMut<SurfaceParameters>,
) {
    if params.execute_single_step_request {
        params.execute_single_step_request = false;
        simulation.0.step();
        debug!("Single step to frame {}", simulation.0.frame());
    } else {
        simulation.0.tick();
    }
}

/// Lädt das Netz des letzten Frames in das Bevy-Mesh, sobald sich die Simulation geändert hat.
pub fn upload_surface_mesh_system(
    simulation: Res<SurfaceSimulation>,
    query: Query<&Handle<Mesh>, With<MetaballSurface>>,
    mut meshes: ResMut<Assets<Mesh>>,
) {
    if !simulation.is_changed() {
        return;
    }
    for handle in query.iter() {
        match meshes.get_mut(handle) {
            Some(mesh) => simulation.0.present(mesh),
            None => warn!("Metaball surface mesh asset is missing."),
        }
    }
}
