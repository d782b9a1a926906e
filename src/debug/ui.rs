// ./src/debug/ui.rs
use crate::math::algorithms::marching_cubes::NormalMode;
use crate::physics::sim::resources::{SurfaceParameters, SurfaceSimulation};
use crate::physics::sim::state::SimulationState;
use bevy::prelude::*;
use bevy_egui::{
    EguiContexts,
    egui::{self, Slider, Window},
};

pub fn simulation_control_ui_system(
    mut contexts: EguiContexts,
    mut params: ResMut<SurfaceParameters>,
    simulation: Option<Res<SurfaceSimulation>>,
    current_state: Res<State<SimulationState>>,
) {
    Window::new("Metaball-Steuerung")
        .default_width(320.0)
        .show(contexts.ctx_mut(), |ui| {
            ui.heading("Status");
            ui.label(format!("Zustand: {:?}", current_state.get()));
            match simulation.as_deref() {
                Some(SurfaceSimulation(metaballs)) => {
                    let stats = metaballs.stats();
                    ui.label(format!("Frame: {}", metaballs.frame()));
                    ui.label(format!("Dreiecke: {}", stats.triangle_count));
                    ui.label(format!(
                        "Aktive Zellen: {} / {}",
                        stats.active_cell_count,
                        metaballs.grid().cell_count()
                    ));
                    ui.label(format!(
                        "Metabälle: {}, Bodenpunkte: {}",
                        metaballs.balls().len(),
                        metaballs.points().len()
                    ));
                }
                None => {
                    ui.colored_label(egui::Color32::LIGHT_RED, "Keine gültige Konfiguration.");
                }
            }

            ui.horizontal(|ui| {
                if ui
                    .button(if params.paused { "▶ Play" } else { "⏸ Pause" })
                    .clicked()
                {
                    params.paused = !params.paused;
                }
                if ui.button("Schritt Vorwärts ▶").clicked() {
                    params.execute_single_step_request = true;
                }
                if ui.button("↺ Reset").clicked() {
                    params.reset_request = true;
                }
            });

            ui.separator();

            ui.collapsing("Konfiguration (gilt ab Reset)", |ui| {
                let config = &mut params.config;
                ui.add(Slider::new(&mut config.grid_resolution, 1..=64).text("Auflösung"));
                ui.add(Slider::new(&mut config.cell_width, 0.05..=2.0).text("Zellbreite"));
                ui.add(Slider::new(&mut config.isolevel, 0.1..=5.0).text("Isolevel"));
                ui.add(Slider::new(&mut config.metaball_count, 0..=32).text("Metabälle"));
                ui.add(Slider::new(&mut config.min_radius, 0.1..=4.0).text("Min. Radius"));
                ui.add(Slider::new(&mut config.max_radius, 0.1..=4.0).text("Max. Radius"));
                ui.add(
                    Slider::new(&mut config.max_speed, 0.0..=0.5).text("Max. Geschwindigkeit"),
                );

                let mut plane_enabled = config.plane_stride.is_some();
                ui.checkbox(&mut plane_enabled, "Boden aus Punktquellen");
                if plane_enabled {
                    let mut stride = config.plane_stride.unwrap_or(4);
                    ui.add(Slider::new(&mut stride, 1..=16).text("Abstand"));
                    ui.add(Slider::new(&mut config.plane_influence, 0.0..=3.0).text("Gewicht"));
                    config.plane_stride = Some(stride);
                } else {
                    config.plane_stride = None;
                }

                ui.label("Normalen");
                ui.horizontal(|ui| {
                    ui.radio_value(&mut config.normal_mode, NormalMode::Gradient, "Gradient");
                    ui.radio_value(
                        &mut config.normal_mode,
                        NormalMode::CornerGradient,
                        "Eckwerte",
                    );
                    ui.radio_value(&mut config.normal_mode, NormalMode::Face, "Flach");
                });
                ui.checkbox(&mut config.parallel, "Parallel (Rayon)");

                let mut seeded = config.seed.is_some();
                ui.checkbox(&mut seeded, "Fester Seed");
                if seeded {
                    let mut seed = config.seed.unwrap_or(0);
                    ui.add(egui::DragValue::new(&mut seed));
                    config.seed = Some(seed);
                } else {
                    config.seed = None;
                }
            });

            ui.collapsing("Visualisierung & Debug", |ui| {
                ui.checkbox(&mut params.show_grid_bounds, "Gittergrenzen");
                ui.checkbox(&mut params.show_metaballs, "Metaball-Radien");
                ui.checkbox(&mut params.show_normals, "Normalen");
                ui.add(Slider::new(&mut params.normal_length, 0.05..=1.0).text("Normalenlänge"));
                ui.add(Slider::new(&mut params.normal_stride, 1..=32).text("Jede n-te Normale"));
            });

            ui.collapsing("Kamerasteuerung Info", |ui| {
                ui.label("Rechte Maustaste + Ziehen: Orbit");
                ui.label("Mittlere Maustaste + Ziehen: Pan");
                ui.label("Mausrad: Zoom");
            });
        });
}
