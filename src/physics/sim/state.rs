// src/physics/sim/state.rs
use bevy::prelude::*;

#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default)]
pub enum SimulationState {
    #[default] // Startzustand
    Initializing,
    Running,
    Paused,
}
