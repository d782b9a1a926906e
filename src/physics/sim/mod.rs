// src/physics/sim/mod.rs
pub mod resources;
pub mod state;
pub mod systems;
