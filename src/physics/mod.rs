// src/physics/mod.rs
pub mod dynamics;
pub mod sim;
