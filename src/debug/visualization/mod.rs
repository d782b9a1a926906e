// src/debug/visualization/mod.rs
pub mod grid_bounds;
pub mod normals;
