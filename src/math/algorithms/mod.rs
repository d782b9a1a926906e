// src/math/algorithms/mod.rs

pub mod marching_cubes;
pub mod metaballs;

pub use self::marching_cubes::{
    FrameStats, Grid, MeshAccumulator, MeshConsumer, NormalMode, SurfaceMesh,
};
pub use self::metaballs::{Metaballs, MetaballsBuilder, SurfaceConfig};
