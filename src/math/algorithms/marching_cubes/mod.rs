// src/math/algorithms/marching_cubes/mod.rs

pub mod grid;
pub mod mesh;
pub mod polygonizer;
pub mod tables;

pub use self::grid::{Cell, Corner, Grid};
pub use self::mesh::{FrameStats, MeshAccumulator, MeshConsumer, SurfaceMesh};
pub use self::polygonizer::{
    classify, interpolate_vertex, polygonize, CellPolygon, NormalMode, Triangle,
};
