// src/math/algorithms/metaballs/mod.rs

pub mod builder;
pub mod field;
pub mod influence;
pub mod metaballs;

pub use self::builder::{MetaballsBuilder, SurfaceConfig};
pub use self::field::MetaballField;
pub use self::influence::{FieldInfluence, InverseSquare, MetaballSource, PointSource};
pub use self::metaballs::Metaballs;
