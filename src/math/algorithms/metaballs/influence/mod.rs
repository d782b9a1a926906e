// src/math/algorithms/metaballs/influence/mod.rs
pub mod metaball_source;
pub mod point_source;
pub mod traits;

pub use self::metaball_source::*;
pub use self::point_source::*;
pub use self::traits::*;
