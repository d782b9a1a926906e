pub mod algorithms;
pub mod error;
pub mod scalar_field;
pub mod types;
pub mod utils;

// Re-exports für einfache Verwendung
pub use error::{MathError, MathResult};
pub use types::*;

// Öffentliche API
pub mod prelude {
    pub use super::{
        algorithms::{
            marching_cubes::{FrameStats, MeshConsumer, NormalMode, SurfaceMesh},
            metaballs::{MetaballSource, Metaballs, MetaballsBuilder, PointSource, SurfaceConfig},
        },
        error::{MathError, MathResult},
        scalar_field::ScalarField3D,
        types::*,
    };
}
