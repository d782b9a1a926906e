// src/math/error.rs
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum MathError {
    #[error("Invalid grid resolution: {resolution} (must be at least 1)")]
    InvalidResolution { resolution: usize },

    #[error("Invalid cell width: {cell_width} (must be finite and positive)")]
    InvalidCellWidth { cell_width: f32 },

    #[error("Invalid isolevel: {isolevel} (must be finite)")]
    InvalidIsolevel { isolevel: f32 },

    #[error("Invalid metaball radius range: min {min}, max {max}")]
    InvalidRadiusRange { min: f32, max: f32 },

    #[error("Metaball diameter {diameter} does not fit into a grid of width {grid_width}")]
    MetaballTooLarge { diameter: f32, grid_width: f32 },

    #[error("Invalid configuration: {message}")]
    InvalidConfiguration { message: String },
}

pub type MathResult<T> = Result<T, MathError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = MathError::InvalidResolution { resolution: 0 };
        assert_eq!(
            err.to_string(),
            "Invalid grid resolution: 0 (must be at least 1)"
        );

        let err = MathError::MetaballTooLarge {
            diameter: 12.0,
            grid_width: 10.0,
        };
        assert_eq!(
            err.to_string(),
            "Metaball diameter 12 does not fit into a grid of width 10"
        );
    }
}
