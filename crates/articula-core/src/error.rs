use thiserror::Error;

use crate::ids::{ArticulationId, KinematicArticulationId};

/// Top-level error type for articula.
#[derive(Debug, Error)]
pub enum ArticulaError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Link error: {0}")]
    Link(#[from] LinkError),

    #[error("Scene error: {0}")]
    Scene(#[from] SceneError),
}

/// Link construction errors.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum LinkError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(&'static str),
}

/// Configuration errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),

    #[error("Invalid timestep: {0} (must be > 0)")]
    InvalidTimestep(f64),

    #[error("control_dt must be >= physics_dt")]
    InvalidSubsteps,

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

/// Scene and articulation management errors.
#[derive(Debug, Error)]
pub enum SceneError {
    #[error("Articulation not found: {0}")]
    ArticulationNotFound(ArticulationId),

    #[error("Kinematic articulation not found: {0}")]
    KinematicArticulationNotFound(KinematicArticulationId),

    #[error("Articulation has no links")]
    EmptyArticulation,

    #[error("Link {0} has no parent")]
    MissingParent(usize),

    #[error("Link {link} has invalid parent index {parent}")]
    InvalidParent { link: usize, parent: usize },

    #[error("Link {link} has invalid joint limits [{lower}, {upper}]")]
    InvalidLimits { link: usize, lower: f32, upper: f32 },

    #[error("DOF mismatch: expected {expected}, got {got}")]
    DofMismatch { expected: usize, got: usize },

    #[error("Physics engine rejected joint: {0}")]
    JointRejected(String),

    #[error(transparent)]
    Link(#[from] LinkError),
}
