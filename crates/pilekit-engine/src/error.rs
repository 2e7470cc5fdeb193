//! Error types for scene setup.

use pilekit_core::EngineError;
use pilekit_settings::SettingsError;
use thiserror::Error;

/// Errors raised while building a scene from a description.
#[derive(Error, Debug)]
pub enum SceneError {
    /// The engine refused an object or a pre-dealt pile.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// The description file could not be read or written.
    #[error(transparent)]
    Settings(#[from] SettingsError),

    /// A pile refers to a name no object carries.
    #[error("Pile references unknown object '{0}'")]
    UnknownName(String),

    /// Two objects share a name.
    #[error("Object name '{0}' is used more than once")]
    DuplicateName(String),

    /// A pile lists fewer than two members.
    #[error("Pile {index} needs at least two members, got {len}")]
    PileTooShort { index: usize, len: usize },
}

/// Result type alias for scene setup.
pub type SceneResult<T> = Result<T, SceneError>;
