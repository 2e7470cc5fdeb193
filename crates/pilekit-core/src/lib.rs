//! # PileKit Core
//!
//! Core types shared by every PileKit crate.
//! Provides the geometry helpers, object identifiers, default layout
//! dimensions and the engine error taxonomy.

pub mod error;
pub mod geometry;
pub mod id;
pub mod layout;

pub use error::{EngineError, Result};
pub use geometry::{approx_eq, distance_sqr, Rect, Vec2};
pub use id::{ObjectId, TextureId};
