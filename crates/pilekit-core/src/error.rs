//! Error handling for PileKit
//!
//! Two families of errors live here:
//! - Rejections a caller can recover from (self join, missing facets, full pile)
//! - Invariant faults that indicate a bug in pile maintenance
//!   (dangling references, cycles)
//!
//! All error types use `thiserror` for ergonomic error handling.

use crate::id::ObjectId;
use thiserror::Error;

/// Engine error type
///
/// Returned by the registry, the pile model and the selection resolver. The
/// interaction layer never surfaces these to its caller; it logs them and
/// reverts the held object instead.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An object was asked to join itself
    #[error("Object {id} cannot join its own pile position")]
    SelfJoin {
        /// The offending object.
        id: ObjectId,
    },

    /// One side of a join lacks the pileable facet or a placement
    #[error("Object {id} is not pileable")]
    NotPileable {
        /// The object missing the facet.
        id: ObjectId,
    },

    /// The destination pile is already at its maximum size
    #[error("Pile anchored at {anchor} is full ({capacity} members)")]
    CapacityExceeded {
        /// The bottom object of the destination pile.
        anchor: ObjectId,
        /// The configured maximum.
        capacity: usize,
    },

    /// A pile link points at an object the registry no longer holds
    #[error("Object {from} links to missing object {missing}")]
    DanglingReference {
        /// The object holding the link.
        from: ObjectId,
        /// The identifier that failed to resolve.
        missing: ObjectId,
    },

    /// Walking a pile visited more objects than the registry holds
    #[error("Pile containing {id} has a cycle")]
    PileCycle {
        /// The object the walk started from.
        id: ObjectId,
    },

    /// Asymmetric link between two neighbours
    #[error("Broken pile link between {lower} and {upper}")]
    BrokenLink {
        /// The object believed to be below.
        lower: ObjectId,
        /// The object believed to be above.
        upper: ObjectId,
    },

    /// The caller referenced an object that was never registered
    #[error("Unknown object {id}")]
    UnknownObject {
        /// The unknown identifier.
        id: ObjectId,
    },

    /// The operation needs a placement facet
    #[error("Object {id} has no placement")]
    Unplaced {
        /// The object without a placement.
        id: ObjectId,
    },

    /// An object with this identifier is already registered
    #[error("Object {id} is already registered")]
    DuplicateObject {
        /// The duplicated identifier.
        id: ObjectId,
    },
}

impl EngineError {
    /// Check if this error means pile maintenance is broken.
    ///
    /// These must never occur under correct `join`/`detach` usage.
    pub fn is_invariant_fault(&self) -> bool {
        matches!(
            self,
            EngineError::DanglingReference { .. }
                | EngineError::PileCycle { .. }
                | EngineError::BrokenLink { .. }
        )
    }

    /// Check if this is a rejected join that should simply revert the drop
    pub fn is_rejection(&self) -> bool {
        matches!(
            self,
            EngineError::SelfJoin { .. }
                | EngineError::NotPileable { .. }
                | EngineError::CapacityExceeded { .. }
        )
    }
}

/// Result type using EngineError
pub type Result<T> = std::result::Result<T, EngineError>;
