// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Errors raised by neighbor queries and their geometric primitives.

use thiserror::Error;

/// Errors emitted by the neighbor filters.
///
/// Reference-agent preconditions (`MissingPosition`, `MissingDirection`)
/// are reported when a filter is constructed, before any candidate is read.
/// Per-candidate problems are reported lazily as `Err` items of the
/// [`Neighbors`](crate::Neighbors) iterator.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum NeighborError {
    /// The reference agent has no position (absent or empty).
    #[error("agent must have a position")]
    MissingPosition,
    /// The reference agent has no facing direction (absent or empty).
    #[error("agent must have a direction")]
    MissingDirection,
    /// A distance function name did not match any known metric.
    #[error("unknown distance function: {0:?}")]
    UnknownDistanceFunction(String),
    /// A vector had a different number of components than required.
    #[error("dimension mismatch: expected {expected} components, found {found}")]
    DimensionMismatch {
        /// Components the operation required.
        expected: usize,
        /// Components actually supplied.
        found: usize,
    },
    /// A radius range was NaN or inverted.
    #[error("invalid radius range [{min}, {max}]")]
    InvalidRadius {
        /// Requested lower bound.
        min: f64,
        /// Requested upper bound.
        max: f64,
    },
}
