// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Front/behind classification relative to an agent's facing direction.
//!
//! Two tests are provided:
//! - [`in_front_planar`] is a half-space test on the sign of
//!   `direction · (neighbor - agent)`. Perpendicular candidates (`D == 0`)
//!   are not in front.
//! - [`is_linear`] only accepts candidates lying exactly on the facing axis
//!   (zero cross product, no tolerance) and then classifies them as ahead
//!   when displacement and direction are both positive on at least one axis.
//!
//! The "at least one axis" rule is coarse: an axis with a negative facing
//! component never counts as agreement, so a candidate straight ahead of an
//! agent facing `(-1, 0, 0)` is classified as behind. Simulations built on
//! this classification depend on it; do not tighten it here.

use crate::agent::{candidate_position, require_direction, require_position, Agent};
use crate::error::NeighborError;
use crate::spatial::{cross3, displacement3, dot3, exact3};

/// Returns `true` when `neighbor` lies strictly in the half-space `agent` faces.
pub fn in_front_planar<A, N>(agent: &A, neighbor: &N) -> Result<bool, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent + ?Sized,
{
    let origin = require_position(agent)?;
    let facing = facing(agent)?;
    ahead_in_plane(origin, facing, candidate_position(neighbor))
}

/// Returns `true` when `neighbor` is on `agent`'s facing axis and its sense
/// (ahead or behind) matches `front`.
///
/// Off-axis candidates return `false` for both senses.
pub fn is_linear<A, N>(agent: &A, neighbor: &N, front: bool) -> Result<bool, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent + ?Sized,
{
    let origin = require_position(agent)?;
    let facing = facing(agent)?;
    on_axis(origin, facing, candidate_position(neighbor), front)
}

/// Reads the agent's direction as exactly three components.
pub(crate) fn facing<A: Agent + ?Sized>(agent: &A) -> Result<[f64; 3], NeighborError> {
    exact3(require_direction(agent)?)
}

pub(crate) fn ahead_in_plane(
    origin: &[f64],
    facing: [f64; 3],
    target: &[f64],
) -> Result<bool, NeighborError> {
    let d = displacement3(origin, target)?;
    Ok(dot3(facing, d) > 0.0)
}

pub(crate) fn on_axis(
    origin: &[f64],
    facing: [f64; 3],
    target: &[f64],
    front: bool,
) -> Result<bool, NeighborError> {
    let d = displacement3(origin, target)?;
    // Exact colinearity; -0.0 compares equal to 0.0.
    #[allow(clippy::float_cmp)]
    let colinear = cross3(d, facing).iter().all(|c| *c == 0.0);
    if !colinear {
        return Ok(false);
    }
    let same_dir = d.iter().zip(facing).any(|(dv, fv)| *dv > 0.0 && fv > 0.0);
    Ok(same_dir == front)
}
