// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! The four neighbor filters and the lazy iterator they return.
//!
//! Every filter validates the reference agent up front and then hands back a
//! [`Neighbors`] iterator. Candidates are evaluated one at a time as the
//! iterator is driven, in slice order. The candidate slice stays borrowed for
//! as long as the iterator lives, so the host cannot mutate it mid-query.

use std::fmt;
use std::iter::FusedIterator;
use std::slice;

use tracing::{debug, instrument};

use crate::agent::{candidate_position, require_position, Agent};
use crate::error::NeighborError;
use crate::orientation::{ahead_in_plane, facing, on_axis};
use crate::query::RadiusQuery;
use crate::spatial::DistanceFunction;

/// Which side of the facing axis an orientation filter keeps.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Side {
    Front,
    Behind,
}

/// Per-candidate test, with everything read from the reference agent
/// resolved ahead of time.
#[derive(Debug, Clone, Copy)]
enum Predicate<'a> {
    OnPosition {
        origin: &'a [f64],
    },
    InRadius {
        origin: &'a [f64],
        min_radius: f64,
        max_radius: f64,
        metric: DistanceFunction,
    },
    Planar {
        origin: &'a [f64],
        facing: [f64; 3],
        side: Side,
    },
    Colinear {
        origin: &'a [f64],
        facing: [f64; 3],
        side: Side,
    },
}

impl Predicate<'_> {
    fn matches(&self, candidate: &[f64]) -> Result<bool, NeighborError> {
        match *self {
            Self::OnPosition { origin } => {
                if origin.len() != candidate.len() {
                    return Err(NeighborError::DimensionMismatch {
                        expected: origin.len(),
                        found: candidate.len(),
                    });
                }
                Ok(origin == candidate)
            }
            Self::InRadius {
                origin,
                min_radius,
                max_radius,
                metric,
            } => {
                let d = metric.distance(origin, candidate)?;
                Ok(min_radius <= d && d <= max_radius)
            }
            Self::Planar {
                origin,
                facing,
                side,
            } => {
                let ahead = ahead_in_plane(origin, facing, candidate)?;
                Ok(ahead == (side == Side::Front))
            }
            Self::Colinear {
                origin,
                facing,
                side,
            } => on_axis(origin, facing, candidate, side == Side::Front),
        }
    }
}

/// Lazy, single-pass view over the candidates that satisfy a neighbor query.
///
/// Yields `Ok(candidate)` for each match in input order and skips
/// non-matches. A candidate whose position cannot be evaluated (missing, or
/// of the wrong dimensionality) is yielded as `Err` rather than dropped;
/// iteration may continue past it. Cloning the iterator restarts nothing; the
/// clone resumes from the same point.
#[must_use = "neighbor filters are lazy and do nothing unless consumed"]
pub struct Neighbors<'a, N> {
    candidates: slice::Iter<'a, N>,
    predicate: Predicate<'a>,
}

impl<'a, N> Neighbors<'a, N> {
    fn new(candidates: &'a [N], predicate: Predicate<'a>) -> Self {
        Self {
            candidates: candidates.iter(),
            predicate,
        }
    }

    /// Candidates not yet examined.
    pub fn remaining(&self) -> usize {
        self.candidates.len()
    }
}

impl<'a, N: Agent> Neighbors<'a, N> {
    /// Collects every match, stopping at the first malformed candidate.
    pub fn try_collect_vec(self) -> Result<Vec<&'a N>, NeighborError> {
        self.collect()
    }
}

impl<N> Clone for Neighbors<'_, N> {
    fn clone(&self) -> Self {
        Self {
            candidates: self.candidates.clone(),
            predicate: self.predicate,
        }
    }
}

impl<N> fmt::Debug for Neighbors<'_, N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Neighbors")
            .field("remaining", &self.remaining())
            .field("predicate", &self.predicate)
            .finish()
    }
}

impl<'a, N: Agent> Iterator for Neighbors<'a, N> {
    type Item = Result<&'a N, NeighborError>;

    fn next(&mut self) -> Option<Self::Item> {
        for candidate in self.candidates.by_ref() {
            match self.predicate.matches(candidate_position(candidate)) {
                Ok(true) => return Some(Ok(candidate)),
                Ok(false) => {}
                Err(err) => return Some(Err(err)),
            }
        }
        None
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (0, Some(self.remaining()))
    }
}

impl<N: Agent> FusedIterator for Neighbors<'_, N> {}

/// Candidates whose position equals the agent's position exactly, component
/// by component.
///
/// A candidate whose position has a different number of components yields a
/// [`NeighborError::DimensionMismatch`] item.
#[instrument(level = "trace", skip_all, fields(candidates = neighbors.len()))]
pub fn neighbors_on_position<'a, A, N>(
    agent: &'a A,
    neighbors: &'a [N],
) -> Result<Neighbors<'a, N>, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent,
{
    let origin = require_position(agent)?;
    Ok(Neighbors::new(neighbors, Predicate::OnPosition { origin }))
}

/// Candidates whose distance from the agent lies in
/// `[query.min_radius, query.max_radius]` (both ends inclusive) under
/// `query.distance_function`.
///
/// `query.z_axis` is accepted but not applied: distance is always measured
/// over every position component. The query is not validated here; an
/// inverted range simply matches nothing (see [`RadiusQuery::validate`]).
#[instrument(
    level = "trace",
    skip_all,
    fields(
        candidates = neighbors.len(),
        metric = %query.distance_function,
        min_radius = query.min_radius,
        max_radius = query.max_radius,
    )
)]
pub fn neighbors_in_radius<'a, A, N>(
    agent: &'a A,
    neighbors: &'a [N],
    query: RadiusQuery,
) -> Result<Neighbors<'a, N>, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent,
{
    let origin = require_position(agent)?;
    if query.z_axis {
        debug!("z_axis requested; radius is measured over all position components");
    }
    Ok(Neighbors::new(
        neighbors,
        Predicate::InRadius {
            origin,
            min_radius: query.min_radius,
            max_radius: query.max_radius,
            metric: query.distance_function,
        },
    ))
}

/// Candidates ahead of the agent.
///
/// With `colinear == false` this is the half-space test of
/// [`in_front_planar`](crate::in_front_planar). With `colinear == true` only
/// candidates exactly on the facing axis are considered, classified by
/// [`is_linear`](crate::is_linear) with `front = true`.
#[instrument(level = "trace", skip(agent, neighbors), fields(candidates = neighbors.len()))]
pub fn neighbors_in_front<'a, A, N>(
    agent: &'a A,
    neighbors: &'a [N],
    colinear: bool,
) -> Result<Neighbors<'a, N>, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent,
{
    oriented(agent, neighbors, colinear, Side::Front)
}

/// Candidates behind the agent.
///
/// With `colinear == false` this keeps every candidate that is not in front
/// in the half-space sense, perpendicular and coincident candidates
/// included. With `colinear == true` only candidates exactly on the facing
/// axis are considered, classified by [`is_linear`](crate::is_linear) with
/// `front = false`; off-axis candidates are excluded from both sides.
#[instrument(level = "trace", skip(agent, neighbors), fields(candidates = neighbors.len()))]
pub fn neighbors_behind<'a, A, N>(
    agent: &'a A,
    neighbors: &'a [N],
    colinear: bool,
) -> Result<Neighbors<'a, N>, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent,
{
    oriented(agent, neighbors, colinear, Side::Behind)
}

fn oriented<'a, A, N>(
    agent: &'a A,
    neighbors: &'a [N],
    colinear: bool,
    side: Side,
) -> Result<Neighbors<'a, N>, NeighborError>
where
    A: Agent + ?Sized,
    N: Agent,
{
    let origin = require_position(agent)?;
    let facing = facing(agent)?;
    // Orientation math needs a 3D origin; report it once instead of per candidate.
    if origin.len() < 3 {
        return Err(NeighborError::DimensionMismatch {
            expected: 3,
            found: origin.len(),
        });
    }
    let predicate = if colinear {
        Predicate::Colinear {
            origin,
            facing,
            side,
        }
    } else {
        Predicate::Planar {
            origin,
            facing,
            side,
        }
    };
    Ok(Neighbors::new(neighbors, predicate))
}
