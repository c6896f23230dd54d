// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Serializable query descriptors.
//!
//! Hosts that drive behavior rules from data describe neighbor queries as
//! [`NeighborQuery`] values and run them with [`NeighborQuery::apply`].
//! Omitted fields take the documented defaults, so a document such as
//! `{"kind": "in_radius", "max_radius": 3.0}` is a complete query.

use serde::{Deserialize, Serialize};

use crate::agent::Agent;
use crate::error::NeighborError;
use crate::filter::{
    neighbors_behind, neighbors_in_front, neighbors_in_radius, neighbors_on_position, Neighbors,
};
use crate::spatial::DistanceFunction;

/// Parameters of [`neighbors_in_radius`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RadiusQuery {
    /// Inclusive upper bound on distance. Default `1.0`.
    pub max_radius: f64,
    /// Inclusive lower bound on distance. Default `0.0`.
    pub min_radius: f64,
    /// Metric used to measure distance. Default [`DistanceFunction::Euclidean`].
    pub distance_function: DistanceFunction,
    /// Reserved for restricting the metric to the horizontal plane.
    ///
    /// Accepted and carried through, but not applied yet: every position
    /// component always contributes to the distance.
    pub z_axis: bool,
}

impl Default for RadiusQuery {
    fn default() -> Self {
        Self {
            max_radius: 1.0,
            min_radius: 0.0,
            distance_function: DistanceFunction::Euclidean,
            z_axis: false,
        }
    }
}

impl RadiusQuery {
    /// Default query with the given upper bound.
    pub fn new(max_radius: f64) -> Self {
        Self {
            max_radius,
            ..Self::default()
        }
    }

    /// Sets the inclusive lower bound.
    pub fn with_min_radius(mut self, min_radius: f64) -> Self {
        self.min_radius = min_radius;
        self
    }

    /// Sets the metric.
    pub fn with_distance_function(mut self, distance_function: DistanceFunction) -> Self {
        self.distance_function = distance_function;
        self
    }

    /// Sets the (currently inert) `z_axis` flag.
    pub fn with_z_axis(mut self, z_axis: bool) -> Self {
        self.z_axis = z_axis;
        self
    }

    /// Rejects NaN bounds and `min_radius > max_radius`.
    ///
    /// Infinite bounds are allowed; `max_radius = inf` matches every
    /// candidate at or beyond `min_radius`.
    pub fn validate(&self) -> Result<(), NeighborError> {
        if self.min_radius.is_nan() || self.max_radius.is_nan() || self.min_radius > self.max_radius
        {
            return Err(NeighborError::InvalidRadius {
                min: self.min_radius,
                max: self.max_radius,
            });
        }
        Ok(())
    }
}

/// Parameters of [`neighbors_in_front`] and [`neighbors_behind`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OrientationQuery {
    /// Restrict to candidates exactly on the facing axis. Default `false`.
    pub colinear: bool,
}

/// A neighbor query described as data.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum NeighborQuery {
    /// See [`neighbors_on_position`].
    OnPosition,
    /// See [`neighbors_in_radius`].
    InRadius(RadiusQuery),
    /// See [`neighbors_in_front`].
    InFront(OrientationQuery),
    /// See [`neighbors_behind`].
    Behind(OrientationQuery),
}

impl NeighborQuery {
    /// Checks parameters that can be wrong independently of any agent.
    pub fn validate(&self) -> Result<(), NeighborError> {
        match self {
            Self::InRadius(radius) => radius.validate(),
            Self::OnPosition | Self::InFront(_) | Self::Behind(_) => Ok(()),
        }
    }

    /// Validates the query and runs the matching filter.
    pub fn apply<'a, A, N>(
        &self,
        agent: &'a A,
        candidates: &'a [N],
    ) -> Result<Neighbors<'a, N>, NeighborError>
    where
        A: Agent + ?Sized,
        N: Agent,
    {
        self.validate()?;
        match *self {
            Self::OnPosition => neighbors_on_position(agent, candidates),
            Self::InRadius(radius) => neighbors_in_radius(agent, candidates, radius),
            Self::InFront(o) => neighbors_in_front(agent, candidates, o.colinear),
            Self::Behind(o) => neighbors_behind(agent, candidates, o.colinear),
        }
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::agent::AgentState;

    #[test]
    fn radius_defaults() {
        let q = RadiusQuery::default();
        assert_eq!(q.max_radius, 1.0);
        assert_eq!(q.min_radius, 0.0);
        assert_eq!(q.distance_function, DistanceFunction::Euclidean);
        assert!(!q.z_axis);
        assert!(q.validate().is_ok());
    }

    #[test]
    fn validation_rejects_inverted_and_nan_ranges() {
        let inverted = RadiusQuery::new(1.0).with_min_radius(2.0);
        assert_eq!(
            inverted.validate(),
            Err(NeighborError::InvalidRadius { min: 2.0, max: 1.0 })
        );
        assert!(RadiusQuery::new(f64::NAN).validate().is_err());
        assert!(RadiusQuery::new(f64::INFINITY).validate().is_ok());
    }

    #[test]
    fn apply_dispatches_to_filters() {
        let agent = AgentState::at([0.0, 0.0, 0.0]).with_direction([0.0, 1.0, 0.0]);
        let candidates = vec![
            AgentState::at([0.0, 0.0, 0.0]),
            AgentState::at([0.0, 4.0, 0.0]),
            AgentState::at([0.0, -4.0, 0.0]),
        ];
        let count = |query: NeighborQuery| query.apply(&agent, &candidates).unwrap().count();
        assert_eq!(count(NeighborQuery::OnPosition), 1);
        assert_eq!(count(NeighborQuery::InRadius(RadiusQuery::new(4.0))), 3);
        assert_eq!(
            count(NeighborQuery::InRadius(RadiusQuery::new(4.0).with_min_radius(0.5))),
            2
        );
        assert_eq!(count(NeighborQuery::InFront(OrientationQuery::default())), 1);
        assert_eq!(count(NeighborQuery::Behind(OrientationQuery::default())), 2);
        // The coincident candidate sits on the axis with no positive shared
        // component, so colinear mode files it behind.
        assert_eq!(
            count(NeighborQuery::Behind(OrientationQuery { colinear: true })),
            2
        );
        assert_eq!(
            count(NeighborQuery::InFront(OrientationQuery { colinear: true })),
            1
        );
    }

    #[test]
    fn apply_validates_before_filtering() {
        let agent = AgentState::at([0.0, 0.0]);
        let none: Vec<AgentState> = Vec::new();
        let query = NeighborQuery::InRadius(RadiusQuery::new(-1.0));
        assert_eq!(
            query.apply(&agent, &none).err(),
            Some(NeighborError::InvalidRadius {
                min: 0.0,
                max: -1.0
            })
        );
    }
}
