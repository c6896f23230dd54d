// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
#![doc = r"Neighbor queries for Echo agent simulations.

Each simulation step the host engine supplies a reference agent and a slice
of candidate agents; the filters in this crate narrow that slice down for
behavior rules:

- [`neighbors_on_position`]: candidates at exactly the reference position.
- [`neighbors_in_radius`]: candidates within an inclusive distance band,
  measured with one of four [`DistanceFunction`]s.
- [`neighbors_in_front`] / [`neighbors_behind`]: candidates on either side of
  the reference's facing direction, by half-space or exact-axis test.

Design notes:
- Pure and stateless: nothing here mutates an agent or keeps state between
  calls, so independent queries may run concurrently.
- Lazy: filters return a [`Neighbors`] iterator that evaluates candidates on
  demand and preserves input order.
- Reference-agent preconditions fail before iteration; malformed candidates
  surface as `Err` items when reached.
- No spatial index: candidate gathering belongs to the host.
"]

/// Agent capability trait and a loosely typed agent record.
pub mod agent;
/// Error type shared by every query.
pub mod error;
/// Neighbor filters and their lazy result iterator.
pub mod filter;
/// Front/behind classification primitives.
pub mod orientation;
/// Serializable query descriptors and dispatch.
pub mod query;
/// Distance metrics and 3D vector helpers.
pub mod spatial;

pub use agent::{Agent, AgentState};
pub use error::NeighborError;
pub use filter::{
    neighbors_behind, neighbors_in_front, neighbors_in_radius, neighbors_on_position, Neighbors,
};
pub use orientation::{in_front_planar, is_linear};
pub use query::{NeighborQuery, OrientationQuery, RadiusQuery};
pub use spatial::{
    chebyshev_distance, euclidean_distance, euclidean_squared_distance, manhattan_distance,
    DistanceFunction,
};
