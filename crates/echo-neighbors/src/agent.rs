// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Agent capability consumed by the neighbor filters.
//!
//! The filters never depend on a concrete record layout. Anything that can
//! report a position and (for orientation queries) a facing direction can be
//! filtered. [`AgentState`] is a ready-made record for hosts that keep agents
//! as loosely typed field maps.

use std::collections::BTreeMap;
use std::rc::Rc;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::NeighborError;

/// Read-only view of the fields the neighbor queries consume.
///
/// `None` and an empty slice both mean "missing".
pub trait Agent {
    /// Position coordinates (2 or 3 components depending on the query).
    fn position(&self) -> Option<&[f64]>;
    /// Facing vector; orientation queries require exactly 3 components.
    fn direction(&self) -> Option<&[f64]>;
}

impl<T: Agent + ?Sized> Agent for &T {
    fn position(&self) -> Option<&[f64]> {
        (**self).position()
    }

    fn direction(&self) -> Option<&[f64]> {
        (**self).direction()
    }
}

impl<T: Agent + ?Sized> Agent for Box<T> {
    fn position(&self) -> Option<&[f64]> {
        (**self).position()
    }

    fn direction(&self) -> Option<&[f64]> {
        (**self).direction()
    }
}

impl<T: Agent + ?Sized> Agent for Rc<T> {
    fn position(&self) -> Option<&[f64]> {
        (**self).position()
    }

    fn direction(&self) -> Option<&[f64]> {
        (**self).direction()
    }
}

impl<T: Agent + ?Sized> Agent for Arc<T> {
    fn position(&self) -> Option<&[f64]> {
        (**self).position()
    }

    fn direction(&self) -> Option<&[f64]> {
        (**self).direction()
    }
}

/// Returns the reference agent's position or [`NeighborError::MissingPosition`].
pub(crate) fn require_position<A: Agent + ?Sized>(agent: &A) -> Result<&[f64], NeighborError> {
    match agent.position() {
        Some(position) if !position.is_empty() => Ok(position),
        _ => Err(NeighborError::MissingPosition),
    }
}

/// Returns the reference agent's direction or [`NeighborError::MissingDirection`].
pub(crate) fn require_direction<A: Agent + ?Sized>(agent: &A) -> Result<&[f64], NeighborError> {
    match agent.direction() {
        Some(direction) if !direction.is_empty() => Ok(direction),
        _ => Err(NeighborError::MissingDirection),
    }
}

/// Candidate position, with a missing one read as zero components.
///
/// Candidates are not validated up front; a missing position surfaces as a
/// dimension mismatch when the candidate is evaluated.
pub(crate) fn candidate_position<N: Agent + ?Sized>(candidate: &N) -> &[f64] {
    candidate.position().unwrap_or(&[])
}

/// Loosely typed agent record as handed over by the host simulation.
///
/// `position` and `direction` are the only fields this crate reads; every
/// other key lands in `fields` and round-trips untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AgentState {
    /// Position coordinates.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub position: Option<Vec<f64>>,
    /// Facing vector.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direction: Option<Vec<f64>>,
    /// Host-owned fields opaque to the neighbor queries.
    #[serde(flatten)]
    pub fields: BTreeMap<String, Value>,
}

impl AgentState {
    /// Creates an agent with no position, direction, or extra fields.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an agent at `position`.
    pub fn at(position: impl Into<Vec<f64>>) -> Self {
        Self {
            position: Some(position.into()),
            ..Self::default()
        }
    }

    /// Sets the facing direction.
    pub fn with_direction(mut self, direction: impl Into<Vec<f64>>) -> Self {
        self.direction = Some(direction.into());
        self
    }

    /// Stores an opaque host field.
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Looks up an opaque host field.
    pub fn field(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }
}

impl Agent for AgentState {
    fn position(&self) -> Option<&[f64]> {
        self.position.as_deref()
    }

    fn direction(&self) -> Option<&[f64]> {
        self.direction.as_deref()
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn empty_position_counts_as_missing() {
        let agent = AgentState::at(Vec::<f64>::new());
        assert_eq!(require_position(&agent), Err(NeighborError::MissingPosition));
        assert_eq!(
            require_position(&AgentState::new()),
            Err(NeighborError::MissingPosition)
        );
    }

    #[test]
    fn zero_direction_is_present() {
        let agent = AgentState::at([1.0, 2.0, 3.0]).with_direction([0.0, 0.0, 0.0]);
        assert_eq!(require_direction(&agent), Ok(&[0.0, 0.0, 0.0][..]));
    }

    #[test]
    fn empty_direction_counts_as_missing() {
        let agent = AgentState::at([0.0; 3]).with_direction(Vec::<f64>::new());
        assert_eq!(require_direction(&agent), Err(NeighborError::MissingDirection));
        assert_eq!(
            require_direction(&AgentState::at([0.0; 3])),
            Err(NeighborError::MissingDirection)
        );
    }

    #[test]
    fn smart_pointers_forward_fields() {
        let agent = Arc::new(AgentState::at([4.0, 5.0]));
        let boxed: Box<dyn Agent> = Box::new(AgentState::at([6.0, 7.0]));
        assert_eq!(agent.position(), Some(&[4.0, 5.0][..]));
        assert_eq!(boxed.position(), Some(&[6.0, 7.0][..]));
        assert_eq!(candidate_position(&AgentState::new()), &[] as &[f64]);
    }

    #[test]
    fn opaque_fields_round_trip() {
        let agent = AgentState::at([1.0, 1.0])
            .with_direction([0.0, 1.0, 0.0])
            .with_field("behavior", "flock")
            .with_field("age", 3);
        let text = serde_json::to_string(&agent).unwrap();
        let back: AgentState = serde_json::from_str(&text).unwrap();
        assert_eq!(back, agent);
        assert_eq!(back.field("behavior"), Some(&Value::from("flock")));
    }

    #[test]
    fn missing_keys_deserialize_as_none() {
        let agent: AgentState = serde_json::from_str(r#"{"name": "a"}"#).unwrap();
        assert!(agent.position.is_none());
        assert!(agent.direction.is_none());
        assert_eq!(agent.field("name"), Some(&Value::from("a")));
    }
}
