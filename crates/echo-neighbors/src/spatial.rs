// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Distance metrics and the small amount of 3D vector math the orientation
//! queries share.
//!
//! Metrics accept coordinate slices of any (equal) length. Vector helpers
//! work on fixed `[f64; 3]` arrays; [`displacement3`] is the bridge between
//! the two and the only place a slice is narrowed to three components.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::NeighborError;

fn check_same_len(a: &[f64], b: &[f64]) -> Result<(), NeighborError> {
    if a.len() == b.len() {
        Ok(())
    } else {
        Err(NeighborError::DimensionMismatch {
            expected: a.len(),
            found: b.len(),
        })
    }
}

/// Sum of absolute component differences.
pub fn manhattan_distance(a: &[f64], b: &[f64]) -> Result<f64, NeighborError> {
    check_same_len(a, b)?;
    Ok(a.iter().zip(b).map(|(x, y)| (x - y).abs()).sum())
}

/// Straight-line distance.
pub fn euclidean_distance(a: &[f64], b: &[f64]) -> Result<f64, NeighborError> {
    euclidean_squared_distance(a, b).map(f64::sqrt)
}

/// Sum of squared component differences; skips the square root.
pub fn euclidean_squared_distance(a: &[f64], b: &[f64]) -> Result<f64, NeighborError> {
    check_same_len(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| {
            let d = x - y;
            d * d
        })
        .sum())
}

/// Largest absolute component difference.
pub fn chebyshev_distance(a: &[f64], b: &[f64]) -> Result<f64, NeighborError> {
    check_same_len(a, b)?;
    Ok(a.iter()
        .zip(b)
        .map(|(x, y)| (x - y).abs())
        .fold(0.0, f64::max))
}

/// Closed set of metrics a radius query can measure with.
///
/// Parsed from and serialized as `manhattan`, `euclidean`,
/// `euclidean_squared`, or `chebyshev`. Deserialization goes through
/// [`FromStr`], so an unknown name in a document reports
/// [`NeighborError::UnknownDistanceFunction`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DistanceFunction {
    /// See [`manhattan_distance`].
    Manhattan,
    /// See [`euclidean_distance`].
    #[default]
    Euclidean,
    /// See [`euclidean_squared_distance`].
    EuclideanSquared,
    /// See [`chebyshev_distance`].
    Chebyshev,
}

impl DistanceFunction {
    /// Every metric, in declaration order.
    pub const ALL: [Self; 4] = [
        Self::Manhattan,
        Self::Euclidean,
        Self::EuclideanSquared,
        Self::Chebyshev,
    ];

    /// Canonical lowercase name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Manhattan => "manhattan",
            Self::Euclidean => "euclidean",
            Self::EuclideanSquared => "euclidean_squared",
            Self::Chebyshev => "chebyshev",
        }
    }

    /// Measures the distance between `a` and `b` with this metric.
    pub fn distance(self, a: &[f64], b: &[f64]) -> Result<f64, NeighborError> {
        match self {
            Self::Manhattan => manhattan_distance(a, b),
            Self::Euclidean => euclidean_distance(a, b),
            Self::EuclideanSquared => euclidean_squared_distance(a, b),
            Self::Chebyshev => chebyshev_distance(a, b),
        }
    }
}

impl fmt::Display for DistanceFunction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for DistanceFunction {
    type Err = NeighborError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|metric| metric.name() == s)
            .ok_or_else(|| NeighborError::UnknownDistanceFunction(s.to_owned()))
    }
}

impl TryFrom<String> for DistanceFunction {
    type Error = NeighborError;

    fn try_from(name: String) -> Result<Self, Self::Error> {
        name.parse()
    }
}

/// `to - from` over the first three components.
///
/// Extra components are ignored; fewer than three is a
/// [`NeighborError::DimensionMismatch`].
pub fn displacement3(from: &[f64], to: &[f64]) -> Result<[f64; 3], NeighborError> {
    let [fx, fy, fz] = first3(from)?;
    let [tx, ty, tz] = first3(to)?;
    Ok([tx - fx, ty - fy, tz - fz])
}

/// Dot product.
pub fn dot3(a: [f64; 3], b: [f64; 3]) -> f64 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

/// Cross product `a × b`.
pub fn cross3(a: [f64; 3], b: [f64; 3]) -> [f64; 3] {
    [
        a[1] * b[2] - a[2] * b[1],
        a[2] * b[0] - a[0] * b[2],
        a[0] * b[1] - a[1] * b[0],
    ]
}

fn first3(v: &[f64]) -> Result<[f64; 3], NeighborError> {
    match v {
        [x, y, z, ..] => Ok([*x, *y, *z]),
        _ => Err(NeighborError::DimensionMismatch {
            expected: 3,
            found: v.len(),
        }),
    }
}

/// Narrows a facing vector to exactly three components.
pub(crate) fn exact3(v: &[f64]) -> Result<[f64; 3], NeighborError> {
    match v {
        [x, y, z] => Ok([*x, *y, *z]),
        _ => Err(NeighborError::DimensionMismatch {
            expected: 3,
            found: v.len(),
        }),
    }
}

#[cfg(test)]
#[allow(clippy::expect_used, clippy::unwrap_used)]
mod tests {
    use super::*;

    const A: [f64; 3] = [1.0, -2.0, 3.0];
    const B: [f64; 3] = [4.0, 2.0, 3.0];

    #[test]
    fn metrics_on_known_pair() {
        assert_eq!(manhattan_distance(&A, &B), Ok(7.0));
        assert_eq!(euclidean_squared_distance(&A, &B), Ok(25.0));
        assert_eq!(euclidean_distance(&A, &B), Ok(5.0));
        assert_eq!(chebyshev_distance(&A, &B), Ok(4.0));
    }

    #[test]
    fn metrics_reject_unequal_lengths() {
        let err = NeighborError::DimensionMismatch {
            expected: 3,
            found: 2,
        };
        for metric in DistanceFunction::ALL {
            assert_eq!(metric.distance(&A, &[0.0, 0.0]), Err(err.clone()), "{metric}");
        }
    }

    #[test]
    fn metrics_of_empty_vectors_are_zero() {
        for metric in DistanceFunction::ALL {
            assert_eq!(metric.distance(&[], &[]), Ok(0.0));
        }
    }

    #[test]
    fn names_parse_back() {
        for metric in DistanceFunction::ALL {
            assert_eq!(metric.to_string().parse::<DistanceFunction>(), Ok(metric));
        }
        assert_eq!(
            "taxicab".parse::<DistanceFunction>(),
            Err(NeighborError::UnknownDistanceFunction("taxicab".into()))
        );
        assert_eq!(DistanceFunction::default(), DistanceFunction::Euclidean);
    }

    #[test]
    fn documents_use_the_same_names() {
        for metric in DistanceFunction::ALL {
            let text = serde_json::to_string(&metric).unwrap();
            assert_eq!(text, format!("\"{metric}\""));
            assert_eq!(serde_json::from_str::<DistanceFunction>(&text).unwrap(), metric);
        }
        let err = serde_json::from_str::<DistanceFunction>("\"taxicab\"").unwrap_err();
        assert!(
            err.to_string()
                .starts_with("unknown distance function: \"taxicab\""),
            "{err}"
        );
    }

    #[test]
    fn displacement_ignores_extra_components() {
        assert_eq!(
            displacement3(&[1.0, 1.0, 1.0, 9.0], &[2.0, 0.0, 1.0]),
            Ok([1.0, -1.0, 0.0])
        );
        assert_eq!(
            displacement3(&[0.0, 0.0], &[1.0, 1.0, 1.0]),
            Err(NeighborError::DimensionMismatch {
                expected: 3,
                found: 2
            })
        );
    }

    #[test]
    fn cross_of_parallel_vectors_is_zero() {
        assert_eq!(cross3([2.0, 0.0, 0.0], [1.0, 0.0, 0.0]), [0.0, 0.0, 0.0]);
        assert_eq!(cross3([1.0, 0.0, 0.0], [0.0, 1.0, 0.0]), [0.0, 0.0, 1.0]);
        assert!((dot3(A, B) - 9.0).abs() < f64::EPSILON);
    }

    #[test]
    fn exact3_rejects_four_components() {
        assert!(exact3(&[1.0, 0.0, 0.0]).is_ok());
        assert_eq!(
            exact3(&[1.0, 0.0, 0.0, 0.0]),
            Err(NeighborError::DimensionMismatch {
                expected: 3,
                found: 4
            })
        );
    }
}
