use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

use crate::error::CoreError;

/// Opaque handle of an attester or attestee, usually a ledger address.
///
/// No structural validation is performed; two identities are equal when
/// their strings are byte-identical.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Identity(pub String);

impl Identity {
    pub fn new(handle: impl Into<String>) -> Self {
        Self(handle.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Identity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Identity {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for Identity {
    fn from(s: String) -> Self {
        Self(s)
    }
}

/// A directed, weighted trust assertion from `attester` to `attestee`.
///
/// Serialized with the field names used on the ledger (`score` carries
/// the weight). Integral weights are written without a fractional part so
/// existing producers see the same bytes they emit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AttestationEdge {
    pub attester: Identity,
    pub attestee: Identity,
    #[serde(rename = "score", serialize_with = "serialize_score")]
    pub weight: f64,
}

/// Largest integer an `f64` represents exactly.
const MAX_EXACT_INT: f64 = 9_007_199_254_740_992.0;

fn serialize_score<S>(score: &f64, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    if score.fract() == 0.0 && score.abs() <= MAX_EXACT_INT {
        serializer.serialize_i64(*score as i64)
    } else {
        serializer.serialize_f64(*score)
    }
}

impl AttestationEdge {
    pub fn new(attester: impl Into<Identity>, attestee: impl Into<Identity>, weight: f64) -> Self {
        Self {
            attester: attester.into(),
            attestee: attestee.into(),
            weight,
        }
    }

    /// Build an edge from a user-supplied weight string.
    ///
    /// The weight must parse as a non-negative base-10 integer.
    pub fn from_raw(
        attester: impl Into<Identity>,
        attestee: impl Into<Identity>,
        raw_weight: &str,
    ) -> Result<Self, CoreError> {
        let weight = raw_weight
            .parse::<u64>()
            .map_err(|e| CoreError::InvalidWeight {
                raw: raw_weight.to_string(),
                reason: e.to_string(),
            })?;
        Ok(Self::new(attester, attestee, weight as f64))
    }
}

/// One identity and its converged reputation score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedIdentity {
    pub identity: Identity,
    pub score: f64,
}

impl RankedIdentity {
    pub fn new(identity: Identity, score: f64) -> Self {
        Self { identity, score }
    }
}

impl fmt::Display for RankedIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:.6}", self.identity, self.score)
    }
}
