//! Envelope wire codec.
//!
//! An envelope travels as compact JSON
//! (`{"tee_num":1,"tee_content":[{"attester":..,"attestee":..,"score":..}]}`)
//! that is percent-encoded with query-string escaping so it can sit inside
//! another JSON document as a single string value.

use percent_encoding::{percent_decode_str, utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use serde::{Deserialize, Deserializer, Serialize};

use crate::config::DecodeConfig;
use crate::error::{CoreError, DecodeError};
use crate::types::AttestationEdge;

/// Bytes left unescaped by query escaping: ASCII alphanumerics and `-_.~`.
const QUERY: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'~');

/// A batch of attestation edges published as one ledger record.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Envelope {
    /// Producer-declared edge count. Advisory only.
    #[serde(rename = "tee_num", default)]
    pub count: i64,
    #[serde(rename = "tee_content", default, deserialize_with = "null_as_empty")]
    pub edges: Vec<AttestationEdge>,
}

impl Envelope {
    /// Envelope carrying a single edge, as produced by a new attestation.
    pub fn single(edge: AttestationEdge) -> Self {
        Self {
            count: 1,
            edges: vec![edge],
        }
    }

    fn validate_scores(&self) -> Result<(), DecodeError> {
        for (index, edge) in self.edges.iter().enumerate() {
            if !edge.weight.is_finite() || edge.weight < 0.0 || edge.weight.fract() != 0.0 {
                return Err(DecodeError::InvalidScore {
                    index,
                    score: edge.weight,
                });
            }
        }
        Ok(())
    }

    fn count_matches(&self) -> bool {
        usize::try_from(self.count).is_ok_and(|c| c == self.edges.len())
    }
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<AttestationEdge>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<AttestationEdge>>::deserialize(deserializer)?.unwrap_or_default())
}

/// How a batch reacts to a record that fails to decode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DecodePolicy {
    /// Abort the whole batch on the first failure.
    #[default]
    FailFast,
    /// Drop failing records and count them.
    SkipInvalid,
}

/// Envelopes decoded from one period's records.
#[derive(Debug, Clone, Default)]
pub struct DecodedBatch {
    pub envelopes: Vec<Envelope>,
    /// Records dropped under [`DecodePolicy::SkipInvalid`].
    pub skipped: usize,
}

impl DecodedBatch {
    /// All edges in record order, then in-record order.
    pub fn edges(&self) -> impl Iterator<Item = &AttestationEdge> + '_ {
        self.envelopes.iter().flat_map(|e| e.edges.iter())
    }

    pub fn edge_count(&self) -> usize {
        self.envelopes.iter().map(|e| e.edges.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.edge_count() == 0
    }
}

/// Percent-encode text with query escaping (space becomes `+`).
pub fn percent_encode(text: &str) -> String {
    utf8_percent_encode(text, QUERY)
        .to_string()
        .replace("%20", "+")
}

/// Reverse of [`percent_encode`]. Every `%` must introduce two hex digits.
pub fn percent_decode(raw: &str) -> Result<String, DecodeError> {
    let bytes = raw.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let valid = bytes
                .get(i + 1..i + 3)
                .is_some_and(|pair| pair.iter().all(u8::is_ascii_hexdigit));
            if !valid {
                return Err(DecodeError::MalformedEscape { position: i });
            }
            i += 3;
        } else {
            i += 1;
        }
    }

    let plus_as_space = raw.replace('+', " ");
    percent_decode_str(&plus_as_space)
        .decode_utf8()
        .map(|text| text.into_owned())
        .map_err(|_| DecodeError::InvalidUtf8)
}

/// Serialize an envelope to its percent-encoded wire form.
pub fn encode_envelope(envelope: &Envelope) -> Result<String, CoreError> {
    let json = serde_json::to_string(envelope)?;
    Ok(percent_encode(&json))
}

/// Decode one percent-encoded record into an envelope.
pub fn decode_envelope(raw: &str) -> Result<Envelope, DecodeError> {
    let text = percent_decode(raw)?;
    let envelope: Envelope = serde_json::from_str(&text)?;
    envelope.validate_scores()?;
    Ok(envelope)
}

/// Decode every record of a period.
///
/// Under [`DecodePolicy::FailFast`] the first failing record aborts the
/// batch and its index is reported.
pub fn decode_batch<S: AsRef<str>>(
    raws: &[S],
    config: &DecodeConfig,
) -> Result<DecodedBatch, CoreError> {
    let mut batch = DecodedBatch::default();

    for (index, raw) in raws.iter().enumerate() {
        let decoded = decode_envelope(raw.as_ref()).and_then(|envelope| {
            if envelope.count_matches() {
                return Ok(envelope);
            }
            if config.strict_count {
                return Err(DecodeError::CountMismatch {
                    declared: envelope.count,
                    actual: envelope.edges.len(),
                });
            }
            tracing::warn!(
                index,
                declared = envelope.count,
                actual = envelope.edges.len(),
                "envelope edge count mismatch"
            );
            Ok(envelope)
        });

        match (decoded, config.policy) {
            (Ok(envelope), _) => batch.envelopes.push(envelope),
            (Err(e), DecodePolicy::FailFast) => return Err(CoreError::decode(index, e)),
            (Err(e), DecodePolicy::SkipInvalid) => {
                tracing::warn!(index, error = %e, "skipping undecodable record");
                batch.skipped += 1;
            }
        }
    }

    tracing::debug!(
        records = raws.len(),
        edges = batch.edge_count(),
        skipped = batch.skipped,
        "decoded batch"
    );
    Ok(batch)
}
