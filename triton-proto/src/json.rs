//! Serde helpers for the JSON projection of protobuf byte fields.
//!
//! Raw tensor bytes are emitted as standard base64 strings.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::ser::SerializeSeq;
use serde::Serializer;

pub(crate) fn base64_seq<S>(items: &[Vec<u8>], serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    let mut seq = serializer.serialize_seq(Some(items.len()))?;
    for item in items {
        seq.serialize_element(&STANDARD.encode(item))?;
    }
    seq.end()
}
