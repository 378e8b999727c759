use super::{PayloadMap, PayloadValue, sanitize::sanitize_payload};
use crate::errors::payload::{PayloadError, PayloadResult};
use ciborium::value::Value;

/// Decodes envelope payload bytes into a text keyed map.
///
/// An empty payload, undecodable bytes or a top level value that is not a map are all
/// rejections. Bytes following the first complete CBOR item are ignored.
pub fn decode_payload(bytes: &[u8]) -> PayloadResult<PayloadMap> {
    if bytes.is_empty() {
        return Err(PayloadError::Empty);
    }
    let value: Value = ciborium::from_reader(bytes).map_err(|err| PayloadError::Decode(format!("{err:?}")))?;
    if !value.is_map() {
        return Err(PayloadError::NotAMap);
    }
    match PayloadValue::try_from(value)? {
        PayloadValue::Map(map) => Ok(map),
        _ => Err(PayloadError::NotAMap),
    }
}

/// [`decode_payload`] followed by [`sanitize_payload`]
pub fn decode_sanitized_payload(bytes: &[u8]) -> PayloadResult<PayloadMap> {
    let payload = decode_payload(bytes)?;
    sanitize_payload(&payload)?;
    Ok(payload)
}
