use super::{PayloadMap, PayloadValue};
use crate::errors::payload::{PayloadError, PayloadResult};

/// The payload fields whose content is restricted, and whether each may hold byte strings
pub const SANITIZED_FIELDS: [(&str, bool); 4] = [("meta", false), ("args", false), ("ctx", false), ("init", true)];

/// Checks that each of `meta`, `args`, `ctx` and `init` is either absent or a map whose values
/// (recursively, through nested maps and sequences) are integers, floats, booleans, text,
/// sequences or maps. Byte strings are additionally allowed under `init`.
///
/// Any offending value anywhere rejects the whole payload.
pub fn sanitize_payload(payload: &PayloadMap) -> PayloadResult<()> {
    for (field, allow_bytes) in SANITIZED_FIELDS {
        match payload.get(field) {
            None => {}
            Some(PayloadValue::Map(map)) => {
                let mut path = Vec::new();
                check_map(field, map, allow_bytes, &mut path)?;
            }
            Some(_) => return Err(PayloadError::FieldNotAMap(field)),
        }
    }
    Ok(())
}

fn check_map(field: &'static str, map: &PayloadMap, allow_bytes: bool, path: &mut Vec<String>) -> PayloadResult<()> {
    for (key, value) in map {
        path.push(key.clone());
        check_value(field, value, allow_bytes, path)?;
        path.pop();
    }
    Ok(())
}

fn check_value(field: &'static str, value: &PayloadValue, allow_bytes: bool, path: &mut Vec<String>) -> PayloadResult<()> {
    match value {
        PayloadValue::Bool(_) | PayloadValue::Integer(_) | PayloadValue::Float(_) | PayloadValue::Text(_) => Ok(()),
        PayloadValue::Bytes(_) if allow_bytes => Ok(()),
        PayloadValue::Map(map) => check_map(field, map, allow_bytes, path),
        PayloadValue::Sequence(items) => {
            for (i, item) in items.iter().enumerate() {
                path.push(i.to_string());
                check_value(field, item, allow_bytes, path)?;
                path.pop();
            }
            Ok(())
        }
        PayloadValue::Bytes(_) | PayloadValue::Null | PayloadValue::Tagged(..) => {
            Err(PayloadError::BannedValue { field, kind: value.kind(), path: path.join(".") })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payload_map;

    #[test]
    fn test_allowed_payloads() {
        assert!(sanitize_payload(&PayloadMap::new()).is_ok());
        let payload = payload_map! {
            "args" => payload_map! {
                "i" => 1u64,
                "f" => 1.5,
                "b" => true,
                "t" => "text",
                "s" => vec![PayloadValue::from(1u64), payload_map! {"x" => "y"}.into()],
            },
            "meta" => PayloadMap::new(),
            "init" => payload_map! {"image.png" => payload_map! {"$b" => PayloadValue::Bytes(vec![0x89, 0x50])}},
            // Fields outside the sanitized set are not inspected
            "other" => PayloadValue::Bytes(vec![1]),
        };
        assert!(sanitize_payload(&payload).is_ok());
    }

    #[test]
    fn test_banned_values() {
        let cases = [
            (payload_map! {"args" => payload_map! {"x" => PayloadValue::Bytes(vec![])}}, "args", "bytes", "x"),
            (payload_map! {"meta" => payload_map! {"a" => payload_map! {"b" => PayloadValue::Null}}}, "meta", "null", "a.b"),
            (
                payload_map! {"ctx" => payload_map! {"list" => vec![PayloadValue::from(1u64), PayloadValue::Bytes(vec![2])]}},
                "ctx",
                "bytes",
                "list.1",
            ),
            (
                payload_map! {"init" => payload_map! {"t" => PayloadValue::Tagged(1, Box::new(PayloadValue::from(0u64)))}},
                "init",
                "tagged",
                "t",
            ),
        ];
        for (payload, field, kind, path) in cases {
            assert_eq!(sanitize_payload(&payload), Err(PayloadError::BannedValue { field, kind, path: path.to_owned() }));
        }
    }

    #[test]
    fn test_field_not_a_map() {
        assert_eq!(sanitize_payload(&payload_map! {"args" => "abc"}), Err(PayloadError::FieldNotAMap("args")));
        assert_eq!(sanitize_payload(&payload_map! {"init" => PayloadValue::Null}), Err(PayloadError::FieldNotAMap("init")));
    }
}
