use std::borrow::Cow;

use derive_more::Display;
use serde_json::{Map, Value};

/// String-keyed JSON object; iteration follows insertion order.
pub type Mapping = Map<String, Value>;

/// A query parameter whose value has no flat string form.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display(fmt = "query parameter `{}` cannot be encoded: {} values have no string form", key, kind)]
pub struct EncodingError {
    pub key: String,
    pub kind: &'static str,
}

impl std::error::Error for EncodingError {}

/// `startDate` -> `start_date`. Acronyms stay together (`userID` -> `user_id`).
pub fn snake_case_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    let mut out = String::with_capacity(key.len() + 4);

    for (i, &c) in chars.iter().enumerate() {
        if !c.is_uppercase() {
            out.push(c);
            continue;
        }

        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        let boundary = match prev {
            None | Some('_') => false,
            Some(p) if p.is_lowercase() || p.is_ascii_digit() => true,
            Some(p) if p.is_uppercase() => next.is_some_and(char::is_lowercase),
            Some(_) => false,
        };

        if boundary {
            out.push('_');
        }
        out.extend(c.to_lowercase());
    }

    out
}

/// `leave_type` -> `leaveType`. Keys without an underscore are returned as-is.
pub fn camel_case_key(key: &str) -> String {
    if !key.contains('_') {
        return key.to_string();
    }

    let mut segments = key.split('_').filter(|s| !s.is_empty());
    let mut out = String::with_capacity(key.len());

    if let Some(head) = segments.next() {
        out.push_str(&head.to_lowercase());
    }
    for segment in segments {
        let mut chars = segment.chars();
        if let Some(first) = chars.next() {
            out.extend(first.to_uppercase());
            out.push_str(&chars.as_str().to_lowercase());
        }
    }

    out
}

/// Renames top-level keys to snake_case for outbound payloads. Values are
/// copied untouched, nested objects included.
pub fn to_snake_case(mapping: &Mapping) -> Mapping {
    mapping
        .iter()
        .map(|(key, value)| (snake_case_key(key), value.clone()))
        .collect()
}

/// Renames keys to camelCase, descending into nested objects.
///
/// Arrays are copied as they are, objects inside them keep their wire keys.
pub fn to_camel_case(mapping: &Mapping) -> Mapping {
    mapping
        .iter()
        .map(|(key, value)| {
            let value = match value {
                Value::Object(inner) => Value::Object(to_camel_case(inner)),
                other => other.clone(),
            };
            (camel_case_key(key), value)
        })
        .collect()
}

/// Builds `key=value&...` with snake_case keys, in the mapping's order.
pub fn to_query_string(mapping: &Mapping) -> Result<String, EncodingError> {
    let mut pairs = Vec::with_capacity(mapping.len());

    for (key, value) in mapping {
        let text = query_value(key, value)?;
        pairs.push(format!(
            "{}={}",
            urlencoding::encode(&snake_case_key(key)),
            urlencoding::encode(&text)
        ));
    }

    Ok(pairs.join("&"))
}

fn query_value<'a>(key: &str, value: &'a Value) -> Result<Cow<'a, str>, EncodingError> {
    let kind = match value {
        Value::String(s) => return Ok(Cow::Borrowed(s)),
        Value::Number(n) => return Ok(Cow::Owned(n.to_string())),
        Value::Bool(b) => return Ok(Cow::Owned(b.to_string())),
        Value::Null => "null",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };

    Err(EncodingError {
        key: key.to_string(),
        kind,
    })
}
