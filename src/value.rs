use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, de};

/// Object entries keep file order; edits must not reshuffle keys the device
/// firmware wrote.
pub type CfgObject = IndexMap<String, CfgValue>;

/// Represents a number that preserves the distinction between I64, U64, and F64.
/// Entry values are compared structurally, so `1` and `1.0` must stay distinct.
#[derive(Debug, Clone, PartialEq)]
pub enum CfgNumber {
    I64(i64),
    U64(u64),
    F64(f64),
}

/// Represents a structured entry value from the config store (strict JSON).
/// The device only accepts object-rooted entries, so the parse entry point is
/// [`parse_object`]; rendering goes through [`to_pretty`] and [`to_compact`].
#[derive(Debug, Clone, PartialEq)]
pub enum CfgValue {
    Null,
    Bool(bool),
    Number(CfgNumber),
    String(String),
    Array(Vec<CfgValue>),
    Object(CfgObject),
}

/// Failure modes of [`parse_object`].
#[derive(Debug, thiserror::Error)]
pub enum ParseError {
    #[error("top-level value must be a JSON object, got {found}")]
    NotAnObject { found: &'static str },
    #[error("invalid JSON: {0}")]
    Syntax(#[from] serde_json::Error),
}

impl CfgValue {
    pub fn empty_object() -> CfgValue {
        CfgValue::Object(CfgObject::new())
    }

    pub fn as_object(&self) -> Option<&CfgObject> {
        match self {
            CfgValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_object_mut(&mut self) -> Option<&mut CfgObject> {
        match self {
            CfgValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            CfgValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn get(&self, key: &str) -> Option<&CfgValue> {
        self.as_object().and_then(|m| m.get(key))
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            CfgValue::Null => "null",
            CfgValue::Bool(_) => "bool",
            CfgValue::Number(_) => "number",
            CfgValue::String(_) => "string",
            CfgValue::Array(_) => "array",
            CfgValue::Object(_) => "object",
        }
    }

    fn write(&self, out: &mut String, indent: usize, pretty: bool) {
        match self {
            CfgValue::Null => out.push_str("null"),
            CfgValue::Bool(v) => out.push_str(if *v { "true" } else { "false" }),
            CfgValue::Number(n) => n.write(out),
            CfgValue::String(s) => write_escaped_string(out, s),
            CfgValue::Array(values) => {
                out.push('[');
                if !values.is_empty() {
                    for (i, v) in values.iter().enumerate() {
                        if i > 0 {
                            out.push(',');
                        }
                        if pretty {
                            out.push('\n');
                            out.push_str(&" ".repeat(indent + 4));
                        }
                        v.write(out, indent + 4, pretty);
                    }
                    if pretty {
                        out.push('\n');
                        out.push_str(&" ".repeat(indent));
                    }
                }
                out.push(']');
            }
            CfgValue::Object(map) => write_object_inner(map, out, indent, pretty),
        }
    }
}

impl CfgNumber {
    fn write(&self, out: &mut String) {
        match self {
            CfgNumber::I64(v) => out.push_str(&v.to_string()),
            CfgNumber::U64(v) => out.push_str(&v.to_string()),
            CfgNumber::F64(v) => {
                if v.is_finite() {
                    let mut buf = ryu::Buffer::new();
                    out.push_str(buf.format(*v));
                } else {
                    // Strict JSON has no NaN/Infinity; the parser never
                    // produces them, so this only guards built values.
                    out.push_str("null");
                }
            }
        }
    }
}

/// Parse strict JSON whose top-level value must be an object.
/// Anything else (including valid arrays or scalars) is rejected.
pub fn parse_object(text: &str) -> Result<CfgObject, ParseError> {
    let value: CfgValue = serde_json::from_str(text)?;
    match value {
        CfgValue::Object(map) => Ok(map),
        other => Err(ParseError::NotAnObject {
            found: other.type_name(),
        }),
    }
}

/// Render with 4-space indentation, `": "` after keys, and empty containers
/// kept inline. No trailing newline.
pub fn to_pretty(map: &CfgObject) -> String {
    let mut out = String::new();
    write_object_inner(map, &mut out, 0, true);
    out
}

/// Render with no whitespace at all. This is the canonical on-store form.
pub fn to_compact(map: &CfgObject) -> String {
    let mut out = String::new();
    write_object_inner(map, &mut out, 0, false);
    out
}

fn write_object_inner(map: &CfgObject, out: &mut String, indent: usize, pretty: bool) {
    out.push('{');
    if !map.is_empty() {
        for (i, (k, v)) in map.iter().enumerate() {
            if i > 0 {
                out.push(',');
            }
            if pretty {
                out.push('\n');
                out.push_str(&" ".repeat(indent + 4));
            }
            write_escaped_string(out, k);
            out.push(':');
            if pretty {
                out.push(' ');
            }
            v.write(out, indent + 4, pretty);
        }
        if pretty {
            out.push('\n');
            out.push_str(&" ".repeat(indent));
        }
    }
    out.push('}');
}

fn write_escaped_string(out: &mut String, s: &str) {
    out.push('"');
    for ch in s.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            c if c.is_control() => {
                use std::fmt::Write as _;
                write!(out, "\\u{:04x}", c as u32).ok();
            }
            // Non-ASCII stays raw; the store file is UTF-8 throughout.
            c => out.push(c),
        }
    }
    out.push('"');
}

impl<'de> Deserialize<'de> for CfgValue {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct ValueVisitor;

        impl<'de> de::Visitor<'de> for ValueVisitor {
            type Value = CfgValue;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a JSON value")
            }

            fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CfgValue::Null)
            }

            fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
                Ok(CfgValue::Null)
            }

            fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
                Ok(CfgValue::Bool(v))
            }

            fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
                Ok(CfgValue::Number(CfgNumber::I64(v)))
            }

            fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
                Ok(CfgValue::Number(CfgNumber::U64(v)))
            }

            fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
                Ok(CfgValue::Number(CfgNumber::F64(v)))
            }

            fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
                Ok(CfgValue::String(v.to_owned()))
            }

            fn visit_string<E: de::Error>(self, v: String) -> Result<Self::Value, E> {
                Ok(CfgValue::String(v))
            }

            fn visit_seq<A: de::SeqAccess<'de>>(self, mut seq: A) -> Result<Self::Value, A::Error> {
                let mut values = Vec::new();
                while let Some(value) = seq.next_element::<CfgValue>()? {
                    values.push(value);
                }
                Ok(CfgValue::Array(values))
            }

            fn visit_map<A: de::MapAccess<'de>>(self, mut map: A) -> Result<Self::Value, A::Error> {
                let mut values = CfgObject::new();
                while let Some((key, value)) = map.next_entry::<String, CfgValue>()? {
                    values.insert(key, value);
                }
                Ok(CfgValue::Object(values))
            }
        }

        deserializer.deserialize_any(ValueVisitor)
    }
}
