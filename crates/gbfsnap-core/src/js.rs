// Reads over serde_json::Value with the page script's property semantics.
// - `Prop::get` fails on null/undefined like a script TypeError (tier a reads).
// - Missing leaves are `undefined`, which serializes as null.
// - `values`/`keys` follow script object key order (index keys first).
use serde_json::{Map, Value};

use crate::error::ExtractError;

#[derive(Debug, Clone)]
pub struct Prop<'a> {
    value: Option<&'a Value>,
    path: String,
}

impl<'a> Prop<'a> {
    pub fn new(path: impl Into<String>, value: Option<&'a Value>) -> Self {
        Self {
            value,
            path: path.into(),
        }
    }

    pub fn raw(&self) -> Option<&'a Value> {
        self.value
    }

    pub fn path(&self) -> &str {
        &self.path
    }

    pub fn is_undefined(&self) -> bool {
        self.value.is_none()
    }

    /// `x == null`
    pub fn is_nullish(&self) -> bool {
        matches!(self.value, None | Some(Value::Null))
    }

    pub fn truthy(&self) -> bool {
        self.value.is_some_and(truthy)
    }

    /// `x.key`
    pub fn get(&self, key: &str) -> Result<Prop<'a>, ExtractError> {
        let child = match self.value {
            None | Some(Value::Null) => {
                return Err(ExtractError::Undefined {
                    path: self.path.clone(),
                    key: key.to_string(),
                });
            }
            Some(Value::Object(map)) => map.get(key),
            Some(Value::Array(items)) => key.parse::<usize>().ok().and_then(|i| items.get(i)),
            Some(_) => None,
        };
        Ok(Prop::new(format!("{}.{}", self.path, key), child))
    }

    /// `x.a.b.c`
    pub fn at(&self, keys: &[&str]) -> Result<Prop<'a>, ExtractError> {
        let mut cur = self.clone();
        for k in keys {
            cur = cur.get(k)?;
        }
        Ok(cur)
    }

    /// `x ? x.key : undefined`
    pub fn guarded(&self, key: &str) -> Prop<'a> {
        if self.truthy() {
            // truthy values are never null/undefined
            self.get(key).unwrap_or_else(|_| Prop::new(self.path.clone(), None))
        } else {
            Prop::new(format!("{}.{}", self.path, key), None)
        }
    }

    /// The value as it would land in a JSON array: `undefined` becomes null.
    pub fn to_value(&self) -> Value {
        self.value.cloned().unwrap_or(Value::Null)
    }

    /// `parseInt(x, 10)`; `None` stands for NaN.
    pub fn parse_int(&self) -> Option<i64> {
        self.value
            .and_then(to_js_string)
            .and_then(|s| parse_int_prefix(&s))
    }

    /// Receiver of a string method (`x.trim()`, `x.slice(..)`).
    pub fn as_str(&self) -> Result<&'a str, ExtractError> {
        match self.value {
            Some(Value::String(s)) => Ok(s.as_str()),
            None | Some(Value::Null) => Err(ExtractError::Undefined {
                path: self.path.clone(),
                key: "<string method>".to_string(),
            }),
            Some(_) => Err(ExtractError::NotAString {
                path: self.path.clone(),
            }),
        }
    }

    /// `x.length` for arrays; other values have no numeric length.
    pub fn length(&self) -> Result<Option<usize>, ExtractError> {
        match self.value {
            None | Some(Value::Null) => Err(ExtractError::Undefined {
                path: self.path.clone(),
                key: "length".to_string(),
            }),
            Some(Value::Array(items)) => Ok(Some(items.len())),
            Some(Value::String(s)) => Ok(Some(s.encode_utf16().count())),
            Some(_) => Ok(None),
        }
    }

    /// `Object.keys(x)` / the keys visited by `for (k in x)`.
    pub fn keys(&self) -> Result<Vec<String>, ExtractError> {
        Ok(self.entries()?.into_iter().map(|(k, _)| k).collect())
    }

    /// `Object.values(x)`
    pub fn values(&self) -> Result<Vec<Prop<'a>>, ExtractError> {
        Ok(self.entries()?.into_iter().map(|(_, v)| v).collect())
    }

    pub fn entries(&self) -> Result<Vec<(String, Prop<'a>)>, ExtractError> {
        match self.value {
            None | Some(Value::Null) => Err(ExtractError::NotEnumerable {
                path: self.path.clone(),
            }),
            Some(Value::Array(items)) => Ok(items
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    (
                        i.to_string(),
                        Prop::new(format!("{}[{}]", self.path, i), Some(v)),
                    )
                })
                .collect()),
            Some(Value::Object(map)) => Ok(ordered_entries(map)
                .into_iter()
                .map(|(k, v)| {
                    let path = format!("{}.{}", self.path, k);
                    (k.clone(), Prop::new(path, Some(v)))
                })
                .collect()),
            Some(_) => Ok(Vec::new()),
        }
    }
}

pub fn truthy(v: &Value) -> bool {
    match v {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(_) | Value::Object(_) => true,
    }
}

/// Integer-like keys ascend first, then the rest in insertion order.
fn ordered_entries(map: &Map<String, Value>) -> Vec<(&String, &Value)> {
    let mut index: Vec<(u32, &String, &Value)> = Vec::new();
    let mut named: Vec<(&String, &Value)> = Vec::new();
    for (k, v) in map {
        match array_index(k) {
            Some(i) => index.push((i, k, v)),
            None => named.push((k, v)),
        }
    }
    index.sort_by_key(|(i, _, _)| *i);
    index
        .into_iter()
        .map(|(_, k, v)| (k, v))
        .chain(named)
        .collect()
}

fn array_index(key: &str) -> Option<u32> {
    if key.is_empty() || (key.len() > 1 && key.starts_with('0')) {
        return None;
    }
    if !key.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    key.parse::<u32>().ok().filter(|i| *i != u32::MAX)
}

/// `String(x)`
pub fn to_js_string(v: &Value) -> Option<String> {
    Some(match v {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => s.clone(),
        Value::Array(items) => items
            .iter()
            .map(|it| match it {
                Value::Null => String::new(),
                other => to_js_string(other).unwrap_or_default(),
            })
            .collect::<Vec<_>>()
            .join(","),
        Value::Object(_) => "[object Object]".to_string(),
    })
}

pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (neg, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let end = rest
        .bytes()
        .position(|b| !b.is_ascii_digit())
        .unwrap_or(rest.len());
    if end == 0 {
        return None;
    }
    let n = rest[..end].parse::<i64>().ok()?;
    Some(if neg { -n } else { n })
}

/// `Number(s)` for the string side of a loose comparison.
fn string_to_number(s: &str) -> Option<f64> {
    let t = s.trim();
    if t.is_empty() {
        return Some(0.0);
    }
    match t {
        "Infinity" | "+Infinity" => return Some(f64::INFINITY),
        "-Infinity" => return Some(f64::NEG_INFINITY),
        _ => {}
    }
    if let Some(hex) = t.strip_prefix("0x").or_else(|| t.strip_prefix("0X")) {
        return u64::from_str_radix(hex, 16).ok().map(|n| n as f64);
    }
    if !t
        .bytes()
        .all(|b| b.is_ascii_digit() || matches!(b, b'.' | b'e' | b'E' | b'+' | b'-'))
    {
        return None;
    }
    t.parse::<f64>().ok()
}

/// `v == s` for a string right-hand side.
pub fn loose_eq_str(v: &Value, s: &str) -> bool {
    match v {
        Value::Null => false,
        Value::String(x) => x == s,
        Value::Number(n) => match (n.as_f64(), string_to_number(s)) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
        Value::Bool(b) => string_to_number(s) == Some(if *b { 1.0 } else { 0.0 }),
        Value::Array(_) | Value::Object(_) => to_js_string(v).as_deref() == Some(s),
    }
}
