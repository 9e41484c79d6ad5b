//! [`SmoValue`]: the SMO tagged-union data model shared by every bridge and
//! by the encode/decode engines.

use std::fmt;

use indexmap::IndexMap;

/// String-keyed children of an [`SmoValue::Object`].
///
/// Insertion order is kept for stable output but ignored by equality.
pub type SmoMap = IndexMap<String, SmoValue>;

/// The four SMO symbols.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Symbol {
    True,
    False,
    Null,
    Undefined,
}

impl From<bool> for Symbol {
    fn from(b: bool) -> Self {
        if b {
            Symbol::True
        } else {
            Symbol::False
        }
    }
}

/// A Smart Message Object value.
///
/// Equality is structural: values of different variants never compare
/// equal, objects compare as maps, and floats follow IEEE-754 (`NaN` is not
/// equal to itself).
#[derive(Debug, Clone, PartialEq)]
pub enum SmoValue {
    Array(Vec<SmoValue>),
    Object(SmoMap),
    String(String),
    Bytes(Vec<u8>),
    Integer(i64),
    Float(f64),
    Symbol(Symbol),
}

/// Variant discriminant of an [`SmoValue`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SmoKind {
    Array,
    Object,
    String,
    Bytes,
    Integer,
    Float,
    Symbol,
}

impl SmoValue {
    pub const fn null() -> Self {
        SmoValue::Symbol(Symbol::Null)
    }

    pub const fn undefined() -> Self {
        SmoValue::Symbol(Symbol::Undefined)
    }

    pub fn kind(&self) -> SmoKind {
        match self {
            SmoValue::Array(_) => SmoKind::Array,
            SmoValue::Object(_) => SmoKind::Object,
            SmoValue::String(_) => SmoKind::String,
            SmoValue::Bytes(_) => SmoKind::Bytes,
            SmoValue::Integer(_) => SmoKind::Integer,
            SmoValue::Float(_) => SmoKind::Float,
            SmoValue::Symbol(_) => SmoKind::Symbol,
        }
    }

    /// Human-readable description of the variant, as used in type mismatch
    /// errors.
    pub fn description(&self) -> &'static str {
        match self {
            SmoValue::Array(_) => "an array",
            SmoValue::Object(_) => "an object",
            SmoValue::String(_) => "a string",
            SmoValue::Bytes(_) => "bytes",
            SmoValue::Integer(_) => "an integer",
            SmoValue::Float(_) => "a float",
            SmoValue::Symbol(Symbol::True | Symbol::False) => "a boolean",
            SmoValue::Symbol(Symbol::Null) => "null",
            SmoValue::Symbol(Symbol::Undefined) => "undefined",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, SmoValue::Symbol(Symbol::Null))
    }

    pub fn is_undefined(&self) -> bool {
        matches!(self, SmoValue::Symbol(Symbol::Undefined))
    }

    pub fn as_array(&self) -> Option<&Vec<SmoValue>> {
        match self {
            SmoValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&SmoMap> {
        match self {
            SmoValue::Object(map) => Some(map),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            SmoValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bytes(&self) -> Option<&[u8]> {
        match self {
            SmoValue::Bytes(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            SmoValue::Integer(i) => Some(*i),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            SmoValue::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            SmoValue::Symbol(Symbol::True) => Some(true),
            SmoValue::Symbol(Symbol::False) => Some(false),
            _ => None,
        }
    }

    /// Container nesting depth: zero for scalars, one for a flat array or
    /// object.
    pub fn depth(&self) -> usize {
        match self {
            SmoValue::Array(items) => 1 + items.iter().map(SmoValue::depth).max().unwrap_or(0),
            SmoValue::Object(map) => 1 + map.values().map(SmoValue::depth).max().unwrap_or(0),
            _ => 0,
        }
    }

    /// Number of direct children; zero for scalars.
    pub fn children_count(&self) -> usize {
        match self {
            SmoValue::Array(items) => items.len(),
            SmoValue::Object(map) => map.len(),
            _ => 0,
        }
    }

    /// Child of an object by field name.
    pub fn get(&self, key: &str) -> Option<&SmoValue> {
        self.as_object().and_then(|map| map.get(key))
    }

    /// Child of an array by position.
    pub fn get_index(&self, index: usize) -> Option<&SmoValue> {
        self.as_array().and_then(|items| items.get(index))
    }

    /// Looks up a descendant by a dotted path with optional array indices,
    /// e.g. `"device.sensors[1].name"`.
    ///
    /// A single leading `.` is accepted. Empty field names elsewhere,
    /// malformed indices, and steps through missing children return `None`.
    pub fn descendant(&self, path: &str) -> Option<&SmoValue> {
        let path = path.strip_prefix('.').unwrap_or(path);
        if path.is_empty() {
            return Some(self);
        }
        let mut current = self;
        for part in path.split('.') {
            let (name, mut indices) = match part.find('[') {
                Some(i) => (&part[..i], &part[i..]),
                None => (part, ""),
            };
            if name.is_empty() {
                // `[0]` is only valid as the very first step of the path.
                if !std::ptr::eq(current, self) || indices.is_empty() {
                    return None;
                }
            } else {
                current = current.get(name)?;
            }
            while !indices.is_empty() {
                let rest = indices.strip_prefix('[')?;
                let close = rest.find(']')?;
                let digits = &rest[..close];
                if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                    return None;
                }
                current = current.get_index(digits.parse().ok()?)?;
                indices = &rest[close + 1..];
            }
        }
        Some(current)
    }
}

impl From<Symbol> for SmoValue {
    fn from(s: Symbol) -> Self {
        SmoValue::Symbol(s)
    }
}

impl From<bool> for SmoValue {
    fn from(b: bool) -> Self {
        SmoValue::Symbol(b.into())
    }
}

impl From<i64> for SmoValue {
    fn from(i: i64) -> Self {
        SmoValue::Integer(i)
    }
}

impl From<i32> for SmoValue {
    fn from(i: i32) -> Self {
        SmoValue::Integer(i.into())
    }
}

impl From<u32> for SmoValue {
    fn from(i: u32) -> Self {
        SmoValue::Integer(i.into())
    }
}

impl From<f64> for SmoValue {
    fn from(f: f64) -> Self {
        SmoValue::Float(f)
    }
}

impl From<&str> for SmoValue {
    fn from(s: &str) -> Self {
        SmoValue::String(s.to_owned())
    }
}

impl From<String> for SmoValue {
    fn from(s: String) -> Self {
        SmoValue::String(s)
    }
}

impl From<Vec<u8>> for SmoValue {
    fn from(b: Vec<u8>) -> Self {
        SmoValue::Bytes(b)
    }
}

impl From<Vec<SmoValue>> for SmoValue {
    fn from(items: Vec<SmoValue>) -> Self {
        SmoValue::Array(items)
    }
}

impl From<SmoMap> for SmoValue {
    fn from(map: SmoMap) -> Self {
        SmoValue::Object(map)
    }
}

impl<T: Into<SmoValue>> From<Option<T>> for SmoValue {
    fn from(v: Option<T>) -> Self {
        v.map_or(SmoValue::null(), Into::into)
    }
}

impl<K: Into<String>> FromIterator<(K, SmoValue)> for SmoValue {
    fn from_iter<I: IntoIterator<Item = (K, SmoValue)>>(iter: I) -> Self {
        SmoValue::Object(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

impl FromIterator<SmoValue> for SmoValue {
    fn from_iter<I: IntoIterator<Item = SmoValue>>(iter: I) -> Self {
        SmoValue::Array(iter.into_iter().collect())
    }
}

impl fmt::Display for SmoValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SmoValue::Array(items) => {
                f.write_str("[")?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str("]")
            }
            SmoValue::Object(map) => {
                f.write_str("{")?;
                for (i, (key, value)) in map.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key:?}:{value}")?;
                }
                f.write_str("}")
            }
            SmoValue::String(s) => write!(f, "{s:?}"),
            SmoValue::Bytes(bytes) => {
                f.write_str("h'")?;
                for b in bytes {
                    write!(f, "{b:02x}")?;
                }
                f.write_str("'")
            }
            SmoValue::Integer(i) => write!(f, "{i}"),
            SmoValue::Float(x) => write!(f, "{x:?}"),
            SmoValue::Symbol(Symbol::True) => f.write_str("true"),
            SmoValue::Symbol(Symbol::False) => f.write_str("false"),
            SmoValue::Symbol(Symbol::Null) => f.write_str("null"),
            SmoValue::Symbol(Symbol::Undefined) => f.write_str("undefined"),
        }
    }
}
