//! [`CborItem`]: a generic, uninterpreted CBOR data item.

/// A single CBOR data item as it appears on the wire.
///
/// Integers keep the CBOR split between the unsigned (major type 0) and
/// negative (major type 1) forms, and floating-point items keep their
/// encoded width, so that consumers can decide how to interpret them.
#[derive(Debug, Clone, PartialEq)]
pub enum CborItem {
    /// Major type 0.
    UnsignedInt(u64),
    /// Major type 1, stored as `n` for the value `-1 - n`.
    NegativeInt(u64),
    /// Major type 2 (indefinite-length chunks are concatenated).
    ByteString(Vec<u8>),
    /// Major type 3 (indefinite-length chunks are concatenated).
    Utf8String(String),
    /// Major type 4.
    Array(Vec<CborItem>),
    /// Major type 5, with keys of any item type.
    Map(Vec<(CborItem, CborItem)>),
    /// Major type 6, any tag other than an epoch date.
    Tagged(u64, Box<CborItem>),
    /// Simple value other than the boolean, null and undefined ones.
    Simple(u8),
    Boolean(bool),
    Null,
    Undefined,
    /// IEEE-754 binary16, raw bits.
    Half(u16),
    Float(f32),
    Double(f64),
    /// Terminator of an indefinite-length container.
    Break,
    /// Tag 1 epoch-based date, in seconds.
    Date(f64),
}

impl CborItem {
    /// Builds the item for a signed integer, picking major type 0 or 1.
    pub fn integer(value: i64) -> Self {
        if value >= 0 {
            CborItem::UnsignedInt(value as u64)
        } else {
            CborItem::NegativeInt(!value as u64)
        }
    }

    /// Builds a text-keyed map from `(key, value)` pairs.
    pub fn text_map<K, I>(entries: I) -> Self
    where
        K: Into<String>,
        I: IntoIterator<Item = (K, CborItem)>,
    {
        CborItem::Map(
            entries
                .into_iter()
                .map(|(k, v)| (CborItem::Utf8String(k.into()), v))
                .collect(),
        )
    }

    /// Short human-readable name of the item kind, for diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            CborItem::UnsignedInt(_) => "unsigned integer",
            CborItem::NegativeInt(_) => "negative integer",
            CborItem::ByteString(_) => "byte string",
            CborItem::Utf8String(_) => "text string",
            CborItem::Array(_) => "array",
            CborItem::Map(_) => "map",
            CborItem::Tagged(_, _) => "tagged item",
            CborItem::Simple(_) => "simple value",
            CborItem::Boolean(_) => "boolean",
            CborItem::Null => "null",
            CborItem::Undefined => "undefined",
            CborItem::Half(_) => "half-precision float",
            CborItem::Float(_) => "single-precision float",
            CborItem::Double(_) => "double-precision float",
            CborItem::Break => "break",
            CborItem::Date(_) => "date",
        }
    }
}

impl From<i64> for CborItem {
    fn from(value: i64) -> Self {
        CborItem::integer(value)
    }
}

impl From<&str> for CborItem {
    fn from(value: &str) -> Self {
        CborItem::Utf8String(value.to_owned())
    }
}

impl From<String> for CborItem {
    fn from(value: String) -> Self {
        CborItem::Utf8String(value)
    }
}

impl From<Vec<u8>> for CborItem {
    fn from(value: Vec<u8>) -> Self {
        CborItem::ByteString(value)
    }
}

impl From<bool> for CborItem {
    fn from(value: bool) -> Self {
        CborItem::Boolean(value)
    }
}
