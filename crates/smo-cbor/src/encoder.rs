//! `CborEncoder`: writes [`CborItem`]s as CBOR bytes.
//!
//! Lengths, integers and tags always use the shortest argument form.
//! Floating-point items keep the width they were declared with.

use ciborium_ll::simple;

use super::constants::*;
use crate::CborItem;

/// CBOR encoder writing into an owned, growable buffer.
pub struct CborEncoder {
    buf: Vec<u8>,
}

impl Default for CborEncoder {
    fn default() -> Self {
        Self::new()
    }
}

impl CborEncoder {
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Encodes a single item and returns the produced bytes, leaving the
    /// encoder empty for reuse.
    pub fn encode(&mut self, item: &CborItem) -> Vec<u8> {
        self.buf.clear();
        self.write_any(item);
        std::mem::take(&mut self.buf)
    }

    /// Bytes written so far.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_any(&mut self, item: &CborItem) {
        match item {
            CborItem::UnsignedInt(n) => self.write_header(MAJOR_UNSIGNED, *n),
            CborItem::NegativeInt(n) => self.write_header(MAJOR_NEGATIVE, *n),
            CborItem::ByteString(bytes) => self.write_bin(bytes),
            CborItem::Utf8String(s) => self.write_str(s),
            CborItem::Array(items) => {
                self.write_header(MAJOR_ARRAY, items.len() as u64);
                for item in items {
                    self.write_any(item);
                }
            }
            CborItem::Map(entries) => {
                self.write_header(MAJOR_MAP, entries.len() as u64);
                for (key, value) in entries {
                    self.write_any(key);
                    self.write_any(value);
                }
            }
            CborItem::Tagged(tag, value) => {
                self.write_header(MAJOR_TAG, *tag);
                self.write_any(value);
            }
            CborItem::Simple(value) => self.write_simple(*value),
            CborItem::Boolean(b) => self.write_boolean(*b),
            CborItem::Null => self.write_null(),
            CborItem::Undefined => self.write_undef(),
            CborItem::Half(bits) => {
                self.buf.push(MAJOR_SIMPLE << 5 | FLOAT_16);
                self.buf.extend_from_slice(&bits.to_be_bytes());
            }
            CborItem::Float(f) => self.write_f32(*f),
            CborItem::Double(f) => self.write_f64(*f),
            CborItem::Break => self.buf.push(BREAK),
            CborItem::Date(seconds) => {
                self.write_header(MAJOR_TAG, TAG_EPOCH_DATE);
                self.write_f64(*seconds);
            }
        }
    }

    /// Writes an initial byte plus the shortest argument encoding of `arg`.
    pub fn write_header(&mut self, major: u8, arg: u64) {
        let overlay = major << 5;
        if arg <= 23 {
            self.buf.push(overlay | arg as u8);
        } else if arg <= 0xff {
            self.buf.push(overlay | INFO_U8);
            self.buf.push(arg as u8);
        } else if arg <= 0xffff {
            self.buf.push(overlay | INFO_U16);
            self.buf.extend_from_slice(&(arg as u16).to_be_bytes());
        } else if arg <= 0xffff_ffff {
            self.buf.push(overlay | INFO_U32);
            self.buf.extend_from_slice(&(arg as u32).to_be_bytes());
        } else {
            self.buf.push(overlay | INFO_U64);
            self.buf.extend_from_slice(&arg.to_be_bytes());
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_header(MAJOR_UNSIGNED, int as u64);
        } else {
            self.write_header(MAJOR_NEGATIVE, !int as u64);
        }
    }

    pub fn write_bin(&mut self, bytes: &[u8]) {
        self.write_header(MAJOR_BYTES, bytes.len() as u64);
        self.buf.extend_from_slice(bytes);
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_header(MAJOR_TEXT, s.len() as u64);
        self.buf.extend_from_slice(s.as_bytes());
    }

    pub fn write_null(&mut self) {
        self.buf.push(MAJOR_SIMPLE << 5 | simple::NULL);
    }

    pub fn write_undef(&mut self) {
        self.buf.push(MAJOR_SIMPLE << 5 | simple::UNDEFINED);
    }

    pub fn write_boolean(&mut self, b: bool) {
        let value = if b { simple::TRUE } else { simple::FALSE };
        self.buf.push(MAJOR_SIMPLE << 5 | value);
    }

    pub fn write_simple(&mut self, value: u8) {
        if value < SIMPLE_EXTENDED {
            self.buf.push(MAJOR_SIMPLE << 5 | value);
        } else {
            self.buf.push(MAJOR_SIMPLE << 5 | SIMPLE_EXTENDED);
            self.buf.push(value);
        }
    }

    pub fn write_f32(&mut self, f: f32) {
        self.buf.push(0xfa);
        self.buf.extend_from_slice(&f.to_be_bytes());
    }

    pub fn write_f64(&mut self, f: f64) {
        self.buf.push(0xfb);
        self.buf.extend_from_slice(&f.to_be_bytes());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(item: &CborItem) -> Vec<u8> {
        CborEncoder::new().encode(item)
    }

    #[test]
    fn header_boundaries() {
        assert_eq!(enc(&CborItem::UnsignedInt(23)), [0x17]);
        assert_eq!(enc(&CborItem::UnsignedInt(24)), [0x18, 0x18]);
        assert_eq!(enc(&CborItem::UnsignedInt(0xff)), [0x18, 0xff]);
        assert_eq!(enc(&CborItem::UnsignedInt(0x100)), [0x19, 0x01, 0x00]);
        assert_eq!(
            enc(&CborItem::UnsignedInt(0x1_0000)),
            [0x1a, 0x00, 0x01, 0x00, 0x00]
        );
        assert_eq!(
            enc(&CborItem::UnsignedInt(u64::MAX)),
            [0x1b, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn negative_integers() {
        assert_eq!(enc(&CborItem::NegativeInt(0)), [0x20]);
        assert_eq!(enc(&CborItem::integer(-100)), [0x38, 0x63]);
        let mut e = CborEncoder::new();
        e.write_integer(-1000);
        assert_eq!(e.as_bytes(), [0x39, 0x03, 0xe7]);
    }

    #[test]
    fn floats_keep_width() {
        assert_eq!(enc(&CborItem::Half(0x3c00)), [0xf9, 0x3c, 0x00]);
        assert_eq!(enc(&CborItem::Float(1.5)), [0xfa, 0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(
            enc(&CborItem::Double(1.1)),
            [0xfb, 0x3f, 0xf1, 0x99, 0x99, 0x99, 0x99, 0x99, 0x9a]
        );
    }

    #[test]
    fn simple_values_and_date() {
        assert_eq!(enc(&CborItem::Simple(16)), [0xf0]);
        assert_eq!(enc(&CborItem::Simple(255)), [0xf8, 0xff]);
        assert_eq!(enc(&CborItem::Undefined), [0xf7]);
        let date = enc(&CborItem::Date(0.0));
        assert_eq!(date[0], 0xc1);
        assert_eq!(date[1], 0xfb);
        assert_eq!(date.len(), 10);
    }

    #[test]
    fn encoder_is_reusable() {
        let mut e = CborEncoder::new();
        assert_eq!(e.encode(&CborItem::Null), [0xf6]);
        assert_eq!(e.encode(&CborItem::Boolean(true)), [0xf5]);
    }
}
