//! `CborDecoder`: reads CBOR bytes into [`CborItem`]s.
//!
//! Item headers come from `ciborium-ll`. Floats are re-read from the input
//! so their declared width survives, and strings are assembled here so that
//! chunk and UTF-8 errors keep their own variants. Tags are kept
//! uninterpreted except for the epoch date tag.

use ciborium_io::Read;
use ciborium_ll::{simple, Decoder, Header};

use super::constants::*;
use super::error::CborError;
use crate::CborItem;

pub struct CborDecoder<'a> {
    data: &'a [u8],
    inner: Decoder<&'a [u8]>,
    depth: usize,
}

impl<'a> CborDecoder<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self {
            data,
            inner: Decoder::from(data),
            depth: 0,
        }
    }

    /// Current read offset.
    pub fn position(&mut self) -> usize {
        self.inner.offset()
    }

    pub fn is_at_end(&mut self) -> bool {
        self.position() >= self.data.len()
    }

    /// Reads one complete item. A lone break byte yields [`CborItem::Break`].
    pub fn read_item(&mut self) -> Result<CborItem, CborError> {
        let (header, start) = self.pull_header()?;
        Ok(match header {
            Header::Positive(n) => CborItem::UnsignedInt(n),
            Header::Negative(n) => CborItem::NegativeInt(n),
            Header::Bytes(len) => CborItem::ByteString(self.read_bin(len)?),
            Header::Text(len) => CborItem::Utf8String(self.read_str(len)?),
            Header::Array(len) => self.nested(|d| d.read_arr(len))?,
            Header::Map(len) => self.nested(|d| d.read_map(len))?,
            Header::Tag(tag) => self.nested(|d| d.read_tag(tag))?,
            Header::Simple(simple::FALSE) => CborItem::Boolean(false),
            Header::Simple(simple::TRUE) => CborItem::Boolean(true),
            Header::Simple(simple::NULL) => CborItem::Null,
            Header::Simple(simple::UNDEFINED) => CborItem::Undefined,
            Header::Simple(value) => CborItem::Simple(value),
            Header::Float(_) => self.read_float(start)?,
            Header::Break => CborItem::Break,
        })
    }

    /// Pulls the next header, returning it with the offset of its initial
    /// byte. Reserved and misplaced additional-info values are rejected
    /// before `ciborium-ll` sees them.
    fn pull_header(&mut self) -> Result<(Header, usize), CborError> {
        let start = self.inner.offset();
        let initial = *self.data.get(start).ok_or(CborError::UnexpectedEof)?;
        let (major, info) = (initial >> 5, initial & 0x1f);
        if (28..=30).contains(&info) {
            return Err(CborError::ReservedAdditionalInfo(info));
        }
        if info == INFO_INDEFINITE
            && matches!(major, MAJOR_UNSIGNED | MAJOR_NEGATIVE | MAJOR_TAG)
        {
            return Err(CborError::InvalidIndefiniteLength(major));
        }
        let header = self.inner.pull().map_err(|err| match err {
            ciborium_ll::Error::Io(_) => CborError::UnexpectedEof,
            ciborium_ll::Error::Syntax(offset) => CborError::InvalidHeader(offset),
        })?;
        Ok((header, start))
    }

    fn nested<T>(
        &mut self,
        f: impl FnOnce(&mut Self) -> Result<T, CborError>,
    ) -> Result<T, CborError> {
        if self.depth >= MAX_DEPTH {
            return Err(CborError::NestingTooDeep);
        }
        self.depth += 1;
        let result = f(self);
        self.depth -= 1;
        result
    }

    /// Reads an item that must not be a break marker.
    fn read_value(&mut self) -> Result<CborItem, CborError> {
        match self.read_item()? {
            CborItem::Break => Err(CborError::UnexpectedBreak),
            item => Ok(item),
        }
    }

    fn read_arr(&mut self, len: Option<usize>) -> Result<CborItem, CborError> {
        let mut items = Vec::new();
        match len {
            None => loop {
                match self.read_item()? {
                    CborItem::Break => break,
                    item => items.push(item),
                }
            },
            Some(len) => {
                // Every item takes at least one byte.
                items.reserve(len.min(self.remaining()));
                for _ in 0..len {
                    items.push(self.read_value()?);
                }
            }
        }
        Ok(CborItem::Array(items))
    }

    fn read_map(&mut self, len: Option<usize>) -> Result<CborItem, CborError> {
        let mut entries = Vec::new();
        match len {
            None => loop {
                let key = match self.read_item()? {
                    CborItem::Break => break,
                    key => key,
                };
                let value = self.read_value()?;
                entries.push((key, value));
            },
            Some(len) => {
                entries.reserve(len.min(self.remaining() / 2));
                for _ in 0..len {
                    let key = self.read_value()?;
                    let value = self.read_value()?;
                    entries.push((key, value));
                }
            }
        }
        Ok(CborItem::Map(entries))
    }

    fn read_tag(&mut self, tag: u64) -> Result<CborItem, CborError> {
        let value = self.read_value()?;
        if tag == TAG_EPOCH_DATE {
            let seconds = match value {
                CborItem::UnsignedInt(n) => Some(n as f64),
                CborItem::NegativeInt(n) => Some(-1.0 - n as f64),
                CborItem::Float(f) => Some(f as f64),
                CborItem::Double(f) => Some(f),
                _ => None,
            };
            if let Some(seconds) = seconds {
                return Ok(CborItem::Date(seconds));
            }
        }
        Ok(CborItem::Tagged(tag, Box::new(value)))
    }

    /// Re-reads the float argument that `ciborium-ll` already consumed, so
    /// half and single precision values keep their width and bits.
    fn read_float(&mut self, start: usize) -> Result<CborItem, CborError> {
        let end = self.inner.offset();
        let raw = &self.data[start + 1..end];
        let info = self.data[start] & 0x1f;
        let item = match info {
            FLOAT_16 => raw.try_into().map(|b| CborItem::Half(u16::from_be_bytes(b))),
            FLOAT_32 => raw
                .try_into()
                .map(|b| CborItem::Float(f32::from_be_bytes(b))),
            FLOAT_64 => raw
                .try_into()
                .map(|b| CborItem::Double(f64::from_be_bytes(b))),
            _ => return Err(CborError::InvalidHeader(start)),
        };
        item.map_err(|_| CborError::InvalidHeader(start))
    }

    fn read_bin(&mut self, len: Option<usize>) -> Result<Vec<u8>, CborError> {
        match len {
            Some(len) => self.read_chunk(len),
            None => {
                let mut out = Vec::new();
                while let Some(len) = self.next_chunk(MAJOR_BYTES)? {
                    out.extend_from_slice(&self.read_chunk(len)?);
                }
                Ok(out)
            }
        }
    }

    fn read_str(&mut self, len: Option<usize>) -> Result<String, CborError> {
        match len {
            Some(len) => self.read_utf8(len),
            None => {
                let mut out = String::new();
                while let Some(len) = self.next_chunk(MAJOR_TEXT)? {
                    out.push_str(&self.read_utf8(len)?);
                }
                Ok(out)
            }
        }
    }

    /// Length of the next chunk of an indefinite-length string, or `None`
    /// at its break. Chunks must be definite and of the string's own major
    /// type.
    fn next_chunk(&mut self, major: u8) -> Result<Option<usize>, CborError> {
        match self.pull_header()? {
            (Header::Break, _) => Ok(None),
            (Header::Bytes(Some(len)), _) if major == MAJOR_BYTES => Ok(Some(len)),
            (Header::Text(Some(len)), _) if major == MAJOR_TEXT => Ok(Some(len)),
            _ => Err(CborError::InvalidChunk),
        }
    }

    fn read_chunk(&mut self, len: usize) -> Result<Vec<u8>, CborError> {
        if len > self.remaining() {
            return Err(CborError::UnexpectedEof);
        }
        let mut buf = vec![0; len];
        self.inner
            .read_exact(&mut buf)
            .map_err(|_| CborError::UnexpectedEof)?;
        Ok(buf)
    }

    fn read_utf8(&mut self, len: usize) -> Result<String, CborError> {
        String::from_utf8(self.read_chunk(len)?).map_err(|_| CborError::InvalidUtf8)
    }

    #[inline]
    fn remaining(&mut self) -> usize {
        self.data.len().saturating_sub(self.inner.offset())
    }
}

/// Decodes the first item of `bytes`, returning it with the number of bytes consumed.
pub fn decode_with_consumed(bytes: &[u8]) -> Result<(CborItem, usize), CborError> {
    let mut decoder = CborDecoder::new(bytes);
    match decoder.read_item()? {
        CborItem::Break => Err(CborError::UnexpectedBreak),
        item => Ok((item, decoder.position())),
    }
}

/// Decodes exactly one item; trailing bytes are an error.
pub fn decode(bytes: &[u8]) -> Result<CborItem, CborError> {
    let (item, consumed) = decode_with_consumed(bytes)?;
    if consumed != bytes.len() {
        return Err(CborError::TrailingBytes(bytes.len() - consumed));
    }
    Ok(item)
}
