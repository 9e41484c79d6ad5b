use std::collections::{BTreeMap, HashMap};
use std::hash::BuildHasher;

use indexmap::IndexMap;

use super::{Decode, Decoder};
use crate::bytes::ByteBuf;
use crate::error::{Error, Result};
use crate::value::SmoValue;

macro_rules! impl_decode_scalar {
    ($($ty:ty => $method:ident,)*) => {$(
        impl Decode for $ty {
            fn decode(decoder: &Decoder<'_>) -> Result<Self> {
                decoder.single_value_container().$method()
            }
        }
    )*};
}

impl_decode_scalar! {
    bool => decode_bool,
    String => decode_string,
    i8 => decode_i8,
    i16 => decode_i16,
    i32 => decode_i32,
    i64 => decode_i64,
    isize => decode_isize,
    u8 => decode_u8,
    u16 => decode_u16,
    u32 => decode_u32,
    u64 => decode_u64,
    usize => decode_usize,
    f32 => decode_f32,
    f64 => decode_f64,
}

impl Decode for ByteBuf {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        decoder.single_value_container().decode_bytes().map(ByteBuf)
    }
}

impl Decode for SmoValue {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        Ok(decoder.value().clone())
    }
}

impl Decode for () {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let single = decoder.single_value_container();
        if single.decode_nil() {
            Ok(())
        } else {
            Err(Error::type_mismatch(
                decoder.coding_path(),
                "null",
                decoder.value().description(),
            ))
        }
    }
}

impl<T: Decode> Decode for Option<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        if decoder.single_value_container().decode_nil() {
            return Ok(None);
        }
        T::decode(decoder).map(Some)
    }
}

impl<T: Decode> Decode for Box<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        T::decode(decoder).map(Box::new)
    }
}

impl<T: Decode> Decode for Vec<T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let mut unkeyed = decoder.unkeyed_container()?;
        let mut out = Vec::with_capacity(unkeyed.count());
        while !unkeyed.is_at_end() {
            out.push(unkeyed.decode()?);
        }
        Ok(out)
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for HashMap<String, T, S> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed_container()?;
        let mut out = HashMap::with_capacity_and_hasher(keyed.len(), S::default());
        for key in keyed.all_keys() {
            out.insert(key.to_owned(), keyed.decode(key)?);
        }
        Ok(out)
    }
}

impl<T: Decode> Decode for BTreeMap<String, T> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed_container()?;
        let mut out = BTreeMap::new();
        for key in keyed.all_keys() {
            out.insert(key.to_owned(), keyed.decode(key)?);
        }
        Ok(out)
    }
}

impl<T: Decode, S: BuildHasher + Default> Decode for IndexMap<String, T, S> {
    fn decode(decoder: &Decoder<'_>) -> Result<Self> {
        let keyed = decoder.keyed_container()?;
        let mut out = IndexMap::with_capacity_and_hasher(keyed.len(), S::default());
        for key in keyed.all_keys() {
            out.insert(key.to_owned(), keyed.decode(key)?);
        }
        Ok(out)
    }
}

macro_rules! impl_decode_tuple {
    ($($name:ident),+) => {
        impl<$($name: Decode),+> Decode for ($($name,)+) {
            fn decode(decoder: &Decoder<'_>) -> Result<Self> {
                let mut unkeyed = decoder.unkeyed_container()?;
                Ok(($(unkeyed.decode::<$name>()?,)+))
            }
        }
    };
}

impl_decode_tuple!(A, B);
impl_decode_tuple!(A, B, C);
