use std::collections::{BTreeMap, HashMap};

use indexmap::IndexMap;

use super::{Encode, Encoder};
use crate::bytes::ByteBuf;
use crate::error::Result;
use crate::value::SmoValue;

macro_rules! impl_encode_scalar {
    ($($ty:ty => $method:ident,)*) => {$(
        impl Encode for $ty {
            fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
                encoder.single_value_container().$method(*self)
            }
        }
    )*};
}

impl_encode_scalar! {
    bool => encode_bool,
    i8 => encode_i8,
    i16 => encode_i16,
    i32 => encode_i32,
    i64 => encode_i64,
    isize => encode_isize,
    u8 => encode_u8,
    u16 => encode_u16,
    u32 => encode_u32,
    u64 => encode_u64,
    usize => encode_usize,
    f32 => encode_f32,
    f64 => encode_f64,
}

impl Encode for str {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        encoder.single_value_container().encode_str(self)
    }
}

impl Encode for String {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        self.as_str().encode(encoder)
    }
}

impl Encode for ByteBuf {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        encoder.single_value_container().encode_bytes(&self.0)
    }
}

impl Encode for SmoValue {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        encoder.single_value_container().encode_value(self.clone())
    }
}

impl Encode for () {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        encoder.single_value_container().encode_nil()
    }
}

impl<T: Encode> Encode for Option<T> {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        match self {
            Some(value) => value.encode(encoder),
            None => encoder.single_value_container().encode_nil(),
        }
    }
}

impl<T: Encode + ?Sized> Encode for &T {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode + ?Sized> Encode for Box<T> {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        (**self).encode(encoder)
    }
}

impl<T: Encode> Encode for [T] {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        encoder.unkeyed_container().encode_all(self)
    }
}

impl<T: Encode, const N: usize> Encode for [T; N] {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

impl<T: Encode> Encode for Vec<T> {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        self.as_slice().encode(encoder)
    }
}

macro_rules! impl_encode_map {
    ($($map:ident<$($extra:ident),*>),*) => {$(
        impl<T: Encode, $($extra),*> Encode for $map<String, T, $($extra),*> {
            fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
                let mut keyed = encoder.keyed_container();
                for (key, value) in self {
                    keyed.encode(key, value)?;
                }
                Ok(())
            }
        }
    )*};
}

impl_encode_map!(HashMap<S>, IndexMap<S>);

impl<T: Encode> Encode for BTreeMap<String, T> {
    fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
        let mut keyed = encoder.keyed_container();
        for (key, value) in self {
            keyed.encode(key, value)?;
        }
        Ok(())
    }
}

macro_rules! impl_encode_tuple {
    ($($name:ident $idx:tt),+) => {
        impl<$($name: Encode),+> Encode for ($($name,)+) {
            fn encode(&self, encoder: Encoder<'_>) -> Result<()> {
                let mut unkeyed = encoder.unkeyed_container();
                $(unkeyed.encode(&self.$idx)?;)+
                Ok(())
            }
        }
    };
}

impl_encode_tuple!(A 0, B 1);
impl_encode_tuple!(A 0, B 1, C 2);
